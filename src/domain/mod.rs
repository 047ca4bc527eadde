//! Domain logic for doctoc
//!
//! Pure transformations over in-memory text and trees, without any I/O.
//!
//! ## Injection Engine
//!
//! ```text
//! lines → scan_tags → analyze_document → transform_document → lines
//!                                      ↘ build_cleanup_preview
//! ```
//!
//! ## TOC Generation
//!
//! ```text
//! paths → build_tree_from_paths → sort_tree → render_markdown
//! ```

mod analysis;
mod numerals;
mod render;
mod sort_key;
mod tags;
mod transform;
mod tree;

pub use analysis::{analyze_document, DocumentAnalysis, StaleKind, StaleRegion};
pub use numerals::{chinese_to_number, roman_to_number};
pub use render::{encode_link, render_markdown};
pub use sort_key::{compare_sort_keys, extract_sort_key, normalize_full_width, SortKey};
pub use tags::{end_tag, is_fence, scan_tags, EndTag, MarkTag, ScannedTags, START_TAG};
pub use transform::{
    append_section, build_cleanup_preview, collapse_blank_lines, transform_document,
    CleanupPreview,
};
pub use tree::{build_tree_from_paths, natural_cmp, sort_tree, DocNode, NodeKind};
