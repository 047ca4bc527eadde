//! Sort keys derived from file and directory names
//!
//! Names often carry their intended position: `01_intro.md`, `1.2-setup.md`,
//! `第三章`, `IV.appendix`. A sort key is the multi-level number found at the
//! start of a name, so `1.2` sorts between `1` and `1.10`.

use std::cmp::Ordering;

use super::numerals::{arabic_prefix, chinese_prefix, roman_prefix};

/// Multi-level numeric position, never empty
pub type SortKey = Vec<u64>;

/// Maps full-width ASCII variants and the ideographic space to plain ASCII
pub fn normalize_full_width(s: &str) -> String {
    s.chars()
        .map(|c| match c as u32 {
            0x3000 => ' ',
            code @ 0xFF01..=0xFF5E => char::from_u32(code - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Extracts the numeric prefix of a name, trying Arabic, Chinese, then Roman
pub fn extract_sort_key(name: &str) -> Option<SortKey> {
    if name.is_empty() {
        return None;
    }

    let normalized = normalize_full_width(name);
    arabic_prefix(&normalized)
        .or_else(|| chinese_prefix(&normalized))
        .or_else(|| roman_prefix(&normalized))
}

/// Orders keys level by level; a missing key sorts last, a prefix sorts first
pub fn compare_sort_keys(a: Option<&[u64]>, b: Option<&[u64]>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}
