//! Numeral prefix parsing (Arabic, Chinese, Roman)

use once_cell::sync::Lazy;
use regex::Regex;

const CHINESE_DIGITS: &[(char, u64)] = &[
    ('零', 0),
    ('〇', 0),
    ('一', 1),
    ('二', 2),
    ('两', 2),
    ('三', 3),
    ('四', 4),
    ('五', 5),
    ('六', 6),
    ('七', 7),
    ('八', 8),
    ('九', 9),
];

const CHINESE_UNITS: &[(char, u64)] = &[('十', 10), ('百', 100), ('千', 1000), ('万', 10000)];

const NUMERAL_CLASS: &str = "零〇一二两三四五六七八九十百千万";

static CHAPTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^第([{NUMERAL_CLASS}]+)(?:章|节|部分|篇|卷|集|回)?"))
        .expect("valid chapter regex")
});

static BRACKET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[（(【〔\[]([{NUMERAL_CLASS}]+)[）)】〕\]]"))
        .expect("valid bracket regex")
});

static ENUM_COMMA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^([{NUMERAL_CLASS}]+)、")).expect("valid enumeration regex")
});

static LEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^([{NUMERAL_CLASS}]+)(?:[^{NUMERAL_CLASS}]|$)"))
        .expect("valid leading numeral regex")
});

/// Strict structure: thousands, hundreds, tens, units
static ROMAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^M*(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$")
        .expect("valid roman regex")
});

/// Extracts a leading multi-level Arabic number (`1.2-3_intro` → `[1, 2, 3]`)
pub fn arabic_prefix(name: &str) -> Option<Vec<u64>> {
    let chars: Vec<char> = name.chars().collect();
    if !chars.first().is_some_and(char::is_ascii_digit) {
        return None;
    }

    let mut levels = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            current.push(c);
        } else if (c == '.' || c == '-')
            && !current.is_empty()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit)
        {
            levels.push(parse_level(&current));
            current.clear();
        } else {
            break;
        }
        i += 1;
    }

    if !current.is_empty() {
        levels.push(parse_level(&current));
    }

    (!levels.is_empty()).then_some(levels)
}

/// Saturates on overflow rather than failing
fn parse_level(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn digit_value(c: char) -> Option<u64> {
    CHINESE_DIGITS.iter().find(|(d, _)| *d == c).map(|(_, v)| *v)
}

fn unit_value(c: char) -> Option<u64> {
    CHINESE_UNITS.iter().find(|(u, _)| *u == c).map(|(_, v)| *v)
}

/// Converts a Chinese numeral (`三百零五` → 305)
pub fn chinese_to_number(numeral: &str) -> Option<u64> {
    if numeral.is_empty() {
        return None;
    }

    let mut result = 0;
    let mut section = 0;
    let mut digit = 0;

    for c in numeral.chars() {
        if let Some(d) = digit_value(c) {
            digit = d;
        } else if let Some(unit) = unit_value(c) {
            if unit == 10000 {
                section += digit;
                result += section * unit;
                section = 0;
            } else {
                // 十 alone means 10
                section += digit.max(1) * unit;
            }
            digit = 0;
        } else {
            return None;
        }
    }

    Some(result + section + digit)
}

/// Extracts a leading Chinese ordinal (`第十一章`, `（二）`, `三、`)
pub fn chinese_prefix(name: &str) -> Option<Vec<u64>> {
    [&*CHAPTER_RE, &*BRACKET_RE, &*ENUM_COMMA_RE, &*LEADING_RE]
        .iter()
        .find_map(|re| {
            let caps = re.captures(name)?;
            chinese_to_number(caps.get(1)?.as_str()).filter(|n| *n > 0)
        })
        .map(|n| vec![n])
}

fn roman_value(c: char) -> Option<u64> {
    match c.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Converts a Roman numeral, applying the subtraction rule (`IX` → 9)
pub fn roman_to_number(numeral: &str) -> Option<u64> {
    let mut result: i64 = 0;
    let mut prev = 0;

    for c in numeral.chars().rev() {
        let value = roman_value(c)? as i64;
        if value < prev {
            result -= value;
        } else {
            result += value;
        }
        prev = value;
    }

    (result > 0).then_some(result as u64)
}

/// Extracts a leading Roman numeral that is not the start of a word
pub fn roman_prefix(name: &str) -> Option<Vec<u64>> {
    let numeral: String = name.chars().take_while(|c| roman_value(*c).is_some()).collect();
    if numeral.is_empty() {
        return None;
    }

    let rest = &name[numeral.len()..];
    if rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    if !ROMAN_RE.is_match(&numeral) {
        return None;
    }

    roman_to_number(&numeral).map(|n| vec![n])
}
