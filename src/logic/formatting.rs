//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use unicode_width::UnicodeWidthStr;

/// Group code digits by three
///
/// # Examples
/// ```
/// use authtui::logic::formatting::group_code;
///
/// assert_eq!(group_code("123456"), "123 456");
/// assert_eq!(group_code("12345678"), "123 456 78");
/// assert_eq!(group_code(""), "");
/// ```
pub fn group_code(code: &str) -> String {
    code.chars()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to a display width, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Hide all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "•".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "•".repeat(count - 4), tail)
}
