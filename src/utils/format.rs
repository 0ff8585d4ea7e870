use std::time::Duration;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn text_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

pub fn fit_text(value: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text_width(value) <= max_len {
        return value.to_string();
    }
    if max_len <= 3 {
        return take_width(value, max_len);
    }
    let mut trimmed = take_width(value, max_len - 3);
    trimmed.push_str("...");
    trimmed
}

/// Keeps the trailing part of `value` that fits in `max_len` cells.
///
/// Used for the name input so the cursor end stays visible.
pub fn tail_width(value: &str, max_len: usize) -> String {
    let mut kept = Vec::new();
    let mut width = 0;
    for ch in value.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_len {
            break;
        }
        kept.push(ch);
        width += ch_width;
    }
    kept.into_iter().rev().collect()
}

pub fn take_width(value: &str, max_len: usize) -> String {
    let mut output = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_len {
            break;
        }
        output.push(ch);
        width += ch_width;
    }
    output
}

pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m ago")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s ago")
    } else {
        format!("{seconds}s ago")
    }
}
