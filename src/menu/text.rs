//! Fixed-width text shaping for menu rows and the modal box.
//!
//! Widths count `char`s, never bytes, so multi-byte labels are cut on scalar
//! boundaries.

/// Center `text` in a field of exactly `width` characters.
///
/// Text at least as long as the field is cut to its first `width` characters
/// without centering. Shorter text is padded with spaces; when the padding is
/// odd the extra space goes after the text.
#[must_use]
pub fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut out = String::with_capacity(width + text.len() - len);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Format `value` in decimal and center it like [`center_text`].
#[must_use]
pub fn center_number(value: i32, width: usize) -> String {
    center_text(&value.to_string(), width)
}

/// Left-justify `text` in exactly `width` characters, cutting or padding.
#[must_use]
pub fn fit_left(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Lay out a menu row: one margin column on each side of the label.
///
/// The result is exactly `columns` characters wide.
#[must_use]
pub fn format_row(label: &str, columns: usize) -> String {
    if columns < 2 {
        return fit_left(label, columns);
    }
    let mut row = String::with_capacity(columns);
    row.push(' ');
    row.push_str(&fit_left(label, columns - 2));
    row.push(' ');
    row
}
