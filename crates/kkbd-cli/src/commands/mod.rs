pub mod config_ops;
pub mod convert_ops;
pub mod dict_ops;
pub mod user_dict_ops;

use unicode_width::UnicodeWidthStr;

/// Pad `text` with spaces to `width` terminal columns.
///
/// Kana and kanji occupy two columns each, so `format!("{:<w$}")` misaligns
/// them.
pub(crate) fn pad(text: &str, width: usize) -> String {
    let display_width = UnicodeWidthStr::width(text);
    if display_width < width {
        format!("{}{}", text, " ".repeat(width - display_width))
    } else {
        text.to_string()
    }
}

/// The widest entry of `items`, in terminal columns.
pub(crate) fn column_width<'a>(items: impl IntoIterator<Item = &'a str>) -> usize {
    items.into_iter().map(|s| s.width()).max().unwrap_or(0)
}
