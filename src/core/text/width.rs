//! Grapheme width and fixed-width fitting helpers.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 3;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }

    // Single-codepoint emoji with text presentation (`▪`, `☺`) stay narrow.
    if emoji_get(grapheme).is_some() {
        let mut chars = grapheme.chars();
        let text_presentation = matches!(
            (chars.next(), chars.next()),
            (Some(ch), None) if UnicodeWidthChar::width(ch) == Some(1)
        );
        if !text_presentation {
            return 2;
        }
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

/// Display width of plain text (no escape sequences).
pub fn text_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}

/// Longest prefix of `text` whose display width is at most `max_width`.
///
/// A wide grapheme that would straddle the limit is dropped entirely.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme_width(grapheme);
        if used + width > max_width {
            break;
        }
        used += width;
        out.push_str(grapheme);
    }
    out
}

/// Clip `text` to `width` columns and pad with spaces to exactly `width`.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_to_width(text, width);
    let used = text_width(&out);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Right-align `text` within `width` columns; longer text is returned unchanged.
pub fn align_right(text: &str, width: usize) -> String {
    let used = text_width(text);
    let mut out = " ".repeat(width.saturating_sub(used));
    out.push_str(text);
    out
}
