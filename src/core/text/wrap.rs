//! Word wrapping for block bodies, table cells, and legends.

use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;

/// Wrap `text` into lines of at most `max_width` display columns.
///
/// Explicit newlines (`\n`, `\r\n`, `\r`) always break. A long line breaks at the
/// last space that still fits (the space itself is dropped), or hard-splits when
/// there is none. Empty input yields a single empty line.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    if text.is_empty() {
        return vec![String::new()];
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    for raw in normalized.split('\n') {
        wrap_line(raw, max_width, &mut lines);
    }
    lines
}

fn wrap_line(raw: &str, max_width: usize, out: &mut Vec<String>) {
    let mut rest: Vec<&str> = raw.graphemes(true).collect();

    loop {
        let widths: Vec<usize> = rest.iter().map(|g| grapheme_width(g)).collect();
        if widths.iter().sum::<usize>() <= max_width {
            out.push(rest.concat());
            return;
        }

        // Number of graphemes that fit; at least one so wide graphemes still progress.
        let mut fit = 0;
        let mut used = 0;
        while fit < rest.len() && used + widths[fit] <= max_width {
            used += widths[fit];
            fit += 1;
        }
        let fit = fit.max(1);

        // A space directly after the fitting run is also a valid break point.
        let search_end = fit.min(rest.len() - 1);
        let break_at = (1..=search_end).rev().find(|&idx| rest[idx] == " ");

        let (head, tail) = match break_at {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (&rest[..fit], &rest[fit..]),
        };
        out.push(head.concat().trim_end().to_string());

        let skip = tail.iter().take_while(|g| g.trim().is_empty()).count();
        rest = tail[skip..].to_vec();
        if rest.is_empty() {
            return;
        }
    }
}
