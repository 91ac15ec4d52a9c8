//! Shared block chrome: glyph sets, title box, dividers, closing border.

use crate::core::color::{Color, TextStyle};
use crate::core::text::width::{text_width, truncate_to_width};
use crate::document::DocumentTheme;
use crate::render::line::{Line, Segment};

pub const DOUBLE_TOP_LEFT: char = '╔';
pub const DOUBLE_TOP_RIGHT: char = '╗';
pub const DOUBLE_BOTTOM_LEFT: char = '╚';
pub const DOUBLE_BOTTOM_RIGHT: char = '╝';
pub const DOUBLE_HORIZONTAL: char = '═';
pub const DOUBLE_VERTICAL: char = '║';
pub const DOUBLE_T_LEFT: char = '╠';
pub const DOUBLE_T_RIGHT: char = '╣';
pub const DOUBLE_T_UP: char = '╩';
pub const DOUBLE_T_DOWN: char = '╦';
pub const DOUBLE_CROSS: char = '╬';

pub const ROUND_TOP_LEFT: char = '╭';
pub const ROUND_TOP_RIGHT: char = '╮';
pub const ROUND_BOTTOM_LEFT: char = '╰';
pub const ROUND_BOTTOM_RIGHT: char = '╯';
pub const SINGLE_HORIZONTAL: char = '─';
pub const SINGLE_VERTICAL: char = '│';
pub const SINGLE_T_LEFT: char = '├';
pub const SINGLE_T_RIGHT: char = '┤';

pub const SHADE_FULL: char = '█';
pub const SHADE_DARK: char = '▓';
pub const SHADE_MEDIUM: char = '▒';
pub const SHADE_LIGHT: char = '░';

pub const ROOT_GLYPH: &str = "[+]";

/// Columns of chrome around a title: `║ [+] ` on the left, two spaces and `║` on the right.
const TITLE_CHROME: usize = 9;

pub fn repeat(ch: char, count: usize) -> String {
    std::iter::repeat(ch).take(count).collect()
}

pub fn spaces(count: usize) -> String {
    " ".repeat(count)
}

pub fn border(text: impl Into<String>, theme: &DocumentTheme) -> Segment {
    Segment::new(text).fg(theme.border)
}

/// `╔═…═╗` followed by `║ [+] Title…  ║`.
pub fn title_box(title: &str, width: usize, theme: &DocumentTheme) -> [Line; 2] {
    let available = width.saturating_sub(TITLE_CHROME);
    let shown = truncate_to_width(title, available);
    let fill = available.saturating_sub(text_width(&shown));

    let top = Line::new(vec![border(
        format!(
            "{DOUBLE_TOP_LEFT}{}{DOUBLE_TOP_RIGHT}",
            repeat(DOUBLE_HORIZONTAL, width.saturating_sub(2))
        ),
        theme,
    )]);
    let title_row = Line::new(vec![
        border(DOUBLE_VERTICAL.to_string(), theme),
        Segment::new(" "),
        Segment::new(ROOT_GLYPH).fg(theme.root_glyph),
        Segment::new(" "),
        Segment::styled(shown, theme.text, TextStyle::BOLD),
        Segment::new(spaces(fill + 2)),
        border(DOUBLE_VERTICAL.to_string(), theme),
    ]);
    [top, title_row]
}

/// `╠═…═╣` between a title box and a block body.
pub fn divider(width: usize, theme: &DocumentTheme) -> Line {
    Line::new(vec![border(
        format!(
            "{DOUBLE_T_LEFT}{}{DOUBLE_T_RIGHT}",
            repeat(DOUBLE_HORIZONTAL, width.saturating_sub(2))
        ),
        theme,
    )])
}

/// `╚═…═╝`.
pub fn closing_border(width: usize, theme: &DocumentTheme) -> Line {
    Line::new(vec![border(
        format!(
            "{DOUBLE_BOTTOM_LEFT}{}{DOUBLE_BOTTOM_RIGHT}",
            repeat(DOUBLE_HORIZONTAL, width.saturating_sub(2))
        ),
        theme,
    )])
}

/// `║` + `content` + `║`, where `content` is expected to be `width - 2` columns.
pub fn framed_row(content: Vec<Segment>, theme: &DocumentTheme) -> Line {
    let mut line = Line::new(vec![border(DOUBLE_VERTICAL.to_string(), theme)]);
    for segment in content {
        line.push(segment);
    }
    line.push(border(DOUBLE_VERTICAL.to_string(), theme));
    line
}

/// Color for a piece of body text: an explicit override or the theme text color.
pub fn text_color(explicit: Option<Color>, theme: &DocumentTheme) -> Color {
    explicit.unwrap_or(theme.text)
}

#[cfg(test)]
mod tests {
    use super::{closing_border, divider, title_box};
    use crate::document::DocumentTheme;

    #[test]
    fn title_box_is_exact_width() {
        let theme = DocumentTheme::default();
        let [top, row] = title_box("Build status", 60, &theme);
        assert_eq!(top.width(), 60);
        assert_eq!(row.width(), 60);
        assert!(row.plain_text().starts_with("║ [+] Build status"));
        assert!(row.plain_text().ends_with("  ║"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let theme = DocumentTheme::default();
        let title = "x".repeat(200);
        let [_, row] = title_box(&title, 50, &theme);
        assert_eq!(row.width(), 50);
        assert_eq!(row.plain_text(), format!("║ [+] {}  ║", "x".repeat(41)));
    }

    #[test]
    fn divider_and_closing_border() {
        let theme = DocumentTheme::default();
        assert_eq!(divider(5, &theme).plain_text(), "╠═══╣");
        assert_eq!(closing_border(5, &theme).plain_text(), "╚═══╝");
    }
}
