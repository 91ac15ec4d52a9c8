//! Header and Footer: a title centred in an inner rounded box.

use crate::blocks::chrome::{
    border, repeat, spaces, ROUND_BOTTOM_LEFT, ROUND_BOTTOM_RIGHT, ROUND_TOP_LEFT,
    ROUND_TOP_RIGHT, SINGLE_HORIZONTAL, SINGLE_T_LEFT, SINGLE_T_RIGHT, SINGLE_VERTICAL,
};
use crate::core::block::{Block, RenderContext};
use crate::core::color::TextStyle;
use crate::core::text::width::{text_width, truncate_to_width};
use crate::document::DocumentTheme;
use crate::render::line::{Line, RenderedBlock, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BannerKind {
    Header,
    Footer,
}

/// Five rows of rounded chrome with a bold title joined to the frame by `├─┤` runs.
#[derive(Debug, Clone)]
pub struct Header {
    text: String,
}

impl Header {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Block for Header {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        render_banner(BannerKind::Header, &self.text, ctx.width, ctx.theme)
    }
}

/// Like [`Header`], but the title sits between plain verticals and blinks.
#[derive(Debug, Clone)]
pub struct Footer {
    text: String,
}

impl Footer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Block for Footer {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        render_banner(BannerKind::Footer, &self.text, ctx.width, ctx.theme)
    }
}

fn render_banner(
    kind: BannerKind,
    text: &str,
    width: usize,
    theme: &DocumentTheme,
) -> RenderedBlock {
    let padded = format!(" {} ", truncate_to_width(text, width.saturating_sub(6)));
    let padded_width = text_width(&padded);
    let pad = width.saturating_sub(padded_width);
    let left = (pad / 2).saturating_sub(2);
    let right = pad.saturating_sub(left + 4);
    let inner_rule = repeat(SINGLE_HORIZONTAL, padded_width);

    let mut block = RenderedBlock::default();
    block.push(Line::new(vec![border(
        format!(
            "{ROUND_TOP_LEFT}{}{ROUND_TOP_RIGHT}",
            repeat(SINGLE_HORIZONTAL, width.saturating_sub(2))
        ),
        theme,
    )]));
    block.push(Line::new(vec![
        border(SINGLE_VERTICAL.to_string(), theme),
        Segment::new(spaces(left)),
        border(format!("{ROUND_TOP_LEFT}{inner_rule}{ROUND_TOP_RIGHT}"), theme),
        Segment::new(spaces(right)),
        border(SINGLE_VERTICAL.to_string(), theme),
    ]));

    let text_row = match kind {
        BannerKind::Header => Line::new(vec![
            border(
                format!("{SINGLE_T_LEFT}{}{SINGLE_T_RIGHT}", repeat(SINGLE_HORIZONTAL, left)),
                theme,
            ),
            Segment::styled(padded, theme.text, TextStyle::BOLD),
            border(
                format!("{SINGLE_T_LEFT}{}{SINGLE_T_RIGHT}", repeat(SINGLE_HORIZONTAL, right)),
                theme,
            ),
        ]),
        BannerKind::Footer => Line::new(vec![
            border(SINGLE_VERTICAL.to_string(), theme),
            Segment::new(spaces(left)),
            border(SINGLE_VERTICAL.to_string(), theme),
            Segment::styled(padded, theme.text, TextStyle::BLINK),
            border(SINGLE_VERTICAL.to_string(), theme),
            Segment::new(spaces(right)),
            border(SINGLE_VERTICAL.to_string(), theme),
        ]),
    };
    block.push(text_row);

    block.push(Line::new(vec![
        border(SINGLE_VERTICAL.to_string(), theme),
        Segment::new(spaces(left)),
        border(format!("{ROUND_BOTTOM_LEFT}{inner_rule}{ROUND_BOTTOM_RIGHT}"), theme),
        Segment::new(spaces(right)),
        border(SINGLE_VERTICAL.to_string(), theme),
    ]));
    block.push(Line::new(vec![border(
        format!(
            "{ROUND_BOTTOM_LEFT}{}{ROUND_BOTTOM_RIGHT}",
            repeat(SINGLE_HORIZONTAL, width.saturating_sub(2))
        ),
        theme,
    )]));
    block
}

#[cfg(test)]
mod tests {
    use super::{Footer, Header};
    use crate::core::block::{Block, RenderContext};
    use crate::core::color::TextStyle;
    use crate::document::DocumentTheme;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_layout() {
        let theme = DocumentTheme::default();
        let rendered = Header::new("Report").render(&RenderContext::new(20, &theme));
        assert_eq!(
            rendered.plain_lines(),
            vec![
                "╭──────────────────╮",
                "│    ╭────────╮    │",
                "├────┤ Report ├────┤",
                "│    ╰────────╯    │",
                "╰──────────────────╯",
            ]
        );
    }

    #[test]
    fn footer_blinks_between_plain_verticals() {
        let theme = DocumentTheme::default();
        let rendered = Footer::new("done").render(&RenderContext::new(50, &theme));
        assert_eq!(rendered.len(), 5);
        for line in rendered.lines() {
            assert_eq!(line.width(), 50);
        }
        let text_row = &rendered.lines()[2];
        assert!(text_row.plain_text().starts_with('│'));
        assert!(text_row
            .segments()
            .iter()
            .any(|s| s.text() == " done " && s.text_style() == TextStyle::BLINK));
    }

    #[test]
    fn oversized_titles_stay_inside_the_frame() {
        let theme = DocumentTheme::default();
        let rendered = Header::new("y".repeat(300)).render(&RenderContext::new(60, &theme));
        for line in rendered.lines() {
            assert_eq!(line.width(), 60);
        }
    }
}
