//! Separator block.

use crate::blocks::chrome::{
    border, repeat, spaces, ROUND_BOTTOM_LEFT, ROUND_BOTTOM_RIGHT, ROUND_TOP_LEFT,
    ROUND_TOP_RIGHT, SINGLE_HORIZONTAL, SINGLE_VERTICAL,
};
use crate::core::block::{Block, RenderContext};
use crate::core::color::TextStyle;
use crate::core::text::width::{text_width, truncate_to_width};
use crate::render::line::{Line, RenderedBlock, Segment};

/// Rounded top and bottom rules with an optional centred bold caption between them.
#[derive(Debug, Clone, Default)]
pub struct Separator {
    text: String,
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Block for Separator {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let width = ctx.width;
        let theme = ctx.theme;
        let rule = repeat(SINGLE_HORIZONTAL, width.saturating_sub(2));

        let mut block = RenderedBlock::default();
        block.push(Line::new(vec![border(
            format!("{ROUND_TOP_LEFT}{rule}{ROUND_TOP_RIGHT}"),
            theme,
        )]));

        if !self.text.trim().is_empty() {
            let padded = format!(" {} ", truncate_to_width(&self.text, width.saturating_sub(4)));
            let pad = width.saturating_sub(text_width(&padded));
            let left = (pad / 2).saturating_sub(1);
            let right = (pad / 2 + pad % 2).saturating_sub(1);
            block.push(Line::new(vec![
                border(SINGLE_VERTICAL.to_string(), theme),
                Segment::new(spaces(left)),
                Segment::styled(padded, theme.text, TextStyle::BOLD),
                Segment::new(spaces(right)),
                border(SINGLE_VERTICAL.to_string(), theme),
            ]));
        }

        block.push(Line::new(vec![border(
            format!("{ROUND_BOTTOM_LEFT}{rule}{ROUND_BOTTOM_RIGHT}"),
            theme,
        )]));
        block
    }
}
