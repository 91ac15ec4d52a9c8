//! Panel block: title box over a word-wrapped body.

use crate::blocks::chrome::{closing_border, divider, framed_row, spaces, title_box};
use crate::core::block::{Block, RenderContext};
use crate::core::text::width::text_width;
use crate::core::text::wrap::wrap_text;
use crate::render::line::{RenderedBlock, Segment};

#[derive(Debug, Clone)]
pub struct Panel {
    title: String,
    body: String,
}

impl Panel {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Block for Panel {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let width = ctx.width;
        let theme = ctx.theme;
        let text_width_max = width.saturating_sub(4);

        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, width, theme));
        block.push(divider(width, theme));
        for line in wrap_text(&self.body, text_width_max) {
            let fill = width.saturating_sub(text_width(&line) + 3);
            block.push(framed_row(
                vec![
                    Segment::new(" "),
                    Segment::new(line).fg(theme.text),
                    Segment::new(spaces(fill)),
                ],
                theme,
            ));
        }
        block.push(closing_border(width, theme));
        block
    }
}
