//! Outline block: indented bullet hierarchy with depth-coloured glyphs.

use crate::blocks::chrome::{border, closing_border, divider, spaces, title_box, DOUBLE_VERTICAL};
use crate::blocks::node::Node;
use crate::core::block::{Block, RenderContext};
use crate::core::text::width::text_width;
use crate::core::text::wrap::wrap_text;
use crate::document::DocumentTheme;
use crate::render::line::{Line, RenderedBlock, Segment};

const GLYPH_ROOT: &str = "[❦]";
const GLYPH_ODD: &str = "[≋]";
const GLYPH_EVEN: &str = "[✶]";

#[derive(Debug, Clone)]
pub struct Outline {
    title: String,
    nodes: Vec<Node>,
}

impl Outline {
    pub fn new(title: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            nodes,
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }
}

impl Block for Outline {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let width = ctx.width;
        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, width, ctx.theme));
        block.push(divider(width, ctx.theme));
        for node in &self.nodes {
            render_node(node, 0, width, ctx.theme, &mut block);
        }
        block.push(closing_border(width, ctx.theme));
        block
    }
}

fn render_node(
    node: &Node,
    depth: usize,
    width: usize,
    theme: &DocumentTheme,
    block: &mut RenderedBlock,
) {
    let (glyph, glyph_color) = if depth % 2 == 1 {
        (GLYPH_ODD, theme.outline_colors[1])
    } else if depth > 0 {
        (GLYPH_EVEN, theme.outline_colors[2])
    } else {
        (GLYPH_ROOT, theme.outline_colors[0])
    };

    let max_text = width.saturating_sub(4);
    let indent = depth * 3 + 1;
    let glyph_width = text_width(glyph);
    let available = max_text.saturating_sub(indent + 4).max(1);
    let pad = max_text.saturating_sub(indent + glyph_width);

    for (idx, line) in wrap_text(&node.text, available).into_iter().enumerate() {
        let fill = (pad + 1).saturating_sub(text_width(&line));
        let mut row = Line::new(vec![border(DOUBLE_VERTICAL.to_string(), theme)]);
        if idx == 0 {
            row.push(Segment::new(spaces(indent)));
            row.push(Segment::new(glyph).fg(glyph_color));
            row.push(Segment::new(" "));
        } else {
            row.push(Segment::new(spaces(glyph_width + indent + 1)));
        }
        row.push(Segment::new(line).fg(theme.text));
        row.push(Segment::new(spaces(fill)));
        row.push(border(DOUBLE_VERTICAL.to_string(), theme));
        block.push(row);
    }

    for child in &node.children {
        render_node(child, depth + 1, width, theme, block);
    }
}
