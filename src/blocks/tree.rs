//! TreeDiagram block: a rooted tree drawn with heavy branch glyphs.

use crate::blocks::chrome::{
    border, closing_border, divider, repeat, spaces, title_box, DOUBLE_HORIZONTAL, DOUBLE_T_LEFT,
    DOUBLE_T_RIGHT, DOUBLE_VERTICAL,
};
use crate::blocks::node::Node;
use crate::core::block::{Block, RenderContext};
use crate::core::color::TextStyle;
use crate::core::text::width::{text_width, truncate_to_width};
use crate::document::DocumentTheme;
use crate::render::line::{Line, RenderedBlock, Segment};

const BRANCH_MID: &str = "┣━━";
const BRANCH_END: &str = "┗━━";
const TRUNK: char = '┃';
const NODE: &str = "■";

#[derive(Debug, Clone)]
pub struct TreeDiagram {
    title: String,
    root: Node,
}

impl TreeDiagram {
    pub fn new(title: impl Into<String>, root: Node) -> Self {
        Self {
            title: title.into(),
            root,
        }
    }
}

impl Block for TreeDiagram {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let width = ctx.width;
        let theme = ctx.theme;

        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, width, theme));
        block.push(divider(width, theme));

        let root_text = truncate_to_width(&self.root.text, width.saturating_sub(6));
        let fill = width.saturating_sub(6 + text_width(&root_text));
        block.push(Line::new(vec![
            border(DOUBLE_VERTICAL.to_string(), theme),
            Segment::new("  "),
            Segment::new(NODE).fg(theme.tree_node),
            Segment::new(" "),
            Segment::styled(root_text, theme.text, TextStyle::BOLD),
            Segment::new(spaces(fill)),
            border(DOUBLE_VERTICAL.to_string(), theme),
        ]));

        let count = self.root.children.len();
        for (idx, child) in self.root.children.iter().enumerate() {
            let is_last = idx + 1 == count;
            render_child(child, &mut Vec::new(), is_last, width, theme, &mut block);
            if !is_last {
                block.push(Line::new(vec![
                    border(format!("{DOUBLE_T_LEFT}{}", repeat(DOUBLE_HORIZONTAL, 2)), theme),
                    Segment::new(TRUNK.to_string()).fg(theme.tree_node),
                    border(
                        format!(
                            "{}{DOUBLE_T_RIGHT}",
                            repeat(DOUBLE_HORIZONTAL, width.saturating_sub(5))
                        ),
                        theme,
                    ),
                ]));
            }
        }

        block.push(closing_border(width, theme));
        block
    }
}

/// `ancestors[i]` is true when the ancestor at depth `i` has a later sibling.
fn render_child(
    node: &Node,
    ancestors: &mut Vec<bool>,
    is_last: bool,
    width: usize,
    theme: &DocumentTheme,
    block: &mut RenderedBlock,
) {
    let mut prefix = String::from("  ");
    for &has_sibling in ancestors.iter() {
        if has_sibling {
            prefix.push(TRUNK);
            prefix.push_str("  ");
        } else {
            prefix.push_str("   ");
        }
    }
    let branch = if is_last { BRANCH_END } else { BRANCH_MID };
    let used = text_width(&prefix) + text_width(branch) + 4;
    let text = truncate_to_width(&node.text, width.saturating_sub(used + 1));
    let fill = width.saturating_sub(used + text_width(&text));

    block.push(Line::new(vec![
        border(DOUBLE_VERTICAL.to_string(), theme),
        Segment::new(prefix).fg(theme.tree_node),
        Segment::new(format!("{branch}{NODE} ")).fg(theme.tree_node),
        Segment::new(text).fg(theme.text),
        Segment::new(spaces(fill)),
        border(DOUBLE_VERTICAL.to_string(), theme),
    ]));

    ancestors.push(!is_last);
    let count = node.children.len();
    for (idx, child) in node.children.iter().enumerate() {
        render_child(child, ancestors, idx + 1 == count, width, theme, block);
    }
    ancestors.pop();
}
