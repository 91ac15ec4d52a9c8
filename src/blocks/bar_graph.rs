//! BarGraph block: one proportional bar per labelled value.

use crate::blocks::chrome::{
    border, closing_border, repeat, spaces, title_box, DOUBLE_CROSS, DOUBLE_HORIZONTAL,
    DOUBLE_T_DOWN, DOUBLE_T_LEFT, DOUBLE_T_RIGHT, DOUBLE_VERTICAL, SHADE_FULL, SHADE_MEDIUM,
};
use crate::core::block::{Block, RenderContext};
use crate::core::color::{Color, TextStyle};
use crate::core::text::width::{fit_to_width, text_width};
use crate::document::DocumentTheme;
use crate::render::line::{Line, RenderedBlock, Segment};

const MIN_NAME_COLUMN: usize = 8;
const MIN_AMOUNT_COLUMN: usize = 5;
const MIN_TRACK: usize = 8;

/// A labelled value with an optional color override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSegment {
    pub label: String,
    pub color: Option<Color>,
    pub value: i64,
}

impl GraphSegment {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            color: None,
            value,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone)]
pub struct BarGraph {
    title: String,
    segments: Vec<GraphSegment>,
}

/// Column sizes for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BarLayout {
    pub name_column: usize,
    pub amount_column: usize,
    pub track: usize,
    pub max_value: i64,
}

impl BarLayout {
    pub(crate) fn compute(segments: &[GraphSegment], width: usize) -> Self {
        let name_column = segments
            .iter()
            .map(|s| text_width(&s.label) + 5)
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_COLUMN);
        let amount_column = segments
            .iter()
            .map(|s| s.value.to_string().len() + 6)
            .max()
            .unwrap_or(0)
            .max(MIN_AMOUNT_COLUMN);
        let track = width
            .saturating_sub(name_column + amount_column)
            .max(MIN_TRACK);
        let max_value = segments
            .iter()
            .map(|s| s.value)
            .max()
            .filter(|&max| max > 0)
            .unwrap_or(1);
        Self {
            name_column,
            amount_column,
            track,
            max_value,
        }
    }

    /// Bar length for `value`: proportional to `value / max`, rounded, clamped to the track.
    pub(crate) fn bar_len(&self, value: i64) -> usize {
        let scaled = value as f64 * self.track as f64 / self.max_value as f64;
        scaled.round().clamp(0.0, self.track as f64) as usize
    }

    /// `(1:N)` / `(1:≈N.NN)` when a cell stands for at least one unit, else `(N:1)` / `(≈N.NN:1)`.
    pub(crate) fn ratio_label(&self) -> String {
        let units_per_cell = self.max_value as f64 / self.track as f64;
        if units_per_cell >= 1.0 {
            format!("(1:{})", approx(units_per_cell))
        } else {
            format!("({}:1)", approx(self.track as f64 / self.max_value as f64))
        }
    }
}

fn approx(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("≈{trimmed}")
}

impl BarGraph {
    pub fn new(title: impl Into<String>, segments: Vec<GraphSegment>) -> Self {
        Self {
            title: title.into(),
            segments,
        }
    }

    fn rule(&self, layout: &BarLayout, junction: char, theme: &DocumentTheme) -> Line {
        Line::new(vec![border(
            format!(
                "{DOUBLE_T_LEFT}{}{junction}{}{DOUBLE_T_RIGHT}",
                repeat(DOUBLE_HORIZONTAL, layout.name_column.saturating_sub(2)),
                repeat(
                    DOUBLE_HORIZONTAL,
                    (layout.track + layout.amount_column).saturating_sub(1)
                ),
            ),
            theme,
        )])
    }
}

impl Block for BarGraph {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let theme = ctx.theme;
        let layout = BarLayout::compute(&self.segments, ctx.width);
        let amount_header = format!("Amount {}", layout.ratio_label());
        let value_span = layout.track + layout.amount_column;

        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, ctx.width, theme));
        block.push(self.rule(&layout, DOUBLE_T_DOWN, theme));
        block.push(Line::new(vec![
            border(DOUBLE_VERTICAL.to_string(), theme),
            Segment::new(format!(
                " {}",
                fit_to_width("Type", layout.name_column.saturating_sub(3))
            ))
            .fg(theme.text),
            border(DOUBLE_VERTICAL.to_string(), theme),
            Segment::new(format!(" {amount_header}")).fg(theme.text),
            Segment::new(spaces(
                value_span.saturating_sub(text_width(&amount_header) + 2),
            )),
            border(DOUBLE_VERTICAL.to_string(), theme),
        ]));
        block.push(self.rule(&layout, DOUBLE_CROSS, theme));

        for (idx, segment) in self.segments.iter().enumerate() {
            let glyph = if theme.alternate_bar_graph_colors && idx % 2 == 1 {
                SHADE_MEDIUM
            } else {
                SHADE_FULL
            };
            let bar_len = layout.bar_len(segment.value);
            let amount = format!("({})", segment.value);
            let gap = (layout.track - bar_len)
                + layout
                    .amount_column
                    .saturating_sub(text_width(&amount) + 4);
            block.push(Line::new(vec![
                border(DOUBLE_VERTICAL.to_string(), theme),
                Segment::new(" "),
                Segment::styled(segment.label.clone(), theme.text, TextStyle::BOLD),
                Segment::new(spaces(
                    layout
                        .name_column
                        .saturating_sub(text_width(&segment.label) + 3),
                )),
                border(DOUBLE_VERTICAL.to_string(), theme),
                Segment::new(" "),
                Segment::new(repeat(glyph, bar_len)).fg(segment.color.unwrap_or(theme.bar_graph)),
                Segment::new(" "),
                Segment::new(spaces(gap)),
                Segment::new(amount).fg(theme.text),
                Segment::new(" "),
                border(DOUBLE_VERTICAL.to_string(), theme),
            ]));
        }

        block.push(closing_border(ctx.width, theme));
        block
    }
}

#[cfg(test)]
mod tests {
    use super::{BarGraph, BarLayout, GraphSegment};
    use crate::core::block::{Block, RenderContext};
    use crate::document::DocumentTheme;

    fn segments(values: &[i64]) -> Vec<GraphSegment> {
        values
            .iter()
            .enumerate()
            .map(|(idx, &v)| GraphSegment::new(format!("s{idx}"), v))
            .collect()
    }

    #[test]
    fn largest_value_fills_the_track() {
        let segs = segments(&[30, 30, 30, 500, 30]);
        let layout = BarLayout::compute(&segs, 100);
        assert_eq!(layout.name_column, 8);
        assert_eq!(layout.amount_column, 9);
        assert_eq!(layout.track, 83);
        assert_eq!(layout.bar_len(500), 83);
        assert_eq!(layout.bar_len(30), 5);
        assert_eq!(layout.ratio_label(), "(1:≈6.02)");
    }

    #[test]
    fn ratio_label_flips_below_one_unit_per_cell() {
        let layout = BarLayout::compute(&segments(&[10]), 60);
        assert_eq!(layout.track, 60 - 8 - 8);
        assert_eq!(layout.ratio_label(), "(≈4.4:1)");

        let layout = BarLayout::compute(&segments(&[44]), 60);
        assert_eq!(layout.ratio_label(), "(1:1)");
    }

    #[test]
    fn zero_and_negative_values_draw_empty_bars() {
        let layout = BarLayout::compute(&segments(&[0, -4]), 60);
        assert_eq!(layout.max_value, 1);
        assert_eq!(layout.bar_len(0), 0);
        assert_eq!(layout.bar_len(-4), 0);
    }

    #[test]
    fn rows_fill_the_document_width() {
        let theme = DocumentTheme::default();
        let mut graph = BarGraph::new("Sizes", segments(&[30, 30, 30, 500, 30]));
        let rendered = graph.render(&RenderContext::new(100, &theme));
        assert_eq!(rendered.len(), 2 + 3 + 5 + 1);
        for line in rendered.lines() {
            assert_eq!(line.width(), 100, "{}", line.plain_text());
        }
        assert!(rendered.plain_lines()[3].contains("Amount (1:≈6.02)"));
    }

    #[test]
    fn alternating_glyphs_when_enabled() {
        let theme = DocumentTheme {
            alternate_bar_graph_colors: true,
            ..DocumentTheme::default()
        };
        let mut graph = BarGraph::new("Sizes", segments(&[10, 10]));
        let lines = graph.render(&RenderContext::new(60, &theme)).plain_lines();
        assert!(lines[5].contains('█'));
        assert!(lines[6].contains('▒'));
    }
}
