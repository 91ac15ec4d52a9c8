//! DividedBarGraph block: one bar split into proportional coloured parts plus a legend.

use crate::blocks::bar_graph::GraphSegment;
use crate::blocks::chrome::{
    border, closing_border, divider, repeat, spaces, title_box, DOUBLE_VERTICAL, SHADE_FULL,
};
use crate::core::block::{Block, RenderContext};
use crate::core::text::width::text_width;
use crate::render::line::{Line, RenderedBlock, Segment};

const LEGEND_GLYPH: &str = "■";

#[derive(Debug, Clone)]
pub struct DividedBarGraph {
    title: String,
    segments: Vec<GraphSegment>,
}

impl DividedBarGraph {
    pub fn new(title: impl Into<String>, segments: Vec<GraphSegment>) -> Self {
        Self {
            title: title.into(),
            segments,
        }
    }
}

/// Split `track` cells between `values` proportionally; the result always sums to
/// `track` when the total is positive.
///
/// Every value starts at the floor of its exact share. The cells left over go
/// one each to the largest remainders, earlier values first on ties, so a
/// larger value never gets fewer cells than a smaller one. Negative values
/// count as zero.
pub fn partition_track(values: &[i64], track: usize) -> Vec<usize> {
    let weights: Vec<i128> = values.iter().map(|&v| i128::from(v.max(0))).collect();
    let total: i128 = weights.iter().sum();
    if total <= 0 || track == 0 {
        return vec![0; values.len()];
    }

    let track_cells = track as i128;
    let mut lengths: Vec<usize> = weights
        .iter()
        .map(|&w| (w * track_cells / total) as usize)
        .collect();
    let remainders: Vec<i128> = weights.iter().map(|&w| w * track_cells % total).collect();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]).then(a.cmp(&b)));

    let leftover = track - lengths.iter().sum::<usize>();
    for &idx in order.iter().take(leftover) {
        lengths[idx] += 1;
    }
    lengths
}

/// `100 * value / total` rounded to one decimal, without a trailing `.0`.
fn share_label(value: i64, total: f64) -> String {
    let pct = (1000.0 * value as f64 / total).round() / 10.0;
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        format!("{pct:.1}")
    }
}

impl Block for DividedBarGraph {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let width = ctx.width;
        let theme = ctx.theme;
        let track = width.saturating_sub(4);

        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, width, theme));
        block.push(divider(width, theme));

        let total: f64 = self.segments.iter().map(|s| s.value.max(0) as f64).sum();
        if total <= 0.0 || track == 0 {
            block.push(Line::new(vec![
                border(DOUBLE_VERTICAL.to_string(), theme),
                Segment::new(spaces(track + 2)),
                border(DOUBLE_VERTICAL.to_string(), theme),
            ]));
            block.push(closing_border(width, theme));
            return block;
        }

        let values: Vec<i64> = self.segments.iter().map(|s| s.value).collect();
        let lengths = partition_track(&values, track);
        let mut bar = Line::new(vec![
            border(DOUBLE_VERTICAL.to_string(), theme),
            Segment::new(" "),
        ]);
        for (segment, &len) in self.segments.iter().zip(&lengths) {
            if len > 0 {
                bar.push(
                    Segment::new(repeat(SHADE_FULL, len))
                        .fg(segment.color.unwrap_or(theme.bar_graph)),
                );
            }
        }
        bar.push(Segment::new(" "));
        bar.push(border(DOUBLE_VERTICAL.to_string(), theme));
        block.push(bar);

        let mut rows: Vec<Vec<(String, &GraphSegment)>> = Vec::new();
        let mut current: Vec<(String, &GraphSegment)> = Vec::new();
        let mut row_width = 0;
        for segment in &self.segments {
            let item = format!(
                "{LEGEND_GLYPH} {} {}% ",
                segment.label,
                share_label(segment.value.max(0), total)
            );
            let item_width = text_width(&item);
            if row_width + item_width > track && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                row_width = 0;
            }
            row_width += item_width;
            current.push((item, segment));
        }
        if !current.is_empty() {
            rows.push(current);
        }

        for row in rows {
            let mut line = Line::new(vec![
                border(DOUBLE_VERTICAL.to_string(), theme),
                Segment::new(" "),
            ]);
            let mut used = 2;
            for (item, segment) in row {
                used += text_width(&item);
                line.push(Segment::new(item).fg(segment.color.unwrap_or(theme.bar_graph)));
            }
            line.push(Segment::new(spaces(width.saturating_sub(used + 1))));
            line.push(border(DOUBLE_VERTICAL.to_string(), theme));
            block.push(line);
        }

        block.push(closing_border(width, theme));
        block
    }
}
