//! Table block: grouped, width-balanced rendering of a [`TableHierarchy`].
//!
//! Consecutive leaf records that share every key form one group. Keys only
//! appear on the first row where they (or a key to their left) change, which
//! reads as merged cells. Separators between groups start at the shallowest
//! changed column so the unchanged columns keep their vertical rules.

use crate::blocks::chrome::{
    border, closing_border, repeat, title_box, DOUBLE_BOTTOM_LEFT, DOUBLE_BOTTOM_RIGHT,
    DOUBLE_CROSS, DOUBLE_HORIZONTAL, DOUBLE_T_DOWN, DOUBLE_T_LEFT, DOUBLE_T_RIGHT, DOUBLE_T_UP,
    DOUBLE_VERTICAL,
};
use crate::blocks::table_hierarchy::{LeafRecord, TableHierarchy};
use crate::core::block::{Block, RenderContext};
use crate::core::color::TextStyle;
use crate::core::layout::distribute_widths;
use crate::core::text::width::{fit_to_width, text_width};
use crate::core::text::wrap::wrap_text;
use crate::document::DocumentTheme;
use crate::error::Result;
use crate::render::line::{Line, RenderedBlock, Segment};

#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    hierarchy: TableHierarchy,
}

impl Table {
    pub fn new(title: impl Into<String>, hierarchy: TableHierarchy) -> Self {
        Self {
            title: title.into(),
            hierarchy,
        }
    }

    /// Shorthand for [`TableHierarchy::from_rows`] plus [`Table::new`].
    pub fn from_rows<C, R>(
        title: impl Into<String>,
        columns: C,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Ok(Self::new(title, TableHierarchy::from_rows(columns, rows)?))
    }

    pub fn hierarchy(&self) -> &TableHierarchy {
        &self.hierarchy
    }
}

/// Natural widths: header, keys per depth, and leaf values, each plus two cells of padding.
fn natural_widths(hierarchy: &TableHierarchy, leaves: &[LeafRecord]) -> Vec<usize> {
    let mut widths: Vec<usize> = hierarchy
        .columns()
        .iter()
        .map(|name| text_width(name) + 2)
        .collect();
    let last = widths.len() - 1;
    for leaf in leaves {
        for (depth, key) in leaf.keys.iter().enumerate() {
            if !key.is_empty() {
                widths[depth] = widths[depth].max(text_width(key) + 2);
            }
        }
        widths[last] = widths[last].max(text_width(&leaf.value) + 2);
    }
    widths
}

/// First column where the two key paths differ.
fn change_depth(previous: &[String], current: &[String]) -> Option<usize> {
    previous
        .iter()
        .zip(current)
        .position(|(prev, cur)| prev != cur)
}

/// Whether column `col` shows its key on a row following `previous`.
fn show_key(previous: Option<&[String]>, current: &[String], col: usize) -> bool {
    match previous {
        None => true,
        Some(previous) => previous[..=col] != current[..=col],
    }
}

enum ValueLine {
    Text(String),
    Rule,
}

struct TableLayout<'a> {
    widths: Vec<usize>,
    theme: &'a DocumentTheme,
}

impl TableLayout<'_> {
    fn last(&self) -> usize {
        self.widths.len() - 1
    }

    fn cell(&self, col: usize, text: &str) -> Segment {
        Segment::new(fit_to_width(&format!(" {text}"), self.widths[col])).fg(self.theme.text)
    }

    fn junction_rule(&self, left: char, mid: char, right: char) -> Line {
        let runs: Vec<String> = self
            .widths
            .iter()
            .map(|&w| repeat(DOUBLE_HORIZONTAL, w))
            .collect();
        Line::new(vec![border(
            format!("{left}{}{right}", runs.join(&mid.to_string())),
            self.theme,
        )])
    }

    fn header_row(&self, columns: &[String]) -> Line {
        let mut line = Line::new(vec![border(DOUBLE_VERTICAL.to_string(), self.theme)]);
        for (col, name) in columns.iter().enumerate() {
            line.push(
                Segment::new(fit_to_width(&format!(" {name}"), self.widths[col]))
                    .fg(self.theme.text)
                    .style(TextStyle::BOLD),
            );
            line.push(border(DOUBLE_VERTICAL.to_string(), self.theme));
        }
        line
    }

    /// A rule starting at column `depth` and running to the right edge.
    ///
    /// Columns left of `depth` keep their content (`cells`, or blanks) and their
    /// vertical rules, except the one `╠` replaces. Depth 0 is a full-width rule.
    fn rule_from(&self, depth: usize, cells: Option<&[String]>) -> Line {
        let mut line = Line::default();
        if depth > 0 {
            line.push(border(DOUBLE_VERTICAL.to_string(), self.theme));
            for col in 0..depth {
                let text = cells.and_then(|c| c.get(col)).map_or("", String::as_str);
                line.push(self.cell(col, text));
                if col + 1 != depth {
                    line.push(border(DOUBLE_VERTICAL.to_string(), self.theme));
                }
            }
        }
        let mut rule = String::new();
        rule.push(DOUBLE_T_LEFT);
        rule.push_str(&repeat(DOUBLE_HORIZONTAL, self.widths[depth]));
        for &w in &self.widths[depth + 1..] {
            rule.push(DOUBLE_CROSS);
            rule.push_str(&repeat(DOUBLE_HORIZONTAL, w));
        }
        rule.push(DOUBLE_T_RIGHT);
        line.push(border(rule, self.theme));
        line
    }

    fn content_row(&self, cells: &[String], value: &str) -> Line {
        let mut line = Line::new(vec![border(DOUBLE_VERTICAL.to_string(), self.theme)]);
        for (col, text) in cells.iter().enumerate() {
            line.push(self.cell(col, text));
            line.push(border(DOUBLE_VERTICAL.to_string(), self.theme));
        }
        line.push(self.cell(self.last(), value));
        line.push(border(DOUBLE_VERTICAL.to_string(), self.theme));
        line
    }

    fn wrap_width(&self, col: usize) -> usize {
        self.widths[col].saturating_sub(1).max(1)
    }

    fn body(&self, leaves: &[LeafRecord], block: &mut RenderedBlock) {
        let last = self.last();
        let mut previous: Option<&[String]> = None;
        let mut suppress_leading_rule = false;
        let mut start = 0;

        while start < leaves.len() {
            let keys = leaves[start].keys.as_slice();
            if let Some(prev) = previous {
                if suppress_leading_rule {
                    suppress_leading_rule = false;
                } else {
                    let depth = change_depth(prev, keys).unwrap_or(last);
                    block.push(self.rule_from(depth, None));
                }
            }

            let mut end = start;
            while end + 1 < leaves.len() && leaves[end + 1].keys == leaves[start].keys {
                end += 1;
            }

            let key_lines: Vec<Vec<String>> = (0..last)
                .map(|col| {
                    if show_key(previous, keys, col) {
                        wrap_text(&keys[col], self.wrap_width(col))
                    } else {
                        Vec::new()
                    }
                })
                .collect();

            let mut value_lines = Vec::new();
            for (idx, leaf) in leaves[start..=end].iter().enumerate() {
                if idx > 0 {
                    value_lines.push(ValueLine::Rule);
                }
                value_lines.extend(
                    wrap_text(&leaf.value, self.wrap_width(last))
                        .into_iter()
                        .map(ValueLine::Text),
                );
            }

            let total = key_lines
                .iter()
                .map(Vec::len)
                .max()
                .unwrap_or(0)
                .max(value_lines.len());
            let next_change = leaves
                .get(end + 1)
                .and_then(|next| change_depth(keys, &next.keys))
                .filter(|&depth| depth > 0);

            for row in 0..total {
                let cells: Vec<String> = key_lines
                    .iter()
                    .map(|lines| lines.get(row).cloned().unwrap_or_default())
                    .collect();
                let line = match value_lines.get(row) {
                    Some(ValueLine::Rule) => self.rule_from(last, Some(&cells)),
                    Some(ValueLine::Text(text)) => self.content_row(&cells, text),
                    None => {
                        // The next group's separator can share this trailing row when
                        // nothing from the changed depth rightward is still being drawn.
                        let inline_depth = next_change.filter(|&depth| {
                            row + 1 == total
                                && key_lines[depth..].iter().all(|lines| lines.len() <= row)
                        });
                        match inline_depth {
                            Some(depth) => {
                                suppress_leading_rule = true;
                                self.rule_from(depth, Some(&cells))
                            }
                            None => self.content_row(&cells, ""),
                        }
                    }
                };
                block.push(line);
            }

            previous = Some(keys);
            start = end + 1;
        }
    }
}

impl Block for Table {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let theme = ctx.theme;
        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, ctx.width, theme));

        let columns = self.hierarchy.columns();
        if columns.len() < 2 {
            block.push(closing_border(ctx.width, theme));
            return block;
        }

        let leaves = self.hierarchy.leaves();
        let budget = ctx.width.saturating_sub(2 + columns.len() - 1);
        let layout = TableLayout {
            widths: distribute_widths(&natural_widths(&self.hierarchy, &leaves), budget),
            theme,
        };

        block.push(layout.junction_rule(DOUBLE_T_LEFT, DOUBLE_T_DOWN, DOUBLE_T_RIGHT));
        block.push(layout.header_row(columns));
        block.push(layout.junction_rule(DOUBLE_T_LEFT, DOUBLE_CROSS, DOUBLE_T_RIGHT));
        layout.body(&leaves, &mut block);
        block.push(layout.junction_rule(DOUBLE_BOTTOM_LEFT, DOUBLE_T_UP, DOUBLE_BOTTOM_RIGHT));

        tracing::trace!(
            columns = columns.len(),
            leaves = leaves.len(),
            lines = block.len(),
            "rendered table"
        );
        block
    }
}

#[cfg(test)]
mod tests {
    use super::{change_depth, show_key, Table};
    use crate::core::block::{Block, RenderContext};
    use crate::document::DocumentTheme;
    use pretty_assertions::assert_eq;

    fn render(table: &mut Table, width: usize) -> Vec<String> {
        let theme = DocumentTheme::default();
        table.render(&RenderContext::new(width, &theme)).plain_lines()
    }

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn change_depth_and_key_visibility() {
        let a = keys(&["a", "x"]);
        let b = keys(&["a", "y"]);
        let c = keys(&["b", "x"]);
        assert_eq!(change_depth(&a, &b), Some(1));
        assert_eq!(change_depth(&a, &c), Some(0));
        assert_eq!(change_depth(&a, &a), None);

        assert!(show_key(None, &a, 0));
        assert!(!show_key(Some(&a), &b, 0));
        assert!(show_key(Some(&a), &b, 1));
        // A change on the left re-shows keys to its right even when they repeat.
        assert!(show_key(Some(&a), &c, 1));
    }

    #[test]
    fn three_level_groups_merge_and_separate_from_changed_depth() {
        let mut table = Table::from_rows(
            "Disks",
            ["K1", "K2", "V"],
            [["A", "X", "1"], ["A", "X", "2"], ["A", "Y", "3"]],
        )
        .expect("valid rows");
        let lines = render(&mut table, 50);

        let (w0, w1, w2) = (16, 16, 14);
        let h = |n: usize| "═".repeat(n);
        let s = |n: usize| " ".repeat(n);
        let cell = |text: &str, n: usize| format!(" {text}{}", s(n - 1 - text.len()));

        let expected = vec![
            format!("╔{}╗", h(48)),
            format!("║ [+] Disks{}║", s(38)),
            format!("╠{}╦{}╦{}╣", h(w0), h(w1), h(w2)),
            format!("║{}║{}║{}║", cell("K1", w0), cell("K2", w1), cell("V", w2)),
            format!("╠{}╬{}╬{}╣", h(w0), h(w1), h(w2)),
            format!("║{}║{}║{}║", cell("A", w0), cell("X", w1), cell("1", w2)),
            format!("║{}║{}╠{}╣", s(w0), s(w1), h(w2)),
            format!("║{}║{}║{}║", s(w0), s(w1), cell("2", w2)),
            format!("║{}╠{}╬{}╣", s(w0), h(w1), h(w2)),
            format!("║{}║{}║{}║", s(w0), cell("Y", w1), cell("3", w2)),
            format!("╚{}╩{}╩{}╝", h(w0), h(w1), h(w2)),
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn four_columns_separate_at_each_changed_depth() {
        let mut table = Table::from_rows(
            "Hosts",
            ["R", "H", "M", "U"],
            [["e", "w1", "/", "1"], ["e", "w2", "/", "2"], ["u", "w3", "/", "3"]],
        )
        .expect("valid rows");
        let lines = render(&mut table, 60);

        let (w0, w1, w2, w3) = (14, 15, 13, 13);
        let h = |n: usize| "═".repeat(n);
        let s = |n: usize| " ".repeat(n);
        let cell = |text: &str, n: usize| format!(" {text}{}", s(n - 1 - text.len()));
        let row = |a: &str, b: &str, c: &str, d: &str| {
            format!(
                "║{}║{}║{}║{}║",
                if a.is_empty() { s(w0) } else { cell(a, w0) },
                cell(b, w1),
                cell(c, w2),
                cell(d, w3)
            )
        };

        let expected = vec![
            format!("╔{}╗", h(58)),
            format!("║ [+] Hosts{}║", s(48)),
            format!("╠{}╦{}╦{}╦{}╣", h(w0), h(w1), h(w2), h(w3)),
            row("R", "H", "M", "U"),
            format!("╠{}╬{}╬{}╬{}╣", h(w0), h(w1), h(w2), h(w3)),
            row("e", "w1", "/", "1"),
            format!("║{}╠{}╬{}╬{}╣", s(w0), h(w1), h(w2), h(w3)),
            row("", "w2", "/", "2"),
            format!("╠{}╬{}╬{}╬{}╣", h(w0), h(w1), h(w2), h(w3)),
            row("u", "w3", "/", "3"),
            format!("╚{}╩{}╩{}╩{}╝", h(w0), h(w1), h(w2), h(w3)),
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn two_level_groups_use_full_width_rules() {
        let mut table = Table::from_rows(
            "Pairs",
            ["Key", "Value"],
            [["a", "1"], ["a", "2"], ["b", "3"]],
        )
        .expect("valid rows");
        let lines = render(&mut table, 60);
        for line in &lines {
            assert_eq!(crate::core::text::width::text_width(line), 60, "{line}");
        }
        // header (5) + group a (3) + rule + group b (1) + bottom
        assert_eq!(lines.len(), 11);
        assert!(lines[6].starts_with("║ "));
        assert!(lines[6].contains('╠'));
        assert!(lines[8].starts_with('╠'));
        assert!(lines[9].contains(" b"));
    }

    #[test]
    fn trailing_key_row_carries_the_next_separator() {
        let long = "alpha beta gamma delta epsilon zeta eta theta";
        let mut table = Table::from_rows(
            "Wrapped",
            ["K1", "K2", "V"],
            [[long, "x", "1"], [long, "y", "2"]],
        )
        .expect("valid rows");
        let lines = render(&mut table, 50);

        let (w0, w1, w2) = (39, 4, 3);
        let h = |n: usize| "═".repeat(n);
        let pad = |text: &str, n: usize| format!("{text}{}", " ".repeat(n - text.chars().count()));

        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[5],
            format!(
                "║{}║{}║{}║",
                pad(" alpha beta gamma delta epsilon zeta", w0),
                pad(" x", w1),
                pad(" 1", w2)
            )
        );
        assert_eq!(
            lines[6],
            format!("║{}╠{}╬{}╣", pad(" eta theta", w0), h(w1), h(w2))
        );
        // No second rule before the next group.
        assert_eq!(
            lines[7],
            format!("║{}║{}║{}║", " ".repeat(w0), pad(" y", w1), pad(" 2", w2))
        );
        assert_eq!(lines[8], format!("╚{}╩{}╩{}╝", h(w0), h(w1), h(w2)));
    }

    #[test]
    fn inline_rule_is_skipped_when_changed_column_still_has_text() {
        let mut table = Table::from_rows(
            "Wrapped",
            ["K1", "K2", "V"],
            [
                ["a", "alpha beta gamma delta epsilon zeta eta theta", "1"],
                ["a", "short", "2"],
            ],
        )
        .expect("valid rows");
        let lines = render(&mut table, 50);
        let body = &lines[5..lines.len() - 1];
        let rules: Vec<&String> = body.iter().filter(|l| l.contains('╠')).collect();
        assert_eq!(rules.len(), 1, "{body:#?}");
        assert!(body.iter().any(|l| l.contains(" short")));
        for line in &lines {
            assert_eq!(crate::core::text::width::text_width(line), 50, "{line}");
        }
    }

    #[test]
    fn fewer_than_two_columns_render_title_and_border() {
        let mut table = Table::from_rows("Solo", ["Only"], [["x"]]).expect("valid rows");
        let lines = render(&mut table, 50);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with('╚'));
    }

    #[test]
    fn empty_table_closes_after_header() {
        let mut table =
            Table::from_rows("Empty", ["A", "B"], Vec::<Vec<&str>>::new()).expect("no rows");
        let lines = render(&mut table, 50);
        assert_eq!(lines.len(), 6);
        assert!(lines[4].starts_with('╠'));
        assert!(lines[5].starts_with('╚') && lines[5].contains('╩'));
    }

    #[test]
    fn every_row_fills_the_document_width() {
        let mut table = Table::from_rows(
            "Mixed",
            ["Region", "Host", "Mount", "Usage"],
            [
                ["eu-west", "web-01", "/", "41%"],
                ["eu-west", "web-01", "/var", "77%"],
                ["eu-west", "db-01", "/data", "92%"],
                ["us-east", "web-02", "/", "12%"],
                ["us-east", "web-02", "/", "13%"],
            ],
        )
        .expect("valid rows");
        for width in [50, 73, 120, 200] {
            for line in render(&mut table, width) {
                assert_eq!(crate::core::text::width::text_width(&line), width, "{line}");
            }
        }
    }
}
