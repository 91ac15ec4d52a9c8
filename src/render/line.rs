//! Typed render model: segments, lines, and rendered blocks.
//!
//! Blocks lay out content into this model; only the painter turns it into escape
//! sequences.

use crate::core::color::{Color, TextStyle};
use crate::core::text::width::{text_width, truncate_to_width};

/// A run of text sharing one foreground/background color and style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    text: String,
    fg: Color,
    bg: Color,
    style: TextStyle,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: Color::DefaultForeground,
            bg: Color::DefaultBackground,
            style: TextStyle::NONE,
        }
    }

    pub fn styled(text: impl Into<String>, fg: Color, style: TextStyle) -> Self {
        Self::new(text).fg(fg).style(style)
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn foreground(&self) -> Color {
        self.fg
    }

    pub fn background(&self) -> Color {
        self.bg
    }

    pub fn text_style(&self) -> TextStyle {
        self.style
    }

    pub fn width(&self) -> usize {
        text_width(&self.text)
    }

    fn with_text(&self, text: String) -> Self {
        Self {
            text,
            fg: self.fg,
            bg: self.bg,
            style: self.style,
        }
    }
}

/// A single rendered line: an ordered sequence of segments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Segment::new(text)])
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }

    /// Concatenated text without styling.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Clip to `width` columns and pad the remainder with plain spaces.
    pub fn fitted(&self, width: usize) -> Line {
        let mut out = Line::default();
        let mut used = 0;
        for segment in &self.segments {
            if used >= width {
                break;
            }
            let remaining = width - used;
            let seg_width = segment.width();
            if seg_width <= remaining {
                used += seg_width;
                out.push(segment.clone());
            } else {
                let clipped = truncate_to_width(segment.text(), remaining);
                used += text_width(&clipped);
                out.push(segment.with_text(clipped));
                break;
            }
        }
        if used < width {
            out.push(Segment::new(" ".repeat(width - used)));
        }
        out
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// The lines a block produced for one render.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderedBlock {
    lines: Vec<Line>,
}

impl RenderedBlock {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = Line>,
    {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// Plain text of every line, for assertions and logs.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain_text).collect()
    }
}

impl From<Vec<Line>> for RenderedBlock {
    fn from(lines: Vec<Line>) -> Self {
        Self::new(lines)
    }
}
