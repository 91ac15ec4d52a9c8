//! Cursor-tracked output surface for documents and the live region.
//!
//! Rows are counted from the first row this screen wrote to. Repaints move the
//! cursor relatively, so content above the first row is never touched.

use std::io;

use crate::core::layout::Dimensions;
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::Terminal;
use crate::render::line::Line;
use crate::render::sgr::{encode_line, ColorMode};

/// Encode `line` clipped and padded to exactly `width` columns.
pub(crate) fn encode_row(line: &Line, width: usize, mode: ColorMode) -> String {
    encode_line(&line.fitted(width), mode)
}

pub struct Screen {
    terminal: Box<dyn Terminal + Send>,
    gate: OutputGate,
    color_mode: ColorMode,
    cursor_row: usize,
    bottom_row: usize,
}

impl Screen {
    pub fn new(terminal: Box<dyn Terminal + Send>, color_mode: ColorMode) -> Self {
        Self {
            terminal,
            gate: OutputGate::new(),
            color_mode,
            cursor_row: 0,
            bottom_row: 0,
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    pub fn columns(&self) -> usize {
        usize::from(self.terminal.columns()).max(1)
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// First row below everything written so far.
    pub fn bottom_row(&self) -> usize {
        self.bottom_row
    }

    fn move_to_row(&mut self, row: usize) {
        if row < self.cursor_row {
            self.gate.push(TerminalCmd::MoveUp(self.cursor_row - row));
        } else if row > self.cursor_row {
            self.gate.push(TerminalCmd::MoveDown(row - self.cursor_row));
        }
        self.cursor_row = row;
    }

    /// Append lines below existing output, each clipped to `width` and the terminal.
    pub fn write_static(&mut self, lines: &[Line], width: usize) {
        self.park();
        let width = width.min(self.columns());
        for line in lines {
            let encoded = encode_row(line, width, self.color_mode);
            self.gate.push(TerminalCmd::Bytes(encoded));
            self.gate.push(TerminalCmd::NewLine);
        }
        self.bottom_row += lines.len();
        self.cursor_row = self.bottom_row;
    }

    /// Emit `rows` blank lines below existing output and return the first of them.
    pub fn reserve(&mut self, rows: usize) -> usize {
        self.park();
        let top = self.bottom_row;
        for _ in 0..rows {
            self.gate.push(TerminalCmd::NewLine);
        }
        self.bottom_row += rows;
        self.cursor_row = self.bottom_row;
        top
    }

    /// Overwrite `row` inside `anchor`, clipped to the anchor and the terminal width.
    pub fn paint_row(&mut self, row: usize, anchor: &Dimensions, line: &Line) {
        let columns = self.columns();
        if anchor.left >= columns || !anchor.contains_row(row) || row >= self.bottom_row {
            return;
        }
        let width = anchor.width().min(columns - anchor.left);
        self.move_to_row(row);
        self.gate.push(TerminalCmd::LineStart);
        if anchor.left > 0 {
            self.gate.push(TerminalCmd::Column(anchor.left));
        }
        let encoded = encode_row(line, width, self.color_mode);
        self.gate.push(TerminalCmd::Bytes(encoded));
    }

    /// Return the cursor to the start of the row below all output.
    pub fn park(&mut self) {
        let bottom = self.bottom_row;
        self.move_to_row(bottom);
        self.gate.push(TerminalCmd::LineStart);
    }

    pub fn hide_cursor(&mut self) {
        self.gate.push(TerminalCmd::HideCursor);
    }

    pub fn show_cursor(&mut self) {
        self.gate.push(TerminalCmd::ShowCursor);
    }

    /// Leave the cursor on a fresh line below everything written.
    pub fn finish(&mut self) {
        self.park();
        self.gate.push(TerminalCmd::NewLine);
        self.bottom_row += 1;
        self.cursor_row = self.bottom_row;
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.gate.flush(self.terminal.as_mut())
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("color_mode", &self.color_mode)
            .field("cursor_row", &self.cursor_row)
            .field("bottom_row", &self.bottom_row)
            .finish_non_exhaustive()
    }
}
