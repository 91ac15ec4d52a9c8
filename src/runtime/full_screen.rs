//! Full-screen scrollable session with in-place live updates.
//!
//! The whole document is rendered once into a virtual buffer. The terminal
//! shows a window onto that buffer plus a legend on the last row. Each tick
//! drains pending keys, scrolls, lets live blocks update the buffer, repaints
//! whichever of their rows are visible and then repaints the legend. Only
//! Escape or an external cancel ends the session.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::core::block::{lock_block, RenderContext, SharedBlock};
use crate::core::color::{Color, TextStyle};
use crate::core::input::{decode_nav_keys, NavKey};
use crate::core::layout::Dimensions;
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::{Terminal, TerminalGuard};
use crate::core::text::width::{text_width, truncate_to_width};
use crate::document::Document;
use crate::render::line::{Line, Segment};
use crate::render::sgr::ColorMode;
use crate::runtime::cancel::CancelSignal;
use crate::runtime::live_region::next_frame;
use crate::runtime::screen::encode_row;
use crate::runtime::viewport::Viewport;

pub const LEGEND: &str = "↑ pg up [Navigate up] ↓ pg dn [Navigate down]  home [Navigate top] end [Navigate bottom]  esc [Exit]";

/// The legend clipped and padded to exactly `width`; bracketed parts are inverse.
pub fn legend_line(width: usize, text: Color) -> Line {
    let mut line = Line::default();
    let mut used = 0;
    let mut rest = LEGEND;
    while !rest.is_empty() && used < width {
        let (part, inverse, tail) = match rest.strip_prefix('[') {
            Some(_) => match rest.find(']') {
                Some(end) => (&rest[..=end], true, &rest[end + 1..]),
                None => (rest, true, ""),
            },
            None => match rest.find('[') {
                Some(start) => (&rest[..start], false, &rest[start..]),
                None => (rest, false, ""),
            },
        };
        rest = tail;
        let shown = truncate_to_width(part, width - used);
        used += text_width(&shown);
        let style = if inverse {
            TextStyle::INVERSE
        } else {
            TextStyle::NONE
        };
        line.push(Segment::styled(shown, text, style));
    }
    if used < width {
        line.push(Segment::styled(" ".repeat(width - used), text, TextStyle::INVERSE));
    }
    line
}

struct LiveSlot {
    block: SharedBlock,
    anchor: Dimensions,
    done: bool,
}

pub(crate) struct FullScreenSession {
    width: usize,
    columns: usize,
    text_color: Color,
    color_mode: ColorMode,
    buffer: Vec<Line>,
    live: Vec<LiveSlot>,
    viewport: Viewport,
    gate: OutputGate,
}

impl FullScreenSession {
    pub(crate) fn new(document: &Document, screen_rows: usize, columns: usize) -> Self {
        let width = document.width();
        let ctx = RenderContext::new(width, document.theme());
        let mut buffer: Vec<Line> = Vec::new();
        let mut live = Vec::new();

        for block in document.blocks() {
            let mut guard = lock_block(block);
            let mut lines = guard.render(&ctx).into_lines();
            let top = buffer.len();
            if let Some(handle) = guard.as_live() {
                if lines.is_empty() {
                    lines.push(Line::default());
                }
                let anchor = Dimensions::with_height(0, top, width - 1, lines.len());
                handle.attach_anchor(anchor);
                live.push(LiveSlot {
                    block: Arc::clone(block),
                    anchor,
                    done: false,
                });
            }
            buffer.extend(lines);
        }

        let viewport = Viewport::new(screen_rows, buffer.len());
        Self {
            width,
            columns: columns.max(1),
            text_color: document.theme().text,
            color_mode: ColorMode::detect(document.vt_enabled()),
            buffer,
            live,
            viewport,
            gate: OutputGate::new(),
        }
    }

    fn paint_width(&self) -> usize {
        self.width.min(self.columns)
    }

    fn paint_screen_row(&mut self, row: usize, line: &Line) {
        let encoded = encode_row(line, self.paint_width(), self.color_mode);
        self.gate.push(TerminalCmd::MoveTo { row, col: 0 });
        self.gate.push(TerminalCmd::Bytes(encoded));
    }

    fn paint_viewport(&mut self) {
        let top = self.viewport.top();
        for row in 0..self.viewport.visible_rows() {
            let line = self.buffer.get(top + row).cloned().unwrap_or_default();
            self.paint_screen_row(row, &line);
        }
        self.paint_legend();
    }

    fn paint_legend(&mut self) {
        let legend = legend_line(self.paint_width(), self.text_color);
        let row = self.viewport.legend_row();
        self.paint_screen_row(row, &legend);
    }

    /// Apply one key; returns `true` for Escape.
    fn apply_key(&mut self, key: NavKey) -> bool {
        let moved = match key {
            NavKey::Escape => return true,
            NavKey::Up => self.viewport.scroll_by(-1),
            NavKey::Down => self.viewport.scroll_by(1),
            NavKey::PageUp => self.viewport.page_up(),
            NavKey::PageDown => self.viewport.page_down(),
            NavKey::Home => self.viewport.home(),
            NavKey::End => self.viewport.end(),
        };
        if moved {
            self.paint_viewport();
        }
        false
    }

    /// Poll every unfinished live block and write its rows into the buffer.
    fn tick(&mut self) {
        let mut updates = Vec::new();
        for slot in self.live.iter_mut().filter(|slot| !slot.done) {
            let frame = next_frame(&slot.block);
            slot.done = frame.completed;
            for (rel, line) in frame.rows {
                if rel < slot.anchor.height() {
                    updates.push((slot.anchor.row(rel), line));
                }
            }
        }
        for (doc_row, line) in updates {
            if let Some(row) = self.viewport.screen_row(doc_row) {
                self.paint_screen_row(row, &line);
            }
            if let Some(slot) = self.buffer.get_mut(doc_row) {
                *slot = line;
            }
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut dyn Terminal,
        input: &Mutex<VecDeque<String>>,
        resized: &AtomicBool,
        cancel: &CancelSignal,
        refresh: Duration,
    ) -> io::Result<()> {
        loop {
            if cancel.is_cancelled() {
                return Ok(());
            }

            let rows = usize::from(terminal.rows()).max(1);
            let columns = usize::from(terminal.columns()).max(1);
            if resized.swap(false, Ordering::AcqRel)
                || rows != self.viewport.screen_rows()
                || columns != self.columns
            {
                tracing::debug!(rows, columns, "full-screen resize");
                self.columns = columns;
                self.viewport.resize(rows);
                self.paint_viewport();
            }

            let chunks: Vec<String> = input
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect();
            for chunk in &chunks {
                for key in decode_nav_keys(chunk) {
                    if self.apply_key(key) {
                        tracing::debug!("escape pressed, leaving full-screen session");
                        return self.gate.flush(terminal);
                    }
                }
            }

            self.tick();
            self.paint_legend();
            self.gate.flush(terminal)?;

            if cancel.wait_timeout(refresh) {
                return Ok(());
            }
        }
    }

    pub(crate) fn run(
        mut self,
        terminal: &mut dyn Terminal,
        input: &Mutex<VecDeque<String>>,
        resized: &AtomicBool,
        cancel: &CancelSignal,
        refresh: Duration,
    ) -> io::Result<()> {
        self.gate.push(TerminalCmd::HideCursor);
        self.paint_viewport();
        let result = self
            .gate
            .flush(terminal)
            .and_then(|()| self.event_loop(terminal, input, resized, cancel, refresh));

        self.gate.clear();
        self.gate.push(TerminalCmd::ShowCursor);
        self.gate.push(TerminalCmd::MoveTo {
            row: self.viewport.legend_row(),
            col: 0,
        });
        self.gate.push(TerminalCmd::NewLine);
        if let Err(err) = self.gate.flush(terminal) {
            tracing::debug!(error = %err, "full-screen cleanup write failed");
        }
        result
    }
}

/// Start `terminal`, run a session for `document` until Escape or `cancel`, then stop it.
pub(crate) fn run(
    document: &Document,
    terminal: &mut dyn Terminal,
    refresh: Duration,
    cancel: &CancelSignal,
) -> io::Result<()> {
    let input: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
    let resized = Arc::new(AtomicBool::new(false));

    let on_input: Box<dyn FnMut(String) + Send> = {
        let input = Arc::clone(&input);
        Box::new(move |data| {
            input
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(data);
        })
    };
    let on_resize: Box<dyn FnMut() + Send> = {
        let resized = Arc::clone(&resized);
        Box::new(move || resized.store(true, Ordering::Release))
    };

    let mut guard = TerminalGuard::start(terminal, on_input, on_resize)?;
    let terminal = guard.terminal_mut();
    let session = FullScreenSession::new(
        document,
        usize::from(terminal.rows()),
        usize::from(terminal.columns()),
    );
    tracing::debug!(
        lines = session.buffer.len(),
        live = session.live.len(),
        "full-screen session started"
    );
    session.run(terminal, &input, &resized, cancel, refresh)
}

#[cfg(test)]
mod tests {
    use super::{legend_line, LEGEND};
    use crate::core::color::{Color, TextStyle};
    use crate::core::text::width::text_width;

    #[test]
    fn legend_is_exactly_the_requested_width() {
        for width in [10, 50, 99, 200] {
            assert_eq!(legend_line(width, Color::DefaultForeground).width(), width);
        }
    }

    #[test]
    fn bracketed_parts_are_inverse() {
        let line = legend_line(200, Color::DefaultForeground);
        let segments = line.segments();
        assert_eq!(segments[0].text(), "↑ pg up ");
        assert_eq!(segments[0].text_style(), TextStyle::NONE);
        assert_eq!(segments[1].text(), "[Navigate up]");
        assert_eq!(segments[1].text_style(), TextStyle::INVERSE);
        assert_eq!(segments.last().map(|s| s.text_style()), Some(TextStyle::INVERSE));
        assert!(line.plain_text().starts_with(LEGEND));
        assert_eq!(text_width(LEGEND) + segments.last().map_or(0, |s| s.width()), 200);
    }

    #[test]
    fn narrow_legend_is_clipped_without_padding() {
        let line = legend_line(12, Color::DefaultForeground);
        assert_eq!(line.plain_text(), "↑ pg up [Nav");
        assert_eq!(line.segments()[1].text_style(), TextStyle::INVERSE);
    }
}
