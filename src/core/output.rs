//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes must flow through `OutputGate::flush(..)`.

use std::fmt::Write as _;

use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Raw bytes/control sequences (UTF-8 string) to be written to the terminal.
    Bytes(String),

    /// Cursor visibility.
    HideCursor,
    ShowCursor,

    /// Relative cursor motion (no-op for zero).
    MoveUp(usize),
    MoveDown(usize),
    /// Carriage return to column 0.
    LineStart,
    /// Absolute column, 0-based.
    Column(usize),
    /// Absolute position, 0-based.
    MoveTo { row: usize, col: usize },
    /// Carriage return plus line feed.
    NewLine,
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }

    fn encode_into(&self, out: &mut String) {
        match self {
            TerminalCmd::Bytes(data) => out.push_str(data),
            TerminalCmd::HideCursor => out.push_str("\x1b[?25l"),
            TerminalCmd::ShowCursor => out.push_str("\x1b[?25h"),
            TerminalCmd::MoveUp(0) | TerminalCmd::MoveDown(0) => {}
            TerminalCmd::MoveUp(n) => {
                let _ = write!(out, "\x1b[{n}A");
            }
            TerminalCmd::MoveDown(n) => {
                let _ = write!(out, "\x1b[{n}B");
            }
            TerminalCmd::LineStart => out.push('\r'),
            TerminalCmd::Column(col) => {
                let _ = write!(out, "\x1b[{}G", col + 1);
            }
            TerminalCmd::MoveTo { row, col } => {
                let _ = write!(out, "\x1b[{};{}H", row + 1, col + 1);
            }
            TerminalCmd::NewLine => out.push_str("\r\n"),
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the terminal as a single write.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else. Commands are dropped even when the write fails.
    pub fn flush<T: Terminal + ?Sized>(&mut self, term: &mut T) -> std::io::Result<()> {
        if self.cmds.is_empty() {
            return Ok(());
        }
        let mut out = String::new();
        for cmd in self.cmds.drain(..) {
            cmd.encode_into(&mut out);
        }
        if out.is_empty() {
            return Ok(());
        }
        term.write(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputGate, TerminalCmd};
    use crate::core::terminal::Terminal;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<String>,
    }

    impl Terminal for Recorder {
        fn start(
            &mut self,
            _on_input: Box<dyn FnMut(String) + Send>,
            _on_resize: Box<dyn FnMut() + Send>,
        ) -> std::io::Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> std::io::Result<()> {
            Ok(())
        }

        fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

        fn write(&mut self, data: &str) -> std::io::Result<()> {
            self.writes.push(data.to_string());
            Ok(())
        }

        fn columns(&self) -> u16 {
            80
        }

        fn rows(&self) -> u16 {
            24
        }
    }

    #[test]
    fn flush_coalesces_into_one_write() {
        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::HideCursor);
        gate.push(TerminalCmd::MoveUp(3));
        gate.push(TerminalCmd::LineStart);
        gate.push(TerminalCmd::bytes("abc"));
        gate.push(TerminalCmd::MoveDown(0));
        gate.push(TerminalCmd::MoveTo { row: 0, col: 4 });

        let mut term = Recorder::default();
        gate.flush(&mut term).expect("flush");
        assert_eq!(term.writes, vec!["\x1b[?25l\x1b[3A\rabc\x1b[1;5H".to_string()]);
        assert!(gate.is_empty());
    }

    #[test]
    fn empty_gate_writes_nothing() {
        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::MoveUp(0));
        let mut term = Recorder::default();
        gate.flush(&mut term).expect("flush");
        assert!(term.writes.is_empty());
    }
}
