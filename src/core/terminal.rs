//! Terminal trait and lifecycle helpers.

/// Minimal terminal interface used by documents and live loops.
pub trait Terminal {
    /// Enter interactive mode with input and resize handlers.
    ///
    /// Only the full-screen session starts the terminal; live regions write to a
    /// terminal that was never started.
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()>;

    /// Leave interactive mode and restore state.
    fn stop(&mut self) -> std::io::Result<()>;

    /// Drain stdin before exiting to prevent key release leakage over slow connections.
    fn drain_input(&mut self, max_ms: u64, idle_ms: u64);

    /// Write output to the terminal.
    fn write(&mut self, data: &str) -> std::io::Result<()>;

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}

/// RAII guard that drains input and stops a started terminal on drop.
pub struct TerminalGuard<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
    max_drain_ms: u64,
    idle_drain_ms: u64,
}

impl<'a, T: Terminal + ?Sized> TerminalGuard<'a, T> {
    /// Start `terminal` and guard it with default drain timings (max 200ms, idle 30ms).
    pub fn start(
        terminal: &'a mut T,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<Self> {
        terminal.start(on_input, on_resize)?;
        Ok(Self {
            terminal,
            max_drain_ms: 200,
            idle_drain_ms: 30,
        })
    }

    /// Access the wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut *self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for TerminalGuard<'_, T> {
    fn drop(&mut self) {
        self.terminal
            .drain_input(self.max_drain_ms, self.idle_drain_ms);
        if let Err(err) = self.terminal.stop() {
            tracing::debug!(error = %err, "terminal stop failed during cleanup");
        }
    }
}
