//! Bottom-anchored live region: one background loop repainting registered blocks.
//!
//! Each tick the loop snapshots the participants, orders them by anchor top,
//! asks every block for its next frame and repaints only the returned rows.
//! The loop exits on its own once every participant reports completion, or
//! when [`LiveRegionRenderer::stop`] cancels it. Participants stay registered
//! until `stop`.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::core::block::{lock_block, LiveFrame, SharedBlock};
use crate::core::layout::Dimensions;
use crate::core::terminal::Terminal;
use crate::render::sgr::ColorMode;
use crate::runtime::cancel::CancelSignal;
use crate::runtime::screen::Screen;

#[derive(Clone)]
struct Participant {
    block: SharedBlock,
    anchor: Dimensions,
}

enum LoopState {
    Idle,
    Running {
        handle: JoinHandle<()>,
        cancel: CancelSignal,
    },
}

pub struct LiveRegionRenderer {
    screen: Arc<Mutex<Screen>>,
    participants: Arc<Mutex<Vec<Participant>>>,
    state: Mutex<LoopState>,
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn same_block(a: &SharedBlock, b: &SharedBlock) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// Ask a block for its next frame. A block that panics or lost its live behavior is done.
pub(crate) fn next_frame(block: &SharedBlock) -> LiveFrame {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut guard = lock_block(block);
        guard.as_live().map(|live| live.next_frame())
    }));
    match outcome {
        Ok(Some(frame)) => frame,
        Ok(None) => LiveFrame::finished(),
        Err(_) => {
            tracing::warn!("live block panicked while building a frame");
            LiveFrame::finished()
        }
    }
}

impl LiveRegionRenderer {
    pub fn new(terminal: Box<dyn Terminal + Send>, color_mode: ColorMode) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::new(terminal, color_mode))),
            participants: Arc::new(Mutex::new(Vec::new())),
            state: Mutex::new(LoopState::Idle),
        }
    }

    /// The process-wide renderer bound to the controlling terminal.
    pub fn process() -> &'static LiveRegionRenderer {
        static PROCESS: Lazy<LiveRegionRenderer> = Lazy::new(|| {
            LiveRegionRenderer::new(
                Box::new(crate::platform::ProcessTerminal::new()),
                ColorMode::detect(true),
            )
        });
        &PROCESS
    }

    /// Exclusive access to the output surface.
    pub fn screen(&self) -> MutexGuard<'_, Screen> {
        lock(&self.screen)
    }

    /// Attach `anchor` to a live block and add it to the next tick.
    ///
    /// Registering a block twice replaces its anchor. Blocks without live
    /// behavior are ignored.
    pub fn register(&self, block: SharedBlock, anchor: Dimensions) {
        {
            let mut guard = lock_block(&block);
            match guard.as_live() {
                Some(live) => live.attach_anchor(anchor),
                None => return,
            }
        }
        let mut participants = lock(&self.participants);
        match participants.iter_mut().find(|p| same_block(&p.block, &block)) {
            Some(existing) => existing.anchor = anchor,
            None => participants.push(Participant { block, anchor }),
        }
    }

    pub fn participant_count(&self) -> usize {
        lock(&self.participants).len()
    }

    pub fn is_running(&self) -> bool {
        matches!(&*lock(&self.state), LoopState::Running { handle, .. } if !handle.is_finished())
    }

    /// Spawn the refresh loop unless one is already running.
    ///
    /// A loop that already exited because everything completed is replaced.
    /// Returns whether a new loop was started.
    pub fn start_if_needed(&self, interval: Duration) -> io::Result<bool> {
        let mut state = lock(&self.state);
        if let LoopState::Running { handle, .. } = &*state {
            if !handle.is_finished() {
                return Ok(false);
            }
        }
        if let LoopState::Running { handle, .. } = std::mem::replace(&mut *state, LoopState::Idle) {
            if handle.join().is_err() {
                tracing::warn!("previous live loop panicked");
            }
        }

        let cancel = CancelSignal::new();
        let handle = {
            let screen = Arc::clone(&self.screen);
            let participants = Arc::clone(&self.participants);
            let cancel = cancel.clone();
            thread::Builder::new()
                .name("console-doc-live".to_string())
                .spawn(move || run_loop(&screen, &participants, &cancel, interval))?
        };
        tracing::debug!(interval_ms = interval.as_millis() as u64, "live loop started");
        *state = LoopState::Running { handle, cancel };
        Ok(true)
    }

    /// Cancel the loop, wait for it, forget all participants and leave the
    /// cursor on a fresh line below the region. Calling it again is a no-op.
    pub fn stop(&self) -> io::Result<()> {
        let previous = std::mem::replace(&mut *lock(&self.state), LoopState::Idle);
        let was_running = match previous {
            LoopState::Running { handle, cancel } => {
                cancel.cancel();
                if handle.join().is_err() {
                    tracing::warn!("live loop panicked");
                }
                true
            }
            LoopState::Idle => false,
        };
        let had_participants = {
            let mut participants = lock(&self.participants);
            let had = !participants.is_empty();
            participants.clear();
            had
        };
        if !was_running && !had_participants {
            return Ok(());
        }

        tracing::debug!("live region stopped");
        let mut screen = lock(&self.screen);
        screen.show_cursor();
        screen.finish();
        screen.flush()
    }

    /// Block until the loop finishes on its own, then clean up like [`stop`](Self::stop).
    pub fn wait(&self) -> io::Result<()> {
        let previous = std::mem::replace(&mut *lock(&self.state), LoopState::Idle);
        if let LoopState::Running { handle, .. } = previous {
            if handle.join().is_err() {
                tracing::warn!("live loop panicked");
            }
        }
        self.stop()
    }
}

impl Drop for LiveRegionRenderer {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::debug!(error = %err, "live region cleanup failed");
        }
    }
}

fn run_loop(
    screen: &Mutex<Screen>,
    participants: &Mutex<Vec<Participant>>,
    cancel: &CancelSignal,
    interval: Duration,
) {
    {
        let mut screen = lock(screen);
        screen.hide_cursor();
        if let Err(err) = screen.flush() {
            tracing::warn!(error = %err, "failed to hide cursor");
        }
    }

    let mut ticks: u64 = 0;
    loop {
        let mut snapshot: Vec<Participant> = lock(participants).clone();
        snapshot.sort_by_key(|p| p.anchor.top);

        let frames: Vec<(Dimensions, LiveFrame)> = snapshot
            .iter()
            .map(|p| (p.anchor, next_frame(&p.block)))
            .collect();
        let active = frames.iter().filter(|(_, frame)| !frame.completed).count();

        {
            let mut screen = lock(screen);
            for (anchor, frame) in &frames {
                for (rel, line) in &frame.rows {
                    if *rel < anchor.height() {
                        screen.paint_row(anchor.row(*rel), anchor, line);
                    }
                }
            }
            screen.park();
            if let Err(err) = screen.flush() {
                tracing::warn!(error = %err, "live repaint failed");
            }
        }

        ticks += 1;
        if crate::logging::verbose_ticks() {
            tracing::trace!(tick = ticks, participants = frames.len(), active, "live tick");
        }
        if active == 0 {
            tracing::debug!(ticks, "all live blocks complete");
            break;
        }
        if cancel.wait_timeout(interval) {
            break;
        }
    }

    let mut screen = lock(screen);
    screen.show_cursor();
    if let Err(err) = screen.flush() {
        tracing::warn!(error = %err, "failed to restore cursor");
    }
}
