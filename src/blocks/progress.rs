//! ProgressBar block and its live state machine.
//!
//! The bar pulls a [`ProgressState`] from a [`ProgressSource`] every tick and
//! asks a [`WorkCompletion`] whether the tracked work has finished. While the
//! work runs, the displayed percent never goes backwards; once it finishes the
//! bar locks at 100%.

use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::blocks::chrome::{
    border, closing_border, divider, repeat, title_box, DOUBLE_VERTICAL, SHADE_FULL, SHADE_LIGHT,
};
use crate::core::block::{Block, LiveBlock, LiveFrame, RenderContext};
use crate::core::color::Color;
use crate::core::layout::Dimensions;
use crate::core::text::width::{align_right, fit_to_width};
use crate::core::text::wrap::wrap_text;
use crate::render::line::{Line, RenderedBlock, Segment};

const BAR_ROW: usize = 3;
const STATUS_ROW: usize = 4;
/// `║ [` before the track and `]NNNN% ║` after it.
const BAR_CHROME: usize = 11;

const GLYPH_DONE: char = '■';
const GLYPH_RUNNING_ON: char = '▪';
const GLYPH_RUNNING_OFF: char = '□';

/// One reading from a progress source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub current: i64,
    pub total: i64,
    pub status: String,
}

impl ProgressState {
    pub fn new(current: i64, total: i64, status: impl Into<String>) -> Self {
        Self {
            current,
            total,
            status: status.into(),
        }
    }

    pub fn percent(&self) -> u8 {
        percent(self.current, self.total)
    }
}

/// Whole percent of `current` over `total`, floored; 0 for a non-positive total.
pub fn percent(current: i64, total: i64) -> u8 {
    if total <= 0 || current <= 0 {
        return 0;
    }
    if current >= total {
        return 100;
    }
    (i128::from(current) * 100 / i128::from(total)) as u8
}

pub type SourceError = Box<dyn Error + Send + Sync>;

/// Where a progress bar reads its state from.
pub trait ProgressSource: Send + Sync {
    fn snapshot(&self) -> Result<ProgressState, SourceError>;
}

impl<F> ProgressSource for F
where
    F: Fn() -> ProgressState + Send + Sync,
{
    fn snapshot(&self) -> Result<ProgressState, SourceError> {
        Ok(self())
    }
}

/// Adapts a fallible closure into a [`ProgressSource`].
pub struct TryFnSource<F>(pub F);

impl<F> ProgressSource for TryFnSource<F>
where
    F: Fn() -> Result<ProgressState, SourceError> + Send + Sync,
{
    fn snapshot(&self) -> Result<ProgressState, SourceError> {
        (self.0)()
    }
}

/// A source that always reports the same state.
#[derive(Debug, Clone, Default)]
pub struct StaticProgress(pub ProgressState);

impl ProgressSource for StaticProgress {
    fn snapshot(&self) -> Result<ProgressState, SourceError> {
        Ok(self.0.clone())
    }
}

/// The unit of work a progress bar follows.
pub trait WorkCompletion: Send + Sync {
    fn is_complete(&self) -> bool;
}

impl WorkCompletion for Arc<AtomicBool> {
    fn is_complete(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Work that is already done.
#[derive(Debug, Clone, Copy, Default)]
pub struct Completed;

impl WorkCompletion for Completed {
    fn is_complete(&self) -> bool {
        true
    }
}

/// A spawned thread whose exit marks the work complete.
#[derive(Debug)]
pub struct WorkHandle<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> WorkHandle<T> {
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self {
            handle: thread::spawn(work),
        }
    }

    pub fn into_inner(self) -> JoinHandle<T> {
        self.handle
    }
}

impl<T> From<JoinHandle<T>> for WorkHandle<T> {
    fn from(handle: JoinHandle<T>) -> Self {
        Self { handle }
    }
}

impl<T: Send + 'static> WorkCompletion for WorkHandle<T> {
    fn is_complete(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Monotonic percent and the running-glyph toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    max_percent: u8,
    toggle: bool,
    completed: bool,
}

impl ProgressTracker {
    /// Percent for a full render; raises the floor but does not animate.
    pub fn observe(&mut self, percent: u8, completed: bool) -> u8 {
        self.completed |= completed;
        if self.completed {
            self.max_percent = 100;
        } else {
            self.max_percent = self.max_percent.max(percent.min(100));
        }
        self.max_percent
    }

    /// Percent for a live tick. Flips the running glyph while incomplete.
    pub fn advance(&mut self, percent: u8, completed: bool) -> u8 {
        let shown = self.observe(percent, completed);
        if !self.completed {
            self.toggle = !self.toggle;
        }
        shown
    }

    pub fn glyph(&self, percent: u8) -> char {
        if self.completed || percent >= 100 {
            GLYPH_DONE
        } else if self.toggle {
            GLYPH_RUNNING_ON
        } else {
            GLYPH_RUNNING_OFF
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Colors and width captured by the last full render and reused by frames.
#[derive(Debug, Clone, Copy)]
struct FrameStyle {
    width: usize,
    border: Color,
    text: Color,
    bar: Color,
    empty: Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            width: 100,
            border: Color::DarkGray,
            text: Color::DefaultForeground,
            bar: Color::Green,
            empty: Color::DarkGray,
        }
    }
}

pub struct ProgressBar {
    title: String,
    description: Option<String>,
    source: Box<dyn ProgressSource>,
    work: Box<dyn WorkCompletion>,
    bar_color: Option<Color>,
    empty_color: Color,
    text_color: Option<Color>,
    tracker: ProgressTracker,
    style: FrameStyle,
    anchor: Option<Dimensions>,
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("title", &self.title)
            .field("tracker", &self.tracker)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    pub fn new(
        title: impl Into<String>,
        source: impl ProgressSource + 'static,
        work: impl WorkCompletion + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            source: Box::new(source),
            work: Box::new(work),
            bar_color: None,
            empty_color: Color::DarkGray,
            text_color: None,
            tracker: ProgressTracker::default(),
            style: FrameStyle::default(),
            anchor: None,
        }
    }

    /// A bar that is already complete and shows `state` as-is.
    pub fn fixed(title: impl Into<String>, state: ProgressState) -> Self {
        Self::new(title, StaticProgress(state), Completed)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the document theme's progress bar color.
    pub fn with_bar_color(mut self, color: Color) -> Self {
        self.bar_color = Some(color);
        self
    }

    pub fn with_empty_color(mut self, color: Color) -> Self {
        self.empty_color = color;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn anchor(&self) -> Option<Dimensions> {
        self.anchor
    }

    /// Read the source, mapping errors and panics to the zero state.
    fn safe_snapshot(&self) -> ProgressState {
        match panic::catch_unwind(AssertUnwindSafe(|| self.source.snapshot())) {
            Ok(Ok(state)) => state,
            Ok(Err(err)) => {
                tracing::debug!(title = %self.title, error = %err, "progress source failed");
                ProgressState::default()
            }
            Err(_) => {
                tracing::warn!(title = %self.title, "progress source panicked");
                ProgressState::default()
            }
        }
    }

    fn work_complete(&self) -> bool {
        panic::catch_unwind(AssertUnwindSafe(|| self.work.is_complete())).unwrap_or(false)
    }

    fn bar_line(&self, percent: u8) -> Line {
        let style = &self.style;
        let track = style.width.saturating_sub(BAR_CHROME).max(1);
        let filled = (track * usize::from(percent) / 100).min(track);

        let mut line = Line::new(vec![
            Segment::new(DOUBLE_VERTICAL.to_string()).fg(style.border),
            Segment::new(" ").fg(style.text),
            Segment::new("[").fg(style.border),
        ]);
        if filled > 0 {
            line.push(Segment::new(repeat(SHADE_FULL, filled)).fg(style.bar));
        }
        if track > filled {
            line.push(Segment::new(repeat(SHADE_LIGHT, track - filled)).fg(style.empty));
        }
        line.push(Segment::new("]").fg(style.border));
        let label = format!("{}%", align_right(&percent.to_string(), 4));
        line.push(Segment::new(label).fg(style.text));
        line.push(Segment::new(" ").fg(style.text));
        line.push(Segment::new(DOUBLE_VERTICAL.to_string()).fg(style.border));
        line
    }

    fn status_line(&self, glyph: char, status: &str) -> Line {
        let style = &self.style;
        let inner = style.width.saturating_sub(2);
        Line::new(vec![
            Segment::new(DOUBLE_VERTICAL.to_string()).fg(style.border),
            Segment::new(fit_to_width(&format!(" {glyph} {status}"), inner)).fg(style.text),
            Segment::new(DOUBLE_VERTICAL.to_string()).fg(style.border),
        ])
    }
}

impl Block for ProgressBar {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock {
        let theme = ctx.theme;
        self.style = FrameStyle {
            width: ctx.width,
            border: theme.border,
            text: self.text_color.unwrap_or(theme.text),
            bar: self.bar_color.unwrap_or(theme.progress_bar),
            empty: self.empty_color,
        };

        let state = self.safe_snapshot();
        let shown = self.tracker.observe(state.percent(), self.work_complete());
        let glyph = self.tracker.glyph(shown);

        let mut block = RenderedBlock::default();
        block.extend(title_box(&self.title, ctx.width, theme));
        block.push(divider(ctx.width, theme));
        block.push(self.bar_line(shown));
        block.push(self.status_line(glyph, &state.status));

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            let inner = ctx.width.saturating_sub(2);
            for line in wrap_text(description, inner.saturating_sub(1)) {
                block.push(Line::new(vec![
                    border(DOUBLE_VERTICAL.to_string(), theme),
                    Segment::new(fit_to_width(&format!(" {line}"), inner)).fg(self.style.text),
                    border(DOUBLE_VERTICAL.to_string(), theme),
                ]));
            }
        }

        block.push(closing_border(ctx.width, theme));
        block
    }

    fn as_live(&mut self) -> Option<&mut dyn LiveBlock> {
        Some(self)
    }
}

impl LiveBlock for ProgressBar {
    fn attach_anchor(&mut self, anchor: Dimensions) {
        self.anchor = Some(anchor);
    }

    fn next_frame(&mut self) -> LiveFrame {
        let completed = self.work_complete();
        let state = self.safe_snapshot();
        let shown = self.tracker.advance(state.percent(), completed);
        let glyph = self.tracker.glyph(shown);

        if crate::logging::verbose_ticks() {
            tracing::trace!(title = %self.title, percent = shown, completed, "progress tick");
        }

        LiveFrame::new(
            vec![
                (BAR_ROW, self.bar_line(shown)),
                (STATUS_ROW, self.status_line(glyph, &state.status)),
            ],
            completed,
        )
    }
}
