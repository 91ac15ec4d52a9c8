//! Structured console documents: headers, panels, graphs, tables and live progress bars.
//!
//! Invariant: single output gate: only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - Compose blocks into a [`Document`] and render it inline with [`Document::render`].
//! - Live blocks ([`ProgressBar`]) keep repainting through the process-wide
//!   [`LiveRegionRenderer`] until their work completes.
//! - [`Document::render_full_screen`] shows the whole document in a scrollable alternate view.
//! - Width, wrapping and column distribution helpers live under [`core`].

#![allow(
    clippy::derivable_impls,
    clippy::needless_range_loop,
    clippy::too_many_arguments,
    clippy::type_complexity
)]

pub mod config;
pub mod error;
pub mod logging;

pub mod blocks;
pub mod core;
pub mod document;
pub mod platform;
pub mod render;
pub mod runtime;

/// Built-in document blocks.
pub use crate::blocks::{
    BarGraph, DividedBarGraph, Footer, GraphSegment, Header, Node, Outline, Panel, ProgressBar,
    Separator, Table, TreeDiagram,
};

/// Progress sources and completion handles.
pub use crate::blocks::{
    Completed, ProgressSource, ProgressState, SourceError, StaticProgress, TryFnSource,
    WorkCompletion, WorkHandle,
};

/// Block contracts.
pub use crate::core::block::{share, Block, LiveBlock, LiveFrame, RenderContext, SharedBlock};

/// Colors and text styles.
pub use crate::core::color::{Color, TextStyle};

/// Terminal abstraction and lifecycle guard.
pub use crate::core::terminal::{Terminal, TerminalGuard};

/// Documents and their theme.
pub use crate::document::{Document, DocumentTheme};

/// Error type and width bounds.
pub use crate::error::{DocumentError, Result, MAX_DOCUMENT_WIDTH, MIN_DOCUMENT_WIDTH};

/// Process terminal implementation.
pub use crate::platform::ProcessTerminal;

/// Styled output lines.
pub use crate::render::{ColorMode, Line, RenderedBlock, Segment};

/// Live rendering and cancellation.
pub use crate::runtime::{CancelSignal, LiveRegionRenderer};
