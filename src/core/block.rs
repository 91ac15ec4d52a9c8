//! Block and LiveBlock traits.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::layout::Dimensions;
use crate::document::DocumentTheme;
use crate::render::line::{Line, RenderedBlock};

/// Shared per-render inputs handed to every block.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub width: usize,
    pub theme: &'a DocumentTheme,
}

impl<'a> RenderContext<'a> {
    pub fn new(width: usize, theme: &'a DocumentTheme) -> Self {
        Self { width, theme }
    }
}

/// Renderable content unit.
pub trait Block: Send {
    /// Lay out the block at the context width.
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderedBlock;

    /// Optional incremental-update behavior.
    fn as_live(&mut self) -> Option<&mut dyn LiveBlock> {
        None
    }
}

/// Incremental updates for a block that has already been painted once.
pub trait LiveBlock: Send {
    /// Record the rectangle the block's first render was painted into.
    fn attach_anchor(&mut self, anchor: Dimensions);

    /// Rows to repaint this tick, relative to the anchor top.
    fn next_frame(&mut self) -> LiveFrame;
}

/// The rows a live block wants repainted plus whether it has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveFrame {
    pub rows: Vec<(usize, Line)>,
    pub completed: bool,
}

impl LiveFrame {
    pub fn new(rows: Vec<(usize, Line)>, completed: bool) -> Self {
        Self { rows, completed }
    }

    /// Nothing to repaint, never ticks again.
    pub fn finished() -> Self {
        Self {
            rows: Vec::new(),
            completed: true,
        }
    }
}

/// A block shared between a document and a live loop.
pub type SharedBlock = Arc<Mutex<dyn Block>>;

pub fn share<B: Block + 'static>(block: B) -> SharedBlock {
    Arc::new(Mutex::new(block))
}

/// Lock a shared block, recovering from a panic in an earlier holder.
pub fn lock_block(block: &SharedBlock) -> MutexGuard<'_, dyn Block + 'static> {
    block.lock().unwrap_or_else(PoisonError::into_inner)
}
