//! Documents: an ordered list of blocks rendered at one fixed width.

use std::time::Duration;

use crate::core::block::{lock_block, share, Block, RenderContext, SharedBlock};
use crate::core::color::Color;
use crate::core::layout::Dimensions;
use crate::core::terminal::Terminal;
use crate::error::{DocumentError, Result, MAX_DOCUMENT_WIDTH, MIN_DOCUMENT_WIDTH};
use crate::render::line::Line;
use crate::render::sgr::ColorMode;
use crate::runtime::cancel::CancelSignal;
use crate::runtime::full_screen;
use crate::runtime::live_region::LiveRegionRenderer;

/// Colors and switches shared by every block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTheme {
    pub text: Color,
    pub root_glyph: Color,
    pub border: Color,
    pub tree_node: Color,
    pub bar_graph: Color,
    pub progress_bar: Color,
    pub alternate_bar_graph_colors: bool,
    /// Outline glyph colors: depth 0, odd depths, even depths.
    pub outline_colors: [Color; 3],
}

impl Default for DocumentTheme {
    fn default() -> Self {
        Self {
            text: Color::DefaultForeground,
            root_glyph: Color::Cyan,
            border: Color::DarkGray,
            tree_node: Color::Green,
            bar_graph: Color::Yellow,
            progress_bar: Color::Coral,
            alternate_bar_graph_colors: false,
            outline_colors: [Color::DarkBlue, Color::DarkGreen, Color::DarkRed],
        }
    }
}

pub struct Document {
    width: usize,
    vt_enabled: bool,
    theme: DocumentTheme,
    blocks: Vec<SharedBlock>,
    refresh: Duration,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("width", &self.width)
            .field("vt_enabled", &self.vt_enabled)
            .field("blocks", &self.blocks.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document `width` columns wide.
    ///
    /// `width` must lie in `[50, 200]`. With `vt_enabled` false colors fall back
    /// to the sixteen-color encoder.
    pub fn new(width: usize, vt_enabled: bool) -> Result<Self> {
        if !(MIN_DOCUMENT_WIDTH..=MAX_DOCUMENT_WIDTH).contains(&width) {
            return Err(DocumentError::InvalidWidth { width });
        }
        Ok(Self {
            width,
            vt_enabled,
            theme: DocumentTheme::default(),
            blocks: Vec::new(),
            refresh: crate::logging::env_config().refresh_interval(),
        })
    }

    pub fn with_theme(mut self, theme: DocumentTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_refresh_interval(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn vt_enabled(&self) -> bool {
        self.vt_enabled
    }

    pub fn theme(&self) -> &DocumentTheme {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut DocumentTheme {
        &mut self.theme
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }

    pub fn blocks(&self) -> &[SharedBlock] {
        &self.blocks
    }

    pub fn push<B: Block + 'static>(&mut self, block: B) -> &mut Self {
        self.blocks.push(share(block));
        self
    }

    /// Append a block the caller keeps a handle to.
    pub fn push_shared(&mut self, block: SharedBlock) -> &mut Self {
        self.blocks.push(block);
        self
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(self.width, &self.theme)
    }

    /// Every block's current lines, in order, without touching a terminal.
    pub fn render_lines(&self) -> Vec<Line> {
        let ctx = self.context();
        self.blocks
            .iter()
            .flat_map(|block| lock_block(block).render(&ctx).into_lines())
            .collect()
    }

    /// Write the document below any earlier output.
    ///
    /// Static blocks are written immediately in order. Live blocks are
    /// collected into one region at the bottom, painted once, registered with
    /// `renderer` and kept up to date by its background loop.
    pub fn render(&self, renderer: &LiveRegionRenderer) -> Result<()> {
        let ctx = self.context();
        let mut live: Vec<(SharedBlock, Vec<Line>)> = Vec::new();

        {
            let mut screen = renderer.screen();
            screen.set_color_mode(ColorMode::detect(self.vt_enabled));
            for block in &self.blocks {
                let mut guard = lock_block(block);
                let rendered = guard.render(&ctx);
                if guard.as_live().is_some() {
                    live.push((block.clone(), rendered.into_lines()));
                } else {
                    screen.write_static(rendered.lines(), self.width);
                }
            }

            if live.is_empty() {
                screen.flush()?;
                tracing::debug!(blocks = self.blocks.len(), "rendered static document");
                return Ok(());
            }

            let right = screen.columns().min(self.width) - 1;
            let total: usize = live.iter().map(|(_, lines)| lines.len().max(1)).sum();
            let mut top = screen.reserve(total);
            for (block, lines) in &live {
                let anchor = Dimensions::with_height(0, top, right, lines.len());
                renderer.register(block.clone(), anchor);
                for (rel, line) in lines.iter().enumerate() {
                    screen.paint_row(anchor.row(rel), &anchor, line);
                }
                top += anchor.height();
            }
            screen.park();
            screen.flush()?;
        }

        tracing::debug!(
            blocks = self.blocks.len(),
            live = live.len(),
            "rendered document with live region"
        );
        renderer.start_if_needed(self.refresh)?;
        Ok(())
    }

    /// Run the document as a full-screen, scrollable view until Escape or `cancel`.
    pub fn render_full_screen(
        &self,
        terminal: &mut dyn Terminal,
        refresh: Duration,
        cancel: &CancelSignal,
    ) -> Result<()> {
        full_screen::run(self, terminal, refresh, cancel)?;
        Ok(())
    }
}
