//! Scroll state for the full-screen session.
//!
//! The last screen row is reserved for the legend, so `visible_rows` is one less
//! than the terminal height. The top row is always clamped to
//! `[0, total - visible_rows]`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Viewport {
    top: usize,
    screen_rows: usize,
    total: usize,
}

impl Viewport {
    pub(crate) fn new(screen_rows: usize, total: usize) -> Self {
        let mut viewport = Self {
            top: 0,
            screen_rows: screen_rows.max(1),
            total,
        };
        viewport.clamp();
        viewport
    }

    pub(crate) fn top(&self) -> usize {
        self.top
    }

    pub(crate) fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    pub(crate) fn visible_rows(&self) -> usize {
        self.screen_rows.saturating_sub(1)
    }

    pub(crate) fn legend_row(&self) -> usize {
        self.screen_rows - 1
    }

    fn max_top(&self) -> usize {
        self.total.saturating_sub(self.visible_rows())
    }

    fn clamp(&mut self) {
        self.top = self.top.min(self.max_top());
    }

    pub(crate) fn resize(&mut self, screen_rows: usize) {
        self.screen_rows = screen_rows.max(1);
        self.clamp();
    }

    /// Move by `delta` rows; returns whether the top changed.
    pub(crate) fn scroll_by(&mut self, delta: isize) -> bool {
        let before = self.top;
        self.top = if delta < 0 {
            self.top.saturating_sub(delta.unsigned_abs())
        } else {
            self.top.saturating_add(delta as usize)
        };
        self.clamp();
        self.top != before
    }

    pub(crate) fn page_up(&mut self) -> bool {
        let page = self.visible_rows() as isize;
        self.scroll_by(-page)
    }

    pub(crate) fn page_down(&mut self) -> bool {
        let page = self.visible_rows() as isize;
        self.scroll_by(page)
    }

    pub(crate) fn home(&mut self) -> bool {
        let before = self.top;
        self.top = 0;
        self.top != before
    }

    pub(crate) fn end(&mut self) -> bool {
        let before = self.top;
        self.top = self.max_top();
        self.top != before
    }

    /// Screen row showing `doc_row`, if it is currently visible.
    pub(crate) fn screen_row(&self, doc_row: usize) -> Option<usize> {
        let visible = doc_row >= self.top && doc_row < self.top + self.visible_rows();
        visible.then(|| doc_row - self.top)
    }
}
