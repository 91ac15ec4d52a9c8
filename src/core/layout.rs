//! Column-width redistribution and the `Dimensions` rectangle.

/// Narrowest a column is shrunk to while other columns can still give up width.
pub const MIN_COLUMN_WIDTH: usize = 5;

/// Redistribute natural column widths so they sum exactly to `target`.
///
/// Over budget: the widest column (leftmost on ties) loses one cell at a time,
/// never going below [`MIN_COLUMN_WIDTH`] unless every column is already at the
/// floor, in which case the floor relaxes to 1 and then 0. Under budget: columns
/// grow one cell at a time round-robin from the left.
pub fn distribute_widths(natural: &[usize], target: usize) -> Vec<usize> {
    let mut widths = natural.to_vec();
    if widths.is_empty() {
        return widths;
    }

    let mut total: usize = widths.iter().sum();
    for floor in [MIN_COLUMN_WIDTH, 1, 0] {
        while total > target {
            let Some(widest) = widest_above(&widths, floor) else {
                break;
            };
            widths[widest] -= 1;
            total -= 1;
        }
    }

    let mut idx = 0;
    while total < target {
        widths[idx] += 1;
        total += 1;
        idx = (idx + 1) % widths.len();
    }

    widths
}

fn widest_above(widths: &[usize], floor: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, &width) in widths.iter().enumerate() {
        if width <= floor {
            continue;
        }
        match best {
            Some(current) if widths[current] >= width => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// An absolute screen rectangle, inclusive on all edges.
///
/// Rows are counted from the first row a [`crate::runtime::Screen`] wrote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Dimensions {
    /// Build a rectangle; `right`/`bottom` are raised to `left`/`top` if smaller.
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right: right.max(left),
            bottom: bottom.max(top),
        }
    }

    /// Rectangle of `height` rows (at least one) starting at `top`.
    pub fn with_height(left: usize, top: usize, right: usize, height: usize) -> Self {
        Self::new(left, top, right, top + height.max(1) - 1)
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// Absolute row of relative row `index`.
    pub fn row(&self, index: usize) -> usize {
        self.top + index
    }

    pub fn contains_row(&self, row: usize) -> bool {
        (self.top..=self.bottom).contains(&row)
    }
}
