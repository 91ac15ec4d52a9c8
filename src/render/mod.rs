//! Styled lines and their escape-sequence encoding.

pub mod line;
pub mod sgr;

pub use line::{Line, RenderedBlock, Segment};
pub use sgr::ColorMode;
