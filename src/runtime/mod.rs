//! Live output: the bottom-anchored live region and the full-screen session.

pub mod cancel;
pub mod full_screen;
pub mod live_region;
pub mod screen;
mod viewport;

pub use cancel::CancelSignal;
pub use full_screen::{legend_line, LEGEND};
pub use live_region::LiveRegionRenderer;
pub use screen::Screen;
