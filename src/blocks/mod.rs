//! Built-in document blocks.

pub mod banner;
pub mod bar_graph;
pub mod chrome;
pub mod divided_bar_graph;
pub mod node;
pub mod outline;
pub mod panel;
pub mod progress;
pub mod separator;
pub mod table;
pub mod table_hierarchy;
pub mod tree;

pub use banner::{Footer, Header};
pub use bar_graph::{BarGraph, GraphSegment};
pub use divided_bar_graph::DividedBarGraph;
pub use node::Node;
pub use outline::Outline;
pub use panel::Panel;
pub use progress::{
    Completed, ProgressBar, ProgressSource, ProgressState, ProgressTracker, SourceError,
    StaticProgress, TryFnSource, WorkCompletion, WorkHandle,
};
pub use separator::Separator;
pub use table::Table;
pub use table_hierarchy::{LeafRecord, TableHierarchy, TableNode};
pub use tree::TreeDiagram;
