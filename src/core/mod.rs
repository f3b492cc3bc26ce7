pub mod error;
pub mod graph;
pub mod path;

pub use error::{EngineError, EngineResult};
pub use graph::{Edge, GraphModel, GraphSpec, Node, Position, Weight, MAX_TOTAL_WEIGHT};
pub use path::Path;
