//! 图模型
//!
//! `GraphModel` 是所有算法共享的只读输入

pub mod model;
pub mod types;

pub use model::{GraphModel, GraphSpec, MAX_REQUIRED_NODES, MAX_TOTAL_WEIGHT};
pub use types::{Edge, Node, Position, Weight};
