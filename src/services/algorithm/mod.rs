//! 算法模块
//!
//! 最短路径求解与必经节点路由

pub mod dijkstra;
pub mod distance_table;
pub mod floyd_warshall;
pub mod graph;
pub mod required_nodes;
pub mod solver;

// 重新导出常用算法结构体
pub use dijkstra::{Dijkstra, SingleSourceResult, INFINITY};
pub use distance_table::DistanceTable;
pub use floyd_warshall::{AllPairsResult, FloydWarshall};
pub use graph::{AdjacencyList, WeightedDigraph};
pub use required_nodes::{RequiredNodeRouter, Route};
pub use solver::{ShortestPathSolver, Strategy, DEFAULT_ALL_PAIRS_THRESHOLD};
