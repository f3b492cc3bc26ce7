//! 服务层模块
//!
//! 图生成、最短路径求解与提交评估

pub mod algorithm;
pub mod evaluation;
pub mod generator;

pub use algorithm::{RequiredNodeRouter, Route, ShortestPathSolver, Strategy};
pub use evaluation::{PathStatus, PathValidator, ScoreResult, Scorer, ValidatedPath};
pub use generator::{Difficulty, GeneratorConfig, GraphGenerator, WeightRange};
