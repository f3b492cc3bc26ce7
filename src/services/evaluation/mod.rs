//! 提交评估：路径校验与评分

pub mod scorer;
pub mod validator;

pub use scorer::{ScoreResult, Scorer};
pub use validator::{PathStatus, PathValidator, ValidatedPath};
