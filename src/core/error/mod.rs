//! 统一错误处理系统 for GraphQuest
//!
//! 每一种错误都携带足够的上下文（出错的节点/边ID），调用方可以据此
//! 给出精确的提示。核心不做任何网络或磁盘 I/O，因此没有需要建模的
//! 瞬时可重试故障。
//!
//! `EngineResult<T>` 是对外操作统一的返回类型

use thiserror::Error;

pub mod codes;
pub mod graph;
pub mod route;

pub use codes::{ErrorCategory, ErrorCode, PublicError, ToPublicError};
pub use graph::{GraphGenerationError, InvalidWeightError, MalformedGraphError};
pub use route::{InvalidPathError, UnreachableGoalError};

/// 统一的引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("图结构错误: {0}")]
    MalformedGraph(#[from] MalformedGraphError),

    #[error("权重错误: {0}")]
    InvalidWeight(#[from] InvalidWeightError),

    #[error("图生成错误: {0}")]
    Generation(#[from] GraphGenerationError),

    #[error("路线错误: {0}")]
    UnreachableGoal(#[from] UnreachableGoalError),

    #[error("路径错误: {0}")]
    InvalidPath(#[from] InvalidPathError),
}

/// 统一的结果类型
pub type EngineResult<T> = Result<T, EngineError>;

impl ToPublicError for EngineError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            EngineError::MalformedGraph(_) => ErrorCode::MalformedGraph,
            EngineError::InvalidWeight(_) => ErrorCode::InvalidWeight,
            EngineError::Generation(GraphGenerationError::InvalidConfig(_)) => {
                ErrorCode::InvalidConfig
            }
            EngineError::Generation(GraphGenerationError::Malformed(_))
            | EngineError::Generation(GraphGenerationError::Solver(_)) => ErrorCode::InternalError,
            EngineError::Generation(_) => ErrorCode::GenerationFailed,
            EngineError::UnreachableGoal(_) => ErrorCode::UnreachableGoal,
            EngineError::InvalidPath(_) => ErrorCode::InvalidPath,
        }
    }

    fn to_public_message(&self) -> String {
        match self {
            // 生成阶段内部产生的非法图不应暴露细节
            EngineError::Generation(GraphGenerationError::Malformed(_))
            | EngineError::Generation(GraphGenerationError::Solver(_)) => {
                self.to_error_code().default_message().to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_codes() {
        let err: EngineError = InvalidPathError::MissingEdge {
            from: "A".to_string(),
            to: "D".to_string(),
        }
        .into();
        assert_eq!(err.to_error_code(), ErrorCode::InvalidPath);

        let err: EngineError = UnreachableGoalError::new("A", "F").into();
        assert_eq!(err.to_error_code(), ErrorCode::UnreachableGoal);

        let err: EngineError = GraphGenerationError::invalid_config("节点数过少").into();
        assert_eq!(err.to_error_code(), ErrorCode::InvalidConfig);

        let err: EngineError = GraphGenerationError::RequiredNodesInfeasible { attempts: 3 }.into();
        assert_eq!(err.to_error_code(), ErrorCode::GenerationFailed);
        assert!(err.to_error_code().is_retryable());
    }

    #[test]
    fn test_public_error_hides_internal_details() {
        let err: EngineError =
            GraphGenerationError::Malformed(MalformedGraphError::DuplicateNodeId("n3".to_string()))
                .into();
        let public = err.to_public_error();
        assert_eq!(public.code, ErrorCode::InternalError);
        assert!(!public.message.contains("n3"));
    }

    #[test]
    fn test_public_error_keeps_path_context() {
        let err: EngineError = InvalidPathError::MissingEdge {
            from: "A".to_string(),
            to: "D".to_string(),
        }
        .into();
        let public = err.to_public_error();
        assert!(public.message.contains("A"));
        assert!(public.message.contains("D"));
    }
}
