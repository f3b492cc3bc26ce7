//! 对外错误码定义
//!
//! 错误码格式: XXYY
//! - XX: 错误类别 (02=执行, 03=验证, 09=系统)
//! - YY: 具体错误
//!
//! 宿主层（HTTP 处理器、批处理任务）用错误码决定如何向玩家呈现，
//! 无需匹配错误字符串

use serde::{Deserialize, Serialize};

/// 对外错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // ==================== 执行错误 (02xx) ====================
    /// 终点不可达
    UnreachableGoal = 200,
    /// 图生成失败
    GenerationFailed = 201,

    // ==================== 验证错误 (03xx) ====================
    /// 图结构不合法
    MalformedGraph = 300,
    /// 负权边
    InvalidWeight = 301,
    /// 非法移动
    InvalidPath = 302,
    /// 生成配置不合法
    InvalidConfig = 303,

    // ==================== 系统错误 (09xx) ====================
    /// 内部错误
    InternalError = 900,
}

impl ErrorCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            200 => Some(ErrorCode::UnreachableGoal),
            201 => Some(ErrorCode::GenerationFailed),
            300 => Some(ErrorCode::MalformedGraph),
            301 => Some(ErrorCode::InvalidWeight),
            302 => Some(ErrorCode::InvalidPath),
            303 => Some(ErrorCode::InvalidConfig),
            900 => Some(ErrorCode::InternalError),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.as_i32() {
            200..=299 => ErrorCategory::Execution,
            300..=399 => ErrorCategory::Validation,
            _ => ErrorCategory::System,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::UnreachableGoal => "终点不可达",
            ErrorCode::GenerationFailed => "图生成失败",
            ErrorCode::MalformedGraph => "图结构不合法",
            ErrorCode::InvalidWeight => "权重不合法",
            ErrorCode::InvalidPath => "非法移动",
            ErrorCode::InvalidConfig => "配置不合法",
            ErrorCode::InternalError => "内部错误",
        }
    }

    /// 只有生成失败值得调用方放宽配置后重试，其余错误都反映确定的输入或拓扑
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::GenerationFailed)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_i32(), self.default_message())
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Execution,
    Validation,
    System,
}

impl ErrorCategory {
    pub fn to_http_status(&self) -> u16 {
        match self {
            ErrorCategory::Execution => 409,
            ErrorCategory::Validation => 422,
            ErrorCategory::System => 500,
        }
    }
}

/// 对外错误信息 - 用于序列化到响应中
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicError {
    pub code: ErrorCode,
    pub message: String,
}

impl PublicError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// 内部错误到对外错误的转换 trait
pub trait ToPublicError {
    fn to_public_error(&self) -> PublicError {
        PublicError::new(self.to_error_code(), self.to_public_message())
    }

    fn to_error_code(&self) -> ErrorCode;

    fn to_public_message(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_round_trip_through_i32() {
        for code in [
            ErrorCode::UnreachableGoal,
            ErrorCode::GenerationFailed,
            ErrorCode::MalformedGraph,
            ErrorCode::InvalidWeight,
            ErrorCode::InvalidPath,
            ErrorCode::InvalidConfig,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::from_i32(code.as_i32()), Some(code));
        }
        assert_eq!(ErrorCode::from_i32(12345), None);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::UnreachableGoal.category(), ErrorCategory::Execution);
        assert_eq!(ErrorCode::InvalidPath.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
        assert_eq!(ErrorCategory::Validation.to_http_status(), 422);
    }

    #[test]
    fn test_only_generation_is_retryable() {
        assert!(ErrorCode::GenerationFailed.is_retryable());
        assert!(!ErrorCode::UnreachableGoal.is_retryable());
        assert!(!ErrorCode::MalformedGraph.is_retryable());
    }
}
