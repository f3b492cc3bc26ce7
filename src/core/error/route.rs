//! 路线与提交路径错误类型

use thiserror::Error;

/// 不存在有限权重的路线
///
/// 反映真实的图拓扑，报告给调用方而不重试
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("不存在从 {start} 到 {goal} 的有限路线{}", blocking_suffix(.blocking_node))]
pub struct UnreachableGoalError {
    pub start: String,
    pub goal: String,
    /// 导致路线不可行的必经节点（如果能确定）
    pub blocking_node: Option<String>,
}

impl UnreachableGoalError {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            blocking_node: None,
        }
    }

    pub fn with_blocking_node(mut self, node: impl Into<String>) -> Self {
        self.blocking_node = Some(node.into());
        self
    }
}

fn blocking_suffix(node: &Option<String>) -> String {
    match node {
        Some(node) => format!("（必经节点 {} 无法纳入路线）", node),
        None => String::new(),
    }
}

/// 提交的路径不合法
///
/// 对玩家呈现为“非法移动”，不会导致引擎崩溃
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPathError {
    #[error("路径为空")]
    Empty,

    #[error("路径第 {position} 步引用了不存在的节点 {node}")]
    UnknownNode { position: usize, node: String },

    #[error("路径必须从起点 {expected} 出发，实际为 {found}")]
    WrongStart { expected: String, found: String },

    #[error("非法移动: 不存在从 {from} 到 {to} 的边")]
    MissingEdge { from: String, to: String },
}

impl InvalidPathError {
    /// 返回出错的节点对（仅邻接错误）
    pub fn offending_pair(&self) -> Option<(&str, &str)> {
        match self {
            InvalidPathError::MissingEdge { from, to } => Some((from.as_str(), to.as_str())),
            _ => None,
        }
    }
}
