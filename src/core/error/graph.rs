//! 图结构错误类型
//!
//! 涵盖图构造、求解器权重前置条件和随机生成相关的错误

use thiserror::Error;

use crate::core::graph::Weight;

/// 图结构不变量被破坏
///
/// 构造 `GraphModel` 时发现的致命错误，通常意味着调用方的 bug
/// 或存储的图数据已损坏，不应重试
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedGraphError {
    #[error("图中没有任何节点")]
    EmptyGraph,

    #[error("重复的节点ID: {0}")]
    DuplicateNodeId(String),

    #[error("重复的边ID: {0}")]
    DuplicateEdgeId(String),

    #[error("边 {edge} 引用了不存在的节点 {node}")]
    DanglingEdge { edge: String, node: String },

    #[error("边 {edge} 是节点 {node} 上的自环")]
    SelfLoop { edge: String, node: String },

    #[error("边 {edge} 的权重 {weight} 必须为正数")]
    NonPositiveWeight { edge: String, weight: Weight },

    #[error("起点 {0} 不存在")]
    UnknownStartNode(String),

    #[error("终点 {0} 不存在")]
    UnknownGoalNode(String),

    #[error("必经节点 {0} 不存在")]
    UnknownRequiredNode(String),

    #[error("从起点 {start} 无法到达终点 {goal}")]
    GoalUnreachable { start: String, goal: String },

    #[error("必经节点 {0} 无法从起点到达或无法到达终点")]
    RequiredNodeIsolated(String),

    #[error("必经节点数量 {count} 超过上限 {max}")]
    TooManyRequiredNodes { count: usize, max: usize },

    #[error("边权重总和超过上限 {max}")]
    TotalWeightOverflow { max: Weight },
}

/// 求解器收到负权边
///
/// 最短路径求解器的前置条件是所有权重非负
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("边 {from} -> {to} 的权重 {weight} 为负数，最短路径求解器要求非负权重")]
pub struct InvalidWeightError {
    pub from: String,
    pub to: String,
    pub weight: Weight,
}

/// 图生成失败
///
/// 在有限次重试内无法满足可达性或必经节点可行性，
/// 调用方应放宽配置后重试
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphGenerationError {
    #[error("无效的生成配置: {0}")]
    InvalidConfig(String),

    #[error("可到达终点的候选节点只有 {available} 个，无法选出 {requested} 个必经节点")]
    NotEnoughCandidates { requested: usize, available: usize },

    #[error("重试 {attempts} 次后仍无法找到经过全部必经节点的可行路线")]
    RequiredNodesInfeasible { attempts: usize },

    #[error("生成的图不合法: {0}")]
    Malformed(#[from] MalformedGraphError),

    #[error("生成过程中求解失败: {0}")]
    Solver(String),
}

impl GraphGenerationError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        GraphGenerationError::InvalidConfig(reason.into())
    }
}
