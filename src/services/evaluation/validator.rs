//! 提交路径校验
//!
//! 检查路径非空、从起点出发、每一步都沿着存在的有向边，
//! 并判断是否已到达终点以及是否经过了全部必经节点。
//! 校验器不会丢弃或重排输入

use serde::{Deserialize, Serialize};

use crate::core::error::InvalidPathError;
use crate::core::graph::GraphModel;
use crate::core::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    /// 路径终止于终点
    Complete,
    /// 路径合法但尚未到达终点
    Incomplete,
}

/// 通过校验的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath {
    /// 与输入一一对应的节点下标
    pub nodes: Vec<usize>,
    pub status: PathStatus,
    pub satisfies_required_nodes: bool,
    /// 路径中缺失的必经节点ID
    pub missing_required: Vec<String>,
}

impl ValidatedPath {
    pub fn is_complete(&self) -> bool {
        self.status == PathStatus::Complete
    }
}

pub struct PathValidator;

impl PathValidator {
    pub fn validate(graph: &GraphModel, path: &Path) -> Result<ValidatedPath, InvalidPathError> {
        let Some(first) = path.first() else {
            return Err(InvalidPathError::Empty);
        };
        if first != graph.start_id() {
            return Err(InvalidPathError::WrongStart {
                expected: graph.start_id().to_string(),
                found: first.to_string(),
            });
        }

        let mut nodes = Vec::with_capacity(path.len());
        for (position, id) in path.nodes().iter().enumerate() {
            let node = graph
                .node_index(id)
                .ok_or_else(|| InvalidPathError::UnknownNode {
                    position,
                    node: id.clone(),
                })?;
            if let Some(&previous) = nodes.last() {
                if !graph.has_edge(previous, node) {
                    return Err(InvalidPathError::MissingEdge {
                        from: graph.node_id(previous).to_string(),
                        to: id.clone(),
                    });
                }
            }
            nodes.push(node);
        }

        let status = if nodes.last() == Some(&graph.goal()) {
            PathStatus::Complete
        } else {
            PathStatus::Incomplete
        };

        let missing_required: Vec<String> = graph
            .required()
            .iter()
            .filter(|required| !nodes.contains(required))
            .map(|&required| graph.node_id(required).to_string())
            .collect();

        Ok(ValidatedPath {
            nodes,
            status,
            satisfies_required_nodes: missing_required.is_empty(),
            missing_required,
        })
    }
}
