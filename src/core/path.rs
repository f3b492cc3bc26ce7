//! 路径值类型
//!
//! 路径是节点ID的有序序列，相邻两项需要在图中存在对应的有向边，
//! 合法性由 `PathValidator` 针对具体的图检查

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::graph::GraphModel;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<String>,
}

impl Path {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// 由节点下标构造路径，下标必须来自 `graph`
    pub fn from_indices(graph: &GraphModel, indices: &[usize]) -> Self {
        Self::new(indices.iter().map(|&index| graph.node_id(index)))
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node == id)
    }
}

/// 解析 `A,C,E` 或 `A -> C -> E` 形式的路径
///
/// 分隔符只有 `,` 和 `->`，节点ID中不能包含这两者
impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new(
            s.split(',')
                .flat_map(|part| part.split("->"))
                .map(str::trim)
                .filter(|part| !part.is_empty()),
        ))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes.join(" -> "))
    }
}

impl From<Vec<String>> for Path {
    fn from(nodes: Vec<String>) -> Self {
        Self { nodes }
    }
}
