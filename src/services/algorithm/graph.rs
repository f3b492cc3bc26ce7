//! 算法输入抽象
//!
//! 最短路径算法只依赖“按下标遍历出边”这一能力，
//! `GraphModel` 和轻量的 `AdjacencyList` 都实现了它

use std::borrow::Cow;

use crate::core::error::InvalidWeightError;
use crate::core::graph::{GraphModel, Weight};

/// 以 `0..node_count()` 为下标的有向带权图
pub trait WeightedDigraph {
    fn node_count(&self) -> usize;

    /// `node` 的所有出边 `(目标下标, 权重)`
    fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, Weight)> + '_;

    /// 用于错误信息的节点名称
    fn node_name(&self, node: usize) -> Cow<'_, str>;
}

impl WeightedDigraph for GraphModel {
    fn node_count(&self) -> usize {
        GraphModel::node_count(self)
    }

    fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        self.outgoing_with_targets(node)
            .map(|(edge, target)| (target, edge.weight))
    }

    fn node_name(&self, node: usize) -> Cow<'_, str> {
        match self.node(node) {
            Some(node) => Cow::Borrowed(node.id.as_str()),
            None => Cow::Owned(format!("#{}", node)),
        }
    }
}

/// 纯下标的邻接表，节点名称就是下标本身
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    adjacency: Vec<Vec<(usize, Weight)>>,
}

impl AdjacencyList {
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// 添加一条有向边，超出范围的端点会自动扩容
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Weight) {
        let needed = from.max(to) + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize(needed, Vec::new());
        }
        self.adjacency[from].push((to, weight));
    }

    pub fn from_edges(node_count: usize, edges: &[(usize, usize, Weight)]) -> Self {
        let mut list = Self::new(node_count);
        for &(from, to, weight) in edges {
            list.add_edge(from, to, weight);
        }
        list
    }
}

impl WeightedDigraph for AdjacencyList {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        self.adjacency.get(node).into_iter().flatten().copied()
    }

    fn node_name(&self, node: usize) -> Cow<'_, str> {
        Cow::Owned(node.to_string())
    }
}

/// 检查求解器的前置条件：不存在负权边
pub fn ensure_non_negative<G: WeightedDigraph>(graph: &G) -> Result<(), InvalidWeightError> {
    for node in 0..graph.node_count() {
        if let Some((target, weight)) = graph.neighbors(node).find(|&(_, weight)| weight < 0) {
            return Err(InvalidWeightError {
                from: graph.node_name(node).into_owned(),
                to: graph.node_name(target).into_owned(),
                weight,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{Edge, GraphSpec, Node};

    #[test]
    fn test_adjacency_list_grows() {
        let mut list = AdjacencyList::new(1);
        list.add_edge(0, 3, 2);
        assert_eq!(list.node_count(), 4);
        assert_eq!(list.neighbors(0).collect::<Vec<_>>(), vec![(3, 2)]);
        assert_eq!(list.neighbors(3).count(), 0);
        assert_eq!(list.neighbors(9).count(), 0);
    }

    #[test]
    fn test_graph_model_neighbors() {
        let spec = GraphSpec::new(
            vec![Node::new("A", "A"), Node::new("B", "B")],
            vec![Edge::new("e1", "A", "B", 4)],
            "A",
            "B",
        );
        let graph = GraphModel::new(spec).expect("graph should be valid");
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 4)]);
        assert_eq!(graph.node_name(1), "B");
    }

    #[test]
    fn test_ensure_non_negative() {
        let ok = AdjacencyList::from_edges(3, &[(0, 1, 0), (1, 2, 5)]);
        assert!(ensure_non_negative(&ok).is_ok());

        let bad = AdjacencyList::from_edges(3, &[(0, 1, 2), (1, 2, -1)]);
        let err = ensure_non_negative(&bad).expect_err("negative edge should be rejected");
        assert_eq!(err.from, "1");
        assert_eq!(err.to, "2");
        assert_eq!(err.weight, -1);
    }
}
