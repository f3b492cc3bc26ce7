//! Dijkstra算法模块
//!
//! 基于优先队列的单源最短路径，要求所有权重非负。
//! 权重相同的节点按下标（在节点列表中的位置）从小到大出队，
//! 而不是按ID的字符串顺序，保证结果可复现

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::graph::{ensure_non_negative, WeightedDigraph};
use crate::core::error::InvalidWeightError;
use crate::core::graph::Weight;

/// 不可达节点的距离
pub const INFINITY: Weight = Weight::MAX;

/// Dijkstra算法结构体
pub struct Dijkstra;

/// 节点距离结构体，用于优先队列
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct NodeDistance {
    node: usize,
    distance: Weight,
}

impl Ord for NodeDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap 是大顶堆，反转后距离小、下标小的先出队
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for NodeDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 单源最短路径结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSourceResult {
    source: usize,
    /// 到各节点的最短距离，不可达为 `INFINITY`
    distances: Vec<Weight>,
    /// 前驱节点，用于重建路径
    predecessors: Vec<Option<usize>>,
}

impl SingleSourceResult {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn distances(&self) -> &[Weight] {
        &self.distances
    }

    /// 到 `target` 的最短距离，不可达返回 `None`
    pub fn distance(&self, target: usize) -> Option<Weight> {
        self.distances
            .get(target)
            .copied()
            .filter(|&distance| distance != INFINITY)
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.distance(target).is_some()
    }

    pub fn predecessor(&self, target: usize) -> Option<usize> {
        self.predecessors.get(target).copied().flatten()
    }

    /// 重建从起点到 `target` 的路径
    pub fn reconstruct_path(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        while let Some(predecessor) = self.predecessor(current) {
            path.push(predecessor);
            current = predecessor;
            // 前驱链最长不超过节点数
            if path.len() > self.distances.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

impl Dijkstra {
    /// 计算从 `source` 到所有节点的最短距离和前驱
    ///
    /// `source` 超出范围时所有节点都不可达
    pub fn shortest_distances<G: WeightedDigraph>(
        graph: &G,
        source: usize,
    ) -> Result<SingleSourceResult, InvalidWeightError> {
        ensure_non_negative(graph)?;

        let n = graph.node_count();
        let mut distances = vec![INFINITY; n];
        let mut predecessors = vec![None; n];
        let mut visited = vec![false; n];
        let mut to_visit = BinaryHeap::new();

        if source < n {
            distances[source] = 0;
            to_visit.push(NodeDistance {
                node: source,
                distance: 0,
            });
        }

        while let Some(NodeDistance { node, distance }) = to_visit.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;

            for (neighbor, weight) in graph.neighbors(node) {
                let new_distance = distance.saturating_add(weight);
                if new_distance < distances[neighbor] {
                    distances[neighbor] = new_distance;
                    predecessors[neighbor] = Some(node);
                    to_visit.push(NodeDistance {
                        node: neighbor,
                        distance: new_distance,
                    });
                }
            }
        }

        Ok(SingleSourceResult {
            source,
            distances,
            predecessors,
        })
    }

    /// 查找从 `source` 到 `target` 的最短路径
    pub fn shortest_path<G: WeightedDigraph>(
        graph: &G,
        source: usize,
        target: usize,
    ) -> Result<Option<(Vec<usize>, Weight)>, InvalidWeightError> {
        let result = Self::shortest_distances(graph, source)?;
        Ok(result
            .reconstruct_path(target)
            .zip(result.distance(target)))
    }
}
