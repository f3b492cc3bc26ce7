//! Floyd-Warshall算法模块
//!
//! 全源最短路径，时间复杂度O(V^3)，用于小图。
//! 必经节点路由本来就需要任意两点间的距离，小图上一次算完
//! 比逐个源点运行 Dijkstra 更直接

use super::dijkstra::INFINITY;
use super::graph::{ensure_non_negative, WeightedDigraph};
use crate::core::error::InvalidWeightError;
use crate::core::graph::Weight;

/// Floyd-Warshall算法结构体
pub struct FloydWarshall;

/// 全源最短路径结果，按 `u * n + v` 存储的方阵
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllPairsResult {
    node_count: usize,
    /// 距离矩阵，不可达为 `INFINITY`
    distances: Vec<Weight>,
    /// 下一跳矩阵，用于重建路径
    next: Vec<Option<usize>>,
}

impl AllPairsResult {
    fn new(node_count: usize) -> Self {
        let mut distances = vec![INFINITY; node_count * node_count];
        let mut next = vec![None; node_count * node_count];
        for i in 0..node_count {
            distances[i * node_count + i] = 0;
            next[i * node_count + i] = Some(i);
        }
        Self {
            node_count,
            distances,
            next,
        }
    }

    fn slot(&self, u: usize, v: usize) -> Option<usize> {
        (u < self.node_count && v < self.node_count).then(|| u * self.node_count + v)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// 从 `u` 到 `v` 的最短距离，不可达返回 `None`
    pub fn distance(&self, u: usize, v: usize) -> Option<Weight> {
        self.slot(u, v)
            .map(|slot| self.distances[slot])
            .filter(|&distance| distance != INFINITY)
    }

    /// 以 `u` 为源点的一整行距离
    pub fn row(&self, u: usize) -> &[Weight] {
        if u >= self.node_count {
            return &[];
        }
        &self.distances[u * self.node_count..(u + 1) * self.node_count]
    }

    /// 重建从 `u` 到 `v` 的最短路径
    pub fn reconstruct_path(&self, u: usize, v: usize) -> Option<Vec<usize>> {
        self.distance(u, v)?;

        let mut path = vec![u];
        let mut current = u;
        while current != v {
            current = self.next[self.slot(current, v)?]?;
            path.push(current);
            if path.len() > self.node_count {
                return None;
            }
        }
        Some(path)
    }
}

impl FloydWarshall {
    /// 执行Floyd-Warshall算法
    ///
    /// 平行边取权重最小的一条
    pub fn shortest_paths<G: WeightedDigraph>(
        graph: &G,
    ) -> Result<AllPairsResult, InvalidWeightError> {
        ensure_non_negative(graph)?;

        let n = graph.node_count();
        let mut result = AllPairsResult::new(n);

        // 填充直接连接的边
        for u in 0..n {
            for (v, weight) in graph.neighbors(u) {
                let slot = u * n + v;
                if weight < result.distances[slot] {
                    result.distances[slot] = weight;
                    result.next[slot] = Some(v);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = result.distances[i * n + k];
                if d_ik == INFINITY {
                    continue;
                }
                for j in 0..n {
                    let d_kj = result.distances[k * n + j];
                    if d_kj == INFINITY {
                        continue;
                    }
                    let candidate = d_ik.saturating_add(d_kj);
                    if candidate < result.distances[i * n + j] {
                        result.distances[i * n + j] = candidate;
                        result.next[i * n + j] = result.next[i * n + k];
                    }
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::algorithm::graph::AdjacencyList;

    // A=0, B=1, C=2, D=3
    fn create_test_graph() -> AdjacencyList {
        AdjacencyList::from_edges(4, &[(0, 1, 4), (0, 2, 2), (1, 2, 1), (1, 3, 5), (2, 3, 8)])
    }

    #[test]
    fn test_shortest_paths() {
        let result = FloydWarshall::shortest_paths(&create_test_graph())
            .expect("weights are non-negative");
        assert_eq!(result.distance(0, 3), Some(9));
        assert_eq!(result.distance(0, 2), Some(2));
        assert_eq!(result.distance(1, 3), Some(5));
        assert_eq!(result.row(0), &[0, 4, 2, 9]);
    }

    #[test]
    fn test_reconstruct_path() {
        let result = FloydWarshall::shortest_paths(&create_test_graph())
            .expect("weights are non-negative");
        assert_eq!(result.reconstruct_path(0, 3), Some(vec![0, 1, 3]));
    }

    #[test]
    fn test_same_node() {
        let result = FloydWarshall::shortest_paths(&create_test_graph())
            .expect("weights are non-negative");
        assert_eq!(result.distance(0, 0), Some(0));
        assert_eq!(result.reconstruct_path(0, 0), Some(vec![0]));
    }

    #[test]
    fn test_unreachable_node() {
        let graph = AdjacencyList::from_edges(3, &[(0, 1, 1)]);
        let result = FloydWarshall::shortest_paths(&graph).expect("weights are non-negative");
        assert_eq!(result.distance(0, 2), None);
        assert_eq!(result.reconstruct_path(0, 2), None);
        assert_eq!(result.row(0)[2], INFINITY);
    }

    #[test]
    fn test_parallel_edges_keep_minimum() {
        let graph = AdjacencyList::from_edges(2, &[(0, 1, 7), (0, 1, 3), (0, 1, 5)]);
        let result = FloydWarshall::shortest_paths(&graph).expect("weights are non-negative");
        assert_eq!(result.distance(0, 1), Some(3));
    }

    #[test]
    fn test_out_of_range_queries() {
        let result = FloydWarshall::shortest_paths(&create_test_graph())
            .expect("weights are non-negative");
        assert_eq!(result.distance(0, 42), None);
        assert!(result.row(42).is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let result = FloydWarshall::shortest_paths(&AdjacencyList::new(0))
            .expect("weights are non-negative");
        assert_eq!(result.node_count(), 0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let graph = AdjacencyList::from_edges(2, &[(1, 0, -4)]);
        assert!(FloydWarshall::shortest_paths(&graph).is_err());
    }
}
