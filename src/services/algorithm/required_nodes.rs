//! 必经节点路由
//!
//! 求从起点到终点、且至少经过每个必经节点一次的最小权重路线，
//! 访问顺序不受限制。起点、必经节点和终点构成“途经点”集合，
//! 在其两两最短距离上做子集动态规划：
//!
//! - 状态：(已访问必经节点的位掩码, 当前所在的必经节点)
//! - 值：从起点到达该状态的最小权重
//! - 答案：全集状态的值加上当前节点到终点的距离
//!
//! 复杂度 O(k^2 * 2^k)，k 为必经节点数。没有必经节点时退化为点到点最短路径

use super::dijkstra::INFINITY;
use super::graph::WeightedDigraph;
use super::solver::ShortestPathSolver;
use crate::core::error::{EngineResult, MalformedGraphError, UnreachableGoalError};
use crate::core::graph::{GraphModel, Weight, MAX_REQUIRED_NODES};

/// 路由结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// 完整路线的节点下标序列
    pub nodes: Vec<usize>,
    /// 路线总权重
    pub weight: Weight,
    /// 必经节点的最优访问顺序
    pub visit_order: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredNodeRouter {
    solver: ShortestPathSolver,
}

impl RequiredNodeRouter {
    pub fn new(solver: ShortestPathSolver) -> Self {
        Self { solver }
    }

    /// 按图自身的起点、终点和必经节点求最优路线
    pub fn route_graph(&self, graph: &GraphModel) -> EngineResult<Route> {
        self.route(graph, graph.start(), graph.goal(), graph.required())
    }

    /// 求从 `start` 到 `goal` 且经过 `required` 中全部节点的最优路线
    ///
    /// 与起点或终点重复的必经节点视为已满足
    pub fn route<G>(
        &self,
        graph: &G,
        start: usize,
        goal: usize,
        required: &[usize],
    ) -> EngineResult<Route>
    where
        G: WeightedDigraph + Sync,
    {
        let unreachable =
            || UnreachableGoalError::new(graph.node_name(start), graph.node_name(goal));

        let mut waypoints: Vec<usize> = Vec::with_capacity(required.len());
        for &node in required {
            if node != start && node != goal && !waypoints.contains(&node) {
                waypoints.push(node);
            }
        }

        if waypoints.is_empty() {
            return match self.solver.shortest_path(graph, start, goal)? {
                Some((nodes, weight)) => Ok(Route {
                    nodes,
                    weight,
                    visit_order: Vec::new(),
                }),
                None => Err(unreachable().into()),
            };
        }

        let k = waypoints.len();
        if k > MAX_REQUIRED_NODES {
            return Err(MalformedGraphError::TooManyRequiredNodes {
                count: k,
                max: MAX_REQUIRED_NODES,
            }
            .into());
        }

        let mut sources = Vec::with_capacity(k + 1);
        sources.push(start);
        sources.extend_from_slice(&waypoints);
        let table = self.solver.distance_table(graph, &sources)?;

        if let Some(&blocking) = waypoints.iter().find(|&&node| {
            table.distance(start, node).is_none() || table.distance(node, goal).is_none()
        }) {
            return Err(unreachable()
                .with_blocking_node(graph.node_name(blocking))
                .into());
        }

        let states = 1usize << k;
        let full = states - 1;
        let mut cost = vec![INFINITY; states * k];
        let mut parent: Vec<Option<usize>> = vec![None; states * k];

        for (i, &node) in waypoints.iter().enumerate() {
            if let Some(distance) = table.distance(start, node) {
                cost[(1 << i) * k + i] = distance;
            }
        }

        for mask in 1..states {
            for i in 0..k {
                if mask & (1 << i) == 0 {
                    continue;
                }
                let current = cost[mask * k + i];
                if current == INFINITY {
                    continue;
                }
                for j in 0..k {
                    if mask & (1 << j) != 0 {
                        continue;
                    }
                    let Some(step) = table.distance(waypoints[i], waypoints[j]) else {
                        continue;
                    };
                    let slot = (mask | (1 << j)) * k + j;
                    let candidate = current.saturating_add(step);
                    if candidate < cost[slot] {
                        cost[slot] = candidate;
                        parent[slot] = Some(i);
                    }
                }
            }
        }

        let mut best: Option<(usize, Weight)> = None;
        for i in 0..k {
            let current = cost[full * k + i];
            if current == INFINITY {
                continue;
            }
            let Some(tail) = table.distance(waypoints[i], goal) else {
                continue;
            };
            let total = current.saturating_add(tail);
            if best.map_or(true, |(_, weight)| total < weight) {
                best = Some((i, total));
            }
        }
        let (last, weight) = best.ok_or_else(unreachable)?;

        let mut visit_order = Vec::with_capacity(k);
        let mut mask = full;
        let mut cursor = Some(last);
        while let Some(i) = cursor {
            visit_order.push(waypoints[i]);
            cursor = parent[mask * k + i];
            mask &= !(1 << i);
        }
        visit_order.reverse();

        let mut nodes = vec![start];
        let mut from = start;
        for &to in visit_order.iter().chain(std::iter::once(&goal)) {
            let segment = table.path(from, to).ok_or_else(unreachable)?;
            nodes.extend(segment.into_iter().skip(1));
            from = to;
        }

        log::debug!(
            "必经节点路由完成: 必经节点数={}, 总权重={}, 路线长度={}",
            k,
            weight,
            nodes.len()
        );

        Ok(Route {
            nodes,
            weight,
            visit_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;
    use crate::services::algorithm::graph::AdjacencyList;

    fn order_sensitive_graph() -> AdjacencyList {
        // 0 起点, 3 终点; 先 2 后 1 代价为 3，先 1 后 2 代价为 21
        AdjacencyList::from_edges(
            4,
            &[(0, 2, 1), (2, 1, 1), (1, 3, 1), (0, 1, 1), (1, 2, 10), (2, 3, 10)],
        )
    }

    #[test]
    fn test_no_required_is_plain_shortest_path() {
        let router = RequiredNodeRouter::default();
        let route = router
            .route(&order_sensitive_graph(), 0, 3, &[])
            .expect("goal is reachable");
        assert_eq!(route.nodes, vec![0, 1, 3]);
        assert_eq!(route.weight, 2);
        assert!(route.visit_order.is_empty());
    }

    #[test]
    fn test_visit_order_is_free() {
        let router = RequiredNodeRouter::default();
        let route = router
            .route(&order_sensitive_graph(), 0, 3, &[1, 2])
            .expect("route exists");
        assert_eq!(route.visit_order, vec![2, 1]);
        assert_eq!(route.nodes, vec![0, 2, 1, 3]);
        assert_eq!(route.weight, 3);
    }

    #[test]
    fn test_same_result_with_single_source_tables() {
        let small = RequiredNodeRouter::new(ShortestPathSolver::new(40))
            .route(&order_sensitive_graph(), 0, 3, &[1, 2])
            .expect("route exists");
        let large = RequiredNodeRouter::new(ShortestPathSolver::new(1))
            .route(&order_sensitive_graph(), 0, 3, &[1, 2])
            .expect("route exists");
        assert_eq!(small, large);
    }

    #[test]
    fn test_required_duplicates_and_endpoints_ignored() {
        let router = RequiredNodeRouter::default();
        let route = router
            .route(&order_sensitive_graph(), 0, 3, &[0, 3, 2, 2])
            .expect("route exists");
        assert_eq!(route.visit_order, vec![2]);
        assert_eq!(route.nodes, vec![0, 2, 1, 3]);
        assert_eq!(route.weight, 3);
    }

    #[test]
    fn test_isolated_required_node_is_named() {
        let graph = AdjacencyList::from_edges(4, &[(0, 1, 1), (1, 3, 1), (3, 2, 1)]);
        let err = RequiredNodeRouter::default()
            .route(&graph, 0, 3, &[2])
            .expect_err("2 cannot reach the goal");
        match err {
            EngineError::UnreachableGoal(err) => {
                assert_eq!(err.blocking_node.as_deref(), Some("2"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_jointly_infeasible_required_nodes() {
        // 1 和 2 各自可达且都能到终点，但彼此不可达
        let graph = AdjacencyList::from_edges(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
        let err = RequiredNodeRouter::default()
            .route(&graph, 0, 3, &[1, 2])
            .expect_err("no route visits both 1 and 2");
        match err {
            EngineError::UnreachableGoal(err) => assert!(err.blocking_node.is_none()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_goal_without_required() {
        let graph = AdjacencyList::from_edges(3, &[(0, 1, 1)]);
        let err = RequiredNodeRouter::default()
            .route(&graph, 0, 2, &[])
            .expect_err("goal unreachable");
        assert!(matches!(err, EngineError::UnreachableGoal(_)));
    }
}
