//! 最短路径求解器
//!
//! 按图的规模在两种策略之间选择：
//! - 节点数不超过阈值：Floyd-Warshall 全源矩阵
//! - 节点数超过阈值：从需要的源点分别运行 Dijkstra
//!
//! 两种策略在阈值以下的图上给出完全相同的距离

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::dijkstra::Dijkstra;
use super::distance_table::DistanceTable;
use super::floyd_warshall::FloydWarshall;
use super::graph::WeightedDigraph;
use crate::core::error::InvalidWeightError;
use crate::core::graph::Weight;

/// 默认的全源策略节点数上限
pub const DEFAULT_ALL_PAIRS_THRESHOLD: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SingleSource,
    AllPairs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestPathSolver {
    all_pairs_threshold: usize,
}

impl Default for ShortestPathSolver {
    fn default() -> Self {
        Self::new(DEFAULT_ALL_PAIRS_THRESHOLD)
    }
}

impl ShortestPathSolver {
    pub fn new(all_pairs_threshold: usize) -> Self {
        Self {
            all_pairs_threshold,
        }
    }

    pub fn all_pairs_threshold(&self) -> usize {
        self.all_pairs_threshold
    }

    pub fn strategy_for<G: WeightedDigraph>(&self, graph: &G) -> Strategy {
        if graph.node_count() <= self.all_pairs_threshold {
            Strategy::AllPairs
        } else {
            Strategy::SingleSource
        }
    }

    /// 计算覆盖 `sources` 中所有源点的距离表
    ///
    /// 全源策略忽略 `sources`，一次得到完整矩阵；
    /// 单源策略对每个不同的源点并行运行 Dijkstra
    pub fn distance_table<G>(
        &self,
        graph: &G,
        sources: &[usize],
    ) -> Result<DistanceTable, InvalidWeightError>
    where
        G: WeightedDigraph + Sync,
    {
        let strategy = self.strategy_for(graph);
        log::debug!(
            "求解距离表: 节点数={}, 源点数={}, 策略={:?}",
            graph.node_count(),
            sources.len(),
            strategy
        );

        match strategy {
            Strategy::AllPairs => Ok(DistanceTable::AllPairs(FloydWarshall::shortest_paths(
                graph,
            )?)),
            Strategy::SingleSource => {
                let mut unique = sources.to_vec();
                unique.sort_unstable();
                unique.dedup();

                let results = unique
                    .par_iter()
                    .map(|&source| {
                        Dijkstra::shortest_distances(graph, source).map(|table| (source, table))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DistanceTable::SingleSource(
                    results.into_iter().collect::<BTreeMap<_, _>>(),
                ))
            }
        }
    }

    /// 点到点最短路径
    pub fn shortest_path<G>(
        &self,
        graph: &G,
        from: usize,
        to: usize,
    ) -> Result<Option<(Vec<usize>, Weight)>, InvalidWeightError>
    where
        G: WeightedDigraph + Sync,
    {
        match self.strategy_for(graph) {
            Strategy::AllPairs => {
                let table = FloydWarshall::shortest_paths(graph)?;
                Ok(table
                    .reconstruct_path(from, to)
                    .zip(table.distance(from, to)))
            }
            Strategy::SingleSource => Dijkstra::shortest_path(graph, from, to),
        }
    }
}
