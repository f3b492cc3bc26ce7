//! 距离表
//!
//! 统一两种求解策略的结果：小图上的全源矩阵，
//! 或大图上从若干源点分别运行 Dijkstra 得到的单源表

use std::collections::BTreeMap;

use super::dijkstra::SingleSourceResult;
use super::floyd_warshall::AllPairsResult;
use super::solver::Strategy;
use crate::core::graph::Weight;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistanceTable {
    AllPairs(AllPairsResult),
    /// 以源点下标为键的单源结果
    SingleSource(BTreeMap<usize, SingleSourceResult>),
}

impl DistanceTable {
    pub fn strategy(&self) -> Strategy {
        match self {
            DistanceTable::AllPairs(_) => Strategy::AllPairs,
            DistanceTable::SingleSource(_) => Strategy::SingleSource,
        }
    }

    /// 表中是否包含以 `source` 为起点的距离
    pub fn has_source(&self, source: usize) -> bool {
        match self {
            DistanceTable::AllPairs(table) => source < table.node_count(),
            DistanceTable::SingleSource(tables) => tables.contains_key(&source),
        }
    }

    /// 从 `from` 到 `to` 的最短距离，不可达或表中没有该源点时返回 `None`
    pub fn distance(&self, from: usize, to: usize) -> Option<Weight> {
        match self {
            DistanceTable::AllPairs(table) => table.distance(from, to),
            DistanceTable::SingleSource(tables) => tables.get(&from)?.distance(to),
        }
    }

    /// 从 `from` 到 `to` 的最短路径（节点下标序列）
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        match self {
            DistanceTable::AllPairs(table) => table.reconstruct_path(from, to),
            DistanceTable::SingleSource(tables) => tables.get(&from)?.reconstruct_path(to),
        }
    }
}
