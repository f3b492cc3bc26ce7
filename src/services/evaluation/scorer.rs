//! 评分
//!
//! 沿路径逐步累加边权重（平行边取最便宜的一条），
//! 与最优权重比较得到差值。加分、提示、计时等展示逻辑不在这里

use serde::{Deserialize, Serialize};

use super::validator::{PathStatus, ValidatedPath};
use crate::core::graph::{GraphModel, Weight};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub submitted_weight: Weight,
    pub optimal_weight: Weight,
    /// 提交权重与最优权重之差
    ///
    /// 完整且经过全部必经节点的路径不截断，只有最优权重过期时才会为负；
    /// 其余路径截断到 0
    pub delta: Weight,
    pub is_optimal: bool,
    pub satisfies_required_nodes: bool,
    pub status: PathStatus,
}

pub struct Scorer;

impl Scorer {
    /// 路径总权重，路径必须已通过校验
    ///
    /// 反复绕圈的路径可能超出 `Weight` 的范围，此时饱和到 `Weight::MAX`
    pub fn path_weight(graph: &GraphModel, path: &ValidatedPath) -> Weight {
        path.nodes
            .windows(2)
            .filter_map(|hop| graph.cheapest_edge(hop[0], hop[1]))
            .fold(0, |total: Weight, edge| total.saturating_add(edge.weight))
    }

    /// 对已校验的路径评分
    ///
    /// 完整且经过全部必经节点的路径，其差值天然非负，不做截断；
    /// 未完成或漏掉必经节点的路径同样计算差值但截断到 0，且不算最优
    pub fn score(graph: &GraphModel, path: &ValidatedPath, optimal_weight: Weight) -> ScoreResult {
        let submitted_weight = Self::path_weight(graph, path);
        let raw_delta = submitted_weight.saturating_sub(optimal_weight);
        let eligible = path.is_complete() && path.satisfies_required_nodes;

        if eligible && raw_delta < 0 {
            log::warn!(
                "提交路径权重 {} 低于最优权重 {}，最优解可能已过期",
                submitted_weight,
                optimal_weight
            );
        }

        let delta = if eligible { raw_delta } else { raw_delta.max(0) };
        ScoreResult {
            submitted_weight,
            optimal_weight,
            delta,
            is_optimal: eligible && delta <= 0,
            satisfies_required_nodes: path.satisfies_required_nodes,
            status: path.status,
        }
    }
}
