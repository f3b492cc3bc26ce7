//! 图生成配置与难度档位

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::GraphGenerationError;
use crate::core::graph::{Weight, MAX_REQUIRED_NODES, MAX_TOTAL_WEIGHT};

/// 闭区间权重范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: Weight,
    pub max: Weight,
}

impl WeightRange {
    pub fn new(min: Weight, max: Weight) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, weight: Weight) -> bool {
        (self.min..=self.max).contains(&weight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub node_count: usize,
    /// 随机边占全部 n*(n-1) 个有序节点对的比例
    pub edge_density: f64,
    pub weight_range: WeightRange,
    pub required_node_count: usize,
    pub seed: u64,
    /// 同一有序节点对之间允许的最大边数
    pub max_parallel_edges: usize,
    /// 必经节点组合不可行时的最大重新抽样次数
    pub max_retries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: 8,
            edge_density: 0.3,
            weight_range: WeightRange::new(1, 9),
            required_node_count: 0,
            seed: 0,
            max_parallel_edges: 1,
            max_retries: 32,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_required(mut self, required_node_count: usize) -> Self {
        self.required_node_count = required_node_count;
        self
    }

    pub fn validate(&self) -> Result<(), GraphGenerationError> {
        if self.node_count < 2 {
            return Err(GraphGenerationError::invalid_config(format!(
                "节点数至少为 2，实际为 {}",
                self.node_count
            )));
        }
        if self.weight_range.min <= 0 || self.weight_range.min > self.weight_range.max {
            return Err(GraphGenerationError::invalid_config(format!(
                "权重范围 [{}, {}] 不合法，下限必须为正且不大于上限",
                self.weight_range.min, self.weight_range.max
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_density) {
            return Err(GraphGenerationError::invalid_config(format!(
                "边密度 {} 必须在 [0, 1] 之间",
                self.edge_density
            )));
        }
        if self.max_parallel_edges == 0 {
            return Err(GraphGenerationError::invalid_config(
                "max_parallel_edges 至少为 1",
            ));
        }
        if self.required_node_count > self.node_count - 2 {
            return Err(GraphGenerationError::invalid_config(format!(
                "必经节点数 {} 超过了除起点和终点外的节点数 {}",
                self.required_node_count,
                self.node_count - 2
            )));
        }
        if self.required_node_count > MAX_REQUIRED_NODES {
            return Err(GraphGenerationError::invalid_config(format!(
                "必经节点数 {} 超过上限 {}",
                self.required_node_count, MAX_REQUIRED_NODES
            )));
        }
        if self.required_node_count > 0 && self.max_retries == 0 {
            return Err(GraphGenerationError::invalid_config(
                "需要必经节点时 max_retries 至少为 1",
            ));
        }
        let heaviest = Weight::try_from(self.target_edge_count())
            .ok()
            .and_then(|edges| edges.checked_mul(self.weight_range.max));
        if heaviest.map_or(true, |total| total > MAX_TOTAL_WEIGHT) {
            return Err(GraphGenerationError::invalid_config(format!(
                "权重上限 {} 过大，{} 条边的权重总和可能超过 {}",
                self.weight_range.max,
                self.target_edge_count(),
                MAX_TOTAL_WEIGHT
            )));
        }
        Ok(())
    }

    /// 目标边数，至少包含生成链的 n-1 条边
    pub fn target_edge_count(&self) -> usize {
        let pairs = self.node_count * self.node_count.saturating_sub(1);
        let wanted = (self.edge_density * pairs as f64).round() as usize;
        wanted
            .max(self.node_count.saturating_sub(1))
            .min(pairs * self.max_parallel_edges)
    }
}

/// 难度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn config(&self, seed: u64) -> GeneratorConfig {
        let (node_count, edge_density, weight_range, required_node_count) = match self {
            Difficulty::Easy => (6, 0.2, WeightRange::new(1, 5), 0),
            Difficulty::Medium => (9, 0.25, WeightRange::new(1, 9), 1),
            Difficulty::Hard => (14, 0.3, WeightRange::new(1, 15), 3),
        };
        GeneratorConfig {
            node_count,
            edge_density,
            weight_range,
            required_node_count,
            seed,
            ..GeneratorConfig::default()
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("未知难度: {}", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}
