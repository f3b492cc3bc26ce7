//! 引擎门面
//!
//! 对外暴露三个操作：生成图、计算最优路线、评估提交。
//! 引擎本身不持有可变状态，可以在多个请求间共享并并行调用

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::error::{EngineResult, GraphGenerationError, InvalidPathError};
use crate::core::graph::{GraphModel, Weight};
use crate::core::path::Path;
use crate::services::algorithm::{RequiredNodeRouter, ShortestPathSolver, Strategy};
use crate::services::evaluation::{PathValidator, ScoreResult, Scorer};
use crate::services::generator::{Difficulty, GeneratorConfig, GraphGenerator};

/// 最优路线
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalPath {
    pub path: Path,
    pub total_weight: Weight,
    /// 必经节点的最优访问顺序
    pub visit_order: Vec<String>,
    /// 求解时使用的策略
    pub strategy: Strategy,
}

/// 图计算引擎
///
/// # 示例
///
/// ```rust
/// use graphquest::api::PuzzleEngine;
/// use graphquest::services::Difficulty;
///
/// let engine = PuzzleEngine::default();
/// let graph = engine
///     .generate_for_difficulty(Difficulty::Easy, 42)
///     .expect("easy graphs always generate");
/// let optimal = engine.compute_optimal_path(&graph).expect("goal is reachable");
/// let score = engine
///     .evaluate_submission(&graph, &optimal.path)
///     .expect("the optimal path is legal");
/// assert!(score.is_optimal);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PuzzleEngine {
    solver: ShortestPathSolver,
    router: RequiredNodeRouter,
    generator: GraphGenerator,
}

impl PuzzleEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_solver(ShortestPathSolver::new(config.all_pairs_threshold))
    }

    pub fn with_solver(solver: ShortestPathSolver) -> Self {
        Self {
            solver,
            router: RequiredNodeRouter::new(solver),
            generator: GraphGenerator::new(solver),
        }
    }

    pub fn solver(&self) -> &ShortestPathSolver {
        &self.solver
    }

    /// 按配置生成图
    ///
    /// # 参数
    /// - `config`: 生成配置，其中的种子决定结果
    ///
    /// # 返回
    /// 满足全部结构不变量的图；无法在有限重试内满足必经节点可行性时返回错误
    pub fn generate_graph(&self, config: &GeneratorConfig) -> Result<GraphModel, GraphGenerationError> {
        self.generator.generate(config)
    }

    pub fn generate_for_difficulty(
        &self,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<GraphModel, GraphGenerationError> {
        self.generate_graph(&difficulty.config(seed))
    }

    /// 计算经过全部必经节点的最优路线
    pub fn compute_optimal_path(&self, graph: &GraphModel) -> EngineResult<OptimalPath> {
        let route = self.router.route_graph(graph)?;
        Ok(OptimalPath {
            path: Path::from_indices(graph, &route.nodes),
            total_weight: route.weight,
            visit_order: route
                .visit_order
                .iter()
                .map(|&node| graph.node_id(node).to_string())
                .collect(),
            strategy: self.solver.strategy_for(graph),
        })
    }

    /// 校验并评分玩家提交的路径
    ///
    /// 非法移动优先于最优解的计算报告
    pub fn evaluate_submission(&self, graph: &GraphModel, submitted: &Path) -> EngineResult<ScoreResult> {
        let validated = PathValidator::validate(graph, submitted)?;
        let optimal = self.compute_optimal_path(graph)?;
        Ok(Scorer::score(graph, &validated, optimal.total_weight))
    }

    /// 使用调用方缓存的最优权重评分，跳过重新求解
    pub fn evaluate_with_optimum(
        &self,
        graph: &GraphModel,
        submitted: &Path,
        optimal_weight: Weight,
    ) -> Result<ScoreResult, InvalidPathError> {
        let validated = PathValidator::validate(graph, submitted)?;
        Ok(Scorer::score(graph, &validated, optimal_weight))
    }

    /// 并行评估同一张图上的多份提交，最优解只计算一次
    pub fn evaluate_batch(
        &self,
        graph: &GraphModel,
        submissions: &[Path],
    ) -> EngineResult<Vec<Result<ScoreResult, InvalidPathError>>> {
        let optimal = self.compute_optimal_path(graph)?;
        log::debug!(
            "批量评估: 提交数={}, 最优权重={}",
            submissions.len(),
            optimal.total_weight
        );
        Ok(submissions
            .par_iter()
            .map(|submitted| self.evaluate_with_optimum(graph, submitted, optimal.total_weight))
            .collect())
    }
}
