//! 对外接口
//!
//! 宿主应用（HTTP 处理器、批处理任务、测试工具）只需要这里的三个操作；
//! 传输格式、存储结构由外部决定

pub mod engine;

pub use engine::{OptimalPath, PuzzleEngine};

use crate::core::error::{EngineResult, GraphGenerationError};
use crate::core::graph::GraphModel;
use crate::core::path::Path;
use crate::services::evaluation::ScoreResult;
use crate::services::generator::GeneratorConfig;

/// 使用默认引擎配置生成图
pub fn generate_graph(config: &GeneratorConfig) -> Result<GraphModel, GraphGenerationError> {
    PuzzleEngine::default().generate_graph(config)
}

/// 使用默认引擎配置计算最优路线
pub fn compute_optimal_path(graph: &GraphModel) -> EngineResult<OptimalPath> {
    PuzzleEngine::default().compute_optimal_path(graph)
}

/// 使用默认引擎配置评估提交
pub fn evaluate_submission(graph: &GraphModel, submitted: &Path) -> EngineResult<ScoreResult> {
    PuzzleEngine::default().evaluate_submission(graph, submitted)
}
