//! 引擎集成测试
//!
//! 测试范围：
//! - 示例图上的最优路线、评分与非法移动
//! - 必经节点对最优路线的影响
//! - 批量评估与缓存最优权重的评估
//! - 图的 JSON 线上格式

mod common;

use common::{example_graph, example_graph_with_required, example_spec};
use graphquest::api::{self, PuzzleEngine};
use graphquest::core::error::{EngineError, ErrorCode, InvalidPathError, ToPublicError};
use graphquest::core::{GraphModel, Path};
use graphquest::services::PathStatus;

#[test]
fn test_optimal_route_on_example_graph() {
    let optimal = api::compute_optimal_path(&example_graph()).expect("终点可达");
    assert_eq!(optimal.path, Path::new(["A", "C", "E", "F"]));
    assert_eq!(optimal.total_weight, 7);
    assert!(optimal.visit_order.is_empty());
}

#[test]
fn test_suboptimal_submission_scored() {
    let score = api::evaluate_submission(&example_graph(), &Path::new(["A", "B", "D", "F"]))
        .expect("路径合法");
    assert_eq!(score.submitted_weight, 10);
    assert_eq!(score.optimal_weight, 7);
    assert_eq!(score.delta, 3);
    assert!(!score.is_optimal);
    assert!(score.satisfies_required_nodes);
    assert_eq!(score.status, PathStatus::Complete);
}

#[test]
fn test_required_node_already_on_optimal_route() {
    let graph = example_graph_with_required(&["E"]);
    let optimal = api::compute_optimal_path(&graph).expect("终点可达");
    assert_eq!(optimal.path, Path::new(["A", "C", "E", "F"]));
    assert_eq!(optimal.total_weight, 7);
    assert_eq!(optimal.visit_order, vec!["E".to_string()]);

    let score = api::evaluate_submission(&graph, &optimal.path).expect("路径合法");
    assert!(score.is_optimal);
    assert!(score.satisfies_required_nodes);
}

#[test]
fn test_required_node_forces_detour() {
    let graph = example_graph_with_required(&["B"]);
    let optimal = api::compute_optimal_path(&graph).expect("终点可达");
    assert_eq!(optimal.path, Path::new(["A", "B", "D", "F"]));
    assert_eq!(optimal.total_weight, 10);

    // 原本最短的路线漏掉了 B
    let score = api::evaluate_submission(&graph, &Path::new(["A", "C", "E", "F"]))
        .expect("路径合法");
    assert!(!score.satisfies_required_nodes);
    assert!(!score.is_optimal);
    assert_eq!(score.delta, 0);
}

#[test]
fn test_illegal_move_reported_with_pair() {
    let err = api::evaluate_submission(&example_graph(), &Path::new(["A", "D"]))
        .expect_err("A 到 D 没有边");
    match &err {
        EngineError::InvalidPath(inner) => {
            assert_eq!(inner.offending_pair(), Some(("A", "D")));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_error_code(), ErrorCode::InvalidPath);
    assert!(err.to_public_error().message.contains("A"));
}

#[test]
fn test_wrong_start_and_empty_path() {
    let graph = example_graph();
    let err = api::evaluate_submission(&graph, &Path::new(["C", "E", "F"]))
        .expect_err("没有从起点出发");
    assert!(matches!(
        err,
        EngineError::InvalidPath(InvalidPathError::WrongStart { .. })
    ));

    let err = api::evaluate_submission(&graph, &Path::default()).expect_err("空路径");
    assert!(matches!(err, EngineError::InvalidPath(InvalidPathError::Empty)));
}

#[test]
fn test_incomplete_path_is_not_optimal() {
    let score = api::evaluate_submission(&example_graph(), &Path::new(["A", "C"]))
        .expect("前缀合法");
    assert_eq!(score.status, PathStatus::Incomplete);
    assert_eq!(score.submitted_weight, 3);
    assert_eq!(score.delta, 0);
    assert!(!score.is_optimal);
}

#[test]
fn test_batch_matches_individual_evaluation() {
    let engine = PuzzleEngine::default();
    let graph = example_graph();
    let submissions: Vec<Path> = ["A,C,E,F", "A,B,D,F", "A,D", "A,C"]
        .iter()
        .map(|raw| raw.parse().expect("解析不会失败"))
        .collect();

    let batch = engine
        .evaluate_batch(&graph, &submissions)
        .expect("最优路线存在");
    assert_eq!(batch.len(), submissions.len());
    for (submitted, result) in submissions.iter().zip(&batch) {
        match (engine.evaluate_submission(&graph, submitted), result) {
            (Ok(single), Ok(batched)) => assert_eq!(&single, batched),
            (Err(_), Err(_)) => {}
            (single, batched) => panic!("结果不一致: {:?} vs {:?}", single, batched),
        }
    }
}

#[test]
fn test_evaluate_with_cached_optimum() {
    let engine = PuzzleEngine::default();
    let graph = example_graph();
    let optimal = engine.compute_optimal_path(&graph).expect("终点可达");
    let score = engine
        .evaluate_with_optimum(&graph, &Path::new(["A", "B", "D", "F"]), optimal.total_weight)
        .expect("路径合法");
    assert_eq!(score.delta, 3);
}

#[test]
fn test_graph_json_wire_form() {
    let graph = example_graph_with_required(&["E"]);
    let json = serde_json::to_value(&graph).expect("序列化成功");
    assert_eq!(json["startNodeId"], "A");
    assert_eq!(json["goalNodeId"], "F");
    assert_eq!(json["requiredNodeIds"][0], "E");
    assert_eq!(json["edges"].as_array().map(Vec::len), Some(6));

    let restored: GraphModel = serde_json::from_value(json).expect("反序列化成功");
    assert_eq!(restored, graph);
}

#[test]
fn test_malformed_json_rejected() {
    let mut spec = example_spec();
    spec.edges[0].weight = 0;
    let json = serde_json::to_string(&spec).expect("序列化成功");
    assert!(serde_json::from_str::<GraphModel>(&json).is_err());

    let mut spec = example_spec();
    spec.goal_node_id = "Z".to_string();
    let json = serde_json::to_string(&spec).expect("序列化成功");
    assert!(serde_json::from_str::<GraphModel>(&json).is_err());
}
