//! 集成测试共享工具模块
//!
//! 提供示例图夹具，以及用于交叉验证的暴力求解

#![allow(dead_code)]

use graphquest::core::{Edge, GraphModel, GraphSpec, Node, Weight};
use graphquest::services::algorithm::Dijkstra;

/// 六个节点的示例图
///
/// A→C→E→F 权重 7 为最短路径，A→B→D→F 权重 10
pub fn example_spec() -> GraphSpec {
    let nodes = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|id| Node::new(*id, *id))
        .collect();
    GraphSpec::new(
        nodes,
        vec![
            Edge::new("e1", "A", "C", 3),
            Edge::new("e2", "C", "E", 2),
            Edge::new("e3", "E", "F", 2),
            Edge::new("e4", "A", "B", 1),
            Edge::new("e5", "B", "D", 4),
            Edge::new("e6", "D", "F", 5),
        ],
        "A",
        "F",
    )
}

pub fn example_graph() -> GraphModel {
    GraphModel::new(example_spec()).expect("示例图应该合法")
}

pub fn example_graph_with_required(required: &[&str]) -> GraphModel {
    GraphModel::new(example_spec().with_required(required.iter().copied()))
        .expect("示例图应该合法")
}

/// 枚举必经节点的全部访问顺序，返回最小总权重
pub fn brute_force_route_weight(graph: &GraphModel) -> Option<Weight> {
    let mut waypoints: Vec<usize> = graph
        .required()
        .iter()
        .copied()
        .filter(|&node| node != graph.start() && node != graph.goal())
        .collect();
    waypoints.sort_unstable();
    waypoints.dedup();

    let distance = |from: usize, to: usize| -> Option<Weight> {
        Dijkstra::shortest_distances(graph, from)
            .expect("权重为正")
            .distance(to)
    };

    let mut best: Option<Weight> = None;
    permute(&mut waypoints, 0, &mut |order: &[usize]| {
        let mut total = 0;
        let mut from = graph.start();
        for &to in order.iter().chain(std::iter::once(&graph.goal())) {
            match distance(from, to) {
                Some(step) => total += step,
                None => return,
            }
            from = to;
        }
        if best.map_or(true, |current| total < current) {
            best = Some(total);
        }
    });
    best
}

fn permute<F: FnMut(&[usize])>(items: &mut Vec<usize>, k: usize, visit: &mut F) {
    if k == items.len() {
        visit(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permute(items, k + 1, visit);
        items.swap(k, i);
    }
}
