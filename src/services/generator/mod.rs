//! 随机图生成
//!
//! 生成步骤：
//! 1. 创建节点并给出互不重叠的布局坐标
//! 2. 随机排列节点，起点排第一、终点排在其后，相邻节点间连一条正向边，
//!    由此保证起点到终点一定可达
//! 3. 随机补边直到目标密度，拒绝自环和超出重数上限的重复节点对
//! 4. 需要必经节点时，从起点可达的节点中抽样，并验证每个节点都能到达终点、
//!    整个组合存在可行路线，否则在有限次数内重新抽样
//!
//! 随机数发生器只由配置中的种子创建并作为参数传递，相同的种子和配置
//! 生成逐字节相同的图

pub mod config;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub use config::{Difficulty, GeneratorConfig, WeightRange};

use crate::core::error::{EngineError, GraphGenerationError};
use crate::core::graph::{Edge, GraphModel, GraphSpec, Node, Position, Weight};
use crate::services::algorithm::{Dijkstra, RequiredNodeRouter, ShortestPathSolver};

/// 布局网格的单元格边长
const CELL_SIZE: f64 = 100.0;
/// 单元格内的最大随机偏移，小于单元格边长因此节点不会重叠
const CELL_JITTER: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphGenerator {
    router: RequiredNodeRouter,
}

impl GraphGenerator {
    pub fn new(solver: ShortestPathSolver) -> Self {
        Self {
            router: RequiredNodeRouter::new(solver),
        }
    }

    /// 按配置中的种子生成一张图
    pub fn generate(&self, config: &GeneratorConfig) -> Result<GraphModel, GraphGenerationError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        self.generate_with_rng(config, &mut rng)
    }

    /// 使用调用方提供的随机数发生器生成图，忽略配置中的种子
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<GraphModel, GraphGenerationError> {
        config.validate()?;
        log::debug!(
            "开始生成图: 节点数={}, 边密度={}, 必经节点数={}, 种子={}",
            config.node_count,
            config.edge_density,
            config.required_node_count,
            config.seed
        );

        let nodes = layout_nodes(config.node_count, rng);
        let (start, goal, mut arcs) = spanning_chain(config, rng);
        add_random_arcs(config, rng, &mut arcs);

        let edges: Vec<Edge> = arcs
            .iter()
            .enumerate()
            .map(|(i, &(from, to, weight))| {
                Edge::new(format!("e{}", i), node_id(from), node_id(to), weight)
            })
            .collect();
        let base = GraphModel::new(GraphSpec::new(nodes, edges, node_id(start), node_id(goal)))?;

        if config.required_node_count == 0 {
            log::info!(
                "图生成完成: 节点数={}, 边数={}",
                base.node_count(),
                base.edge_count()
            );
            return Ok(base);
        }
        self.pick_required(&base, config, rng)
    }

    fn pick_required<R: Rng + ?Sized>(
        &self,
        base: &GraphModel,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<GraphModel, GraphGenerationError> {
        let wanted = config.required_node_count;
        let (start, goal) = (base.start(), base.goal());
        let from_start = Dijkstra::shortest_distances(base, start)
            .map_err(|err| GraphGenerationError::Solver(err.to_string()))?;
        let candidates: Vec<usize> = (0..base.node_count())
            .filter(|&node| node != start && node != goal && from_start.is_reachable(node))
            .collect();

        let mut reaches_goal: HashMap<usize, bool> = HashMap::new();
        for attempt in 1..=config.max_retries {
            let mut pool = candidates.clone();
            pool.shuffle(rng);

            let mut chosen = Vec::with_capacity(wanted);
            for candidate in pool {
                if chosen.len() == wanted {
                    break;
                }
                let ok = match reaches_goal.get(&candidate) {
                    Some(&ok) => ok,
                    None => {
                        let ok = Dijkstra::shortest_distances(base, candidate)
                            .map_err(|err| GraphGenerationError::Solver(err.to_string()))?
                            .is_reachable(goal);
                        reaches_goal.insert(candidate, ok);
                        ok
                    }
                };
                if ok {
                    chosen.push(candidate);
                } else {
                    log::trace!(
                        "候选必经节点 {} 无法到达终点，重新抽样",
                        base.node_id(candidate)
                    );
                }
            }

            // 所有候选都已验证过，重新抽样也凑不够
            if chosen.len() < wanted {
                return Err(GraphGenerationError::NotEnoughCandidates {
                    requested: wanted,
                    available: chosen.len(),
                });
            }

            chosen.sort_unstable();
            let model = base.with_required(chosen.iter().map(|&node| base.node_id(node)))?;
            match self.router.route_graph(&model) {
                Ok(route) => {
                    log::info!(
                        "图生成完成: 节点数={}, 边数={}, 必经节点={:?}, 最优权重={}, 抽样次数={}",
                        model.node_count(),
                        model.edge_count(),
                        model.required_ids().collect::<Vec<_>>(),
                        route.weight,
                        attempt
                    );
                    return Ok(model);
                }
                Err(EngineError::UnreachableGoal(err)) => {
                    log::debug!("第 {} 次抽样的必经节点组合不可行: {}", attempt, err);
                }
                Err(other) => return Err(GraphGenerationError::Solver(other.to_string())),
            }
        }

        log::warn!(
            "重试 {} 次后仍无法选出可行的必经节点组合",
            config.max_retries
        );
        Err(GraphGenerationError::RequiredNodesInfeasible {
            attempts: config.max_retries,
        })
    }
}

fn node_id(index: usize) -> String {
    format!("n{}", index)
}

/// 0 -> A, 25 -> Z, 26 -> AA
fn node_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// 每个节点占据网格中的一个单元格，在单元格内随机偏移
fn layout_nodes<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Node> {
    let columns = ((count as f64).sqrt().ceil() as usize).max(1);
    (0..count)
        .map(|index| {
            let column = (index % columns) as f64;
            let row = (index / columns) as f64;
            let x = column * CELL_SIZE + rng.gen_range(0.0..CELL_JITTER);
            let y = row * CELL_SIZE + rng.gen_range(0.0..CELL_JITTER);
            Node::new(node_id(index), node_label(index)).with_position(Position::new(x, y))
        })
        .collect()
}

/// 随机排列节点并沿排列连边，返回 (起点, 终点, 边列表)
fn spanning_chain<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> (usize, usize, Vec<(usize, usize, Weight)>) {
    let n = config.node_count;
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    // 终点放在排列的后半段，路线不会过短
    let goal_position = rng.gen_range(((n + 1) / 2).max(1)..n);
    let arcs = order
        .windows(2)
        .map(|pair| (pair[0], pair[1], random_weight(config, rng)))
        .collect();
    (order[0], order[goal_position], arcs)
}

fn add_random_arcs<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
    arcs: &mut Vec<(usize, usize, Weight)>,
) {
    let n = config.node_count;
    let target = config.target_edge_count();

    let mut multiplicity: HashMap<(usize, usize), usize> = HashMap::new();
    for &(from, to, _) in arcs.iter() {
        *multiplicity.entry((from, to)).or_insert(0) += 1;
    }

    let max_attempts = target * 20 + 100;
    let mut attempts = 0;
    while arcs.len() < target && attempts < max_attempts {
        attempts += 1;
        let from = rng.gen_range(0..n);
        let to = rng.gen_range(0..n);
        if from == to {
            continue;
        }
        let count = multiplicity.entry((from, to)).or_insert(0);
        if *count >= config.max_parallel_edges {
            continue;
        }
        *count += 1;
        arcs.push((from, to, random_weight(config, rng)));
    }

    if arcs.len() < target {
        log::debug!("随机补边在 {} 次尝试后停止: {}/{}", attempts, arcs.len(), target);
    }
}

fn random_weight<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Weight {
    rng.gen_range(config.weight_range.min..=config.weight_range.max)
}
