//! 有向带权图的不可变值表示
//!
//! 节点和边保存在连续数组中，ID 在构造时一次性映射为下标，
//! 出边邻接表也在构造时预先计算，之后所有组件都按下标访问。

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::types::{Edge, Node, Weight};
use crate::core::error::MalformedGraphError;

/// 必经节点数量上限，子集动态规划的状态数为 k * 2^k
pub const MAX_REQUIRED_NODES: usize = 16;

/// 全部边权重之和的上限
///
/// 经过必经节点的路线最多由 `MAX_REQUIRED_NODES + 1` 段最短路径拼接而成，
/// 每段不超过权重总和，因此任何路线权重都严格小于求解器的不可达哨兵值
pub const MAX_TOTAL_WEIGHT: Weight = Weight::MAX / (MAX_REQUIRED_NODES as Weight + 2);

/// 图的线上表示，反序列化后必须经过 `GraphModel::new` 校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub start_node_id: String,
    pub goal_node_id: String,
    #[serde(default)]
    pub required_node_ids: Vec<String>,
}

impl GraphSpec {
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        start_node_id: impl Into<String>,
        goal_node_id: impl Into<String>,
    ) -> Self {
        Self {
            nodes,
            edges,
            start_node_id: start_node_id.into(),
            goal_node_id: goal_node_id.into(),
            required_node_ids: Vec::new(),
        }
    }

    pub fn with_required<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_node_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// 一轮游戏中使用的图，创建后不再修改，可以在线程间自由共享
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphSpec", into = "GraphSpec")]
pub struct GraphModel {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    start: usize,
    goal: usize,
    required: Vec<usize>,
    index: HashMap<String, usize>,
    /// 每个节点的出边下标
    outgoing: Vec<Vec<usize>>,
    /// 每条边的 (from, to) 节点下标
    endpoints: Vec<(usize, usize)>,
}

impl GraphModel {
    /// 校验全部结构不变量并构造图
    ///
    /// 必经节点列表会去重，与起点或终点相同的必经节点视为冗余直接忽略
    pub fn new(spec: GraphSpec) -> Result<Self, MalformedGraphError> {
        let GraphSpec {
            nodes,
            edges,
            start_node_id,
            goal_node_id,
            required_node_ids,
        } = spec;

        if nodes.is_empty() {
            return Err(MalformedGraphError::EmptyGraph);
        }

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(MalformedGraphError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut edge_ids: HashSet<&str> = HashSet::with_capacity(edges.len());
        let mut total_weight: Weight = 0;
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut endpoints = Vec::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(MalformedGraphError::DuplicateEdgeId(edge.id.clone()));
            }
            let lookup = |id: &str| {
                index
                    .get(id)
                    .copied()
                    .ok_or_else(|| MalformedGraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: id.to_string(),
                    })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;
            if from == to {
                return Err(MalformedGraphError::SelfLoop {
                    edge: edge.id.clone(),
                    node: edge.from.clone(),
                });
            }
            if edge.weight <= 0 {
                return Err(MalformedGraphError::NonPositiveWeight {
                    edge: edge.id.clone(),
                    weight: edge.weight,
                });
            }
            total_weight = total_weight
                .checked_add(edge.weight)
                .filter(|&total| total <= MAX_TOTAL_WEIGHT)
                .ok_or(MalformedGraphError::TotalWeightOverflow {
                    max: MAX_TOTAL_WEIGHT,
                })?;
            outgoing[from].push(i);
            endpoints.push((from, to));
        }

        let start = *index
            .get(&start_node_id)
            .ok_or(MalformedGraphError::UnknownStartNode(start_node_id))?;
        let goal = *index
            .get(&goal_node_id)
            .ok_or(MalformedGraphError::UnknownGoalNode(goal_node_id))?;

        let mut required = Vec::new();
        for id in required_node_ids {
            let node = *index
                .get(&id)
                .ok_or(MalformedGraphError::UnknownRequiredNode(id))?;
            if node != start && node != goal && !required.contains(&node) {
                required.push(node);
            }
        }
        if required.len() > MAX_REQUIRED_NODES {
            return Err(MalformedGraphError::TooManyRequiredNodes {
                count: required.len(),
                max: MAX_REQUIRED_NODES,
            });
        }

        let model = Self {
            nodes,
            edges,
            start,
            goal,
            required,
            index,
            outgoing,
            endpoints,
        };
        model.check_reachability()?;
        Ok(model)
    }

    fn check_reachability(&self) -> Result<(), MalformedGraphError> {
        let forward = self.reachable_from(self.start);
        if !forward[self.goal] {
            return Err(MalformedGraphError::GoalUnreachable {
                start: self.start_id().to_string(),
                goal: self.goal_id().to_string(),
            });
        }
        if self.required.is_empty() {
            return Ok(());
        }
        let backward = self.reaching(self.goal);
        match self
            .required
            .iter()
            .find(|&&node| !forward[node] || !backward[node])
        {
            Some(&node) => Err(MalformedGraphError::RequiredNodeIsolated(
                self.node_id(node).to_string(),
            )),
            None => Ok(()),
        }
    }

    /// 返回替换了必经节点集合的新图，原图保持不变
    pub fn with_required<I, S>(&self, ids: I) -> Result<GraphModel, MalformedGraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GraphModel::new(self.to_spec().with_required(ids))
    }

    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            start_node_id: self.start_id().to_string(),
            goal_node_id: self.goal_id().to_string(),
            required_node_ids: self.required_ids().map(str::to_string).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// 下标必须来自本图
    pub fn node_id(&self, index: usize) -> &str {
        &self.nodes[index].id
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn goal(&self) -> usize {
        self.goal
    }

    pub fn start_id(&self) -> &str {
        self.node_id(self.start)
    }

    pub fn goal_id(&self) -> &str {
        self.node_id(self.goal)
    }

    pub fn required(&self) -> &[usize] {
        &self.required
    }

    pub fn required_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.required.iter().map(move |&node| self.node_id(node))
    }

    pub fn has_required(&self) -> bool {
        !self.required.is_empty()
    }

    /// 节点的出边
    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing_with_targets(node).map(|(edge, _)| edge)
    }

    /// 节点的出边以及每条边的目标节点下标
    pub fn outgoing_with_targets(&self, node: usize) -> impl Iterator<Item = (&Edge, usize)> + '_ {
        self.outgoing
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&edge| (&self.edges[edge], self.endpoints[edge].1))
    }

    /// `from -> to` 之间的所有平行边
    pub fn edges_between(&self, from: usize, to: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing_with_targets(from)
            .filter(move |&(_, target)| target == to)
            .map(|(edge, _)| edge)
    }

    /// `from -> to` 之间权重最小的边，权重相同时取先出现的
    pub fn cheapest_edge(&self, from: usize, to: usize) -> Option<&Edge> {
        self.edges_between(from, to).fold(None, |best: Option<&Edge>, edge| match best {
            Some(current) if current.weight <= edge.weight => Some(current),
            _ => Some(edge),
        })
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges_between(from, to).next().is_some()
    }

    /// 从 `source` 出发沿有向边可到达的节点
    pub fn reachable_from(&self, source: usize) -> Vec<bool> {
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        if source < visited.len() {
            visited[source] = true;
            queue.push_back(source);
        }
        while let Some(current) = queue.pop_front() {
            for (_, target) in self.outgoing_with_targets(current) {
                if !visited[target] {
                    visited[target] = true;
                    queue.push_back(target);
                }
            }
        }
        visited
    }

    /// 可以沿有向边到达 `target` 的节点
    fn reaching(&self, target: usize) -> Vec<bool> {
        let mut incoming = vec![Vec::new(); self.nodes.len()];
        for &(from, to) in &self.endpoints {
            incoming[to].push(from);
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        visited[target] = true;
        queue.push_back(target);
        while let Some(current) = queue.pop_front() {
            for &source in &incoming[current] {
                if !visited[source] {
                    visited[source] = true;
                    queue.push_back(source);
                }
            }
        }
        visited
    }
}

impl TryFrom<GraphSpec> for GraphModel {
    type Error = MalformedGraphError;

    fn try_from(spec: GraphSpec) -> Result<Self, Self::Error> {
        GraphModel::new(spec)
    }
}

impl From<GraphModel> for GraphSpec {
    fn from(model: GraphModel) -> Self {
        model.to_spec()
    }
}
