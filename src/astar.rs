//! A* over a [PathingGraph] with a Euclidean heuristic. Search nodes live in an insertion-ordered
//! map so predecessor links are plain slot indices, and the open set is a deque of slots kept
//! sorted by [SearchNode::is_better_choice_than].
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::{debug, info, warn};
use num_traits::Float;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::hash::Hash;

use crate::error::PathingResult;
use crate::path_plan::{PathPlan, Waypoint};
use crate::pathing_graph::PathingGraph;
use crate::pathing_node::NodeId;
use crate::search_node::{Predecessor, SearchNode};
use crate::N_SMALLVEC_SIZE;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// The non-error results of a search. Only [Found](SearchOutcome::Found) carries a plan; partial
/// routes are never returned.
#[derive(Clone, Debug)]
pub enum SearchOutcome<S = f32> {
    Found(PathPlan<S>),
    /// Start and goal are the same node, no search was performed.
    TrivialPath,
    NoPathFound,
    /// The step budget ran out before the goal was reached.
    BudgetExhausted,
}

impl<S> SearchOutcome<S> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn plan(self) -> Option<PathPlan<S>> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            _ => None,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> Option<usize>,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).and_then(|(_, value)| parent(value))
    })
    .filter_map(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// A single-shot A* search. Running it again, or calling [reset](Self::reset), discards all
/// search nodes of the previous run.
///
/// The heuristic is the straight-line distance to the goal. It only stays admissible when every
/// arc weight is at least 1; lighter arcs can make the search settle for a longer route.
#[derive(Clone, Debug)]
pub struct AStarSearch<S = f32> {
    /// Maximum number of node expansions before giving up, unbounded if [None].
    pub step_budget: Option<usize>,
    visited: FxIndexMap<NodeId, SearchNode<S>>,
    open_set: VecDeque<usize>,
    start: Option<NodeId>,
    goal: Option<NodeId>,
    state: SearchState,
    expanded: usize,
}

impl<S: Float> Default for AStarSearch<S> {
    fn default() -> AStarSearch<S> {
        AStarSearch {
            step_budget: None,
            visited: FxIndexMap::default(),
            open_set: VecDeque::new(),
            start: None,
            goal: None,
            state: SearchState::Idle,
            expanded: 0,
        }
    }
}

impl<S: Float> AStarSearch<S> {
    pub fn new() -> AStarSearch<S> {
        AStarSearch::default()
    }

    pub fn with_step_budget(step_budget: usize) -> AStarSearch<S> {
        AStarSearch {
            step_budget: Some(step_budget),
            ..AStarSearch::default()
        }
    }

    /// Drops all search nodes and returns to [SearchState::Idle]. The step budget is kept.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.open_set.clear();
        self.start = None;
        self.goal = None;
        self.state = SearchState::Idle;
        self.expanded = 0;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    /// Number of nodes taken off the open set and expanded during the last run.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// The bookkeeping of the last run for `node`, if the search reached it.
    pub fn search_node(&self, node: NodeId) -> Option<&SearchNode<S>> {
        self.visited.get(&node)
    }

    pub fn open_set_len(&self) -> usize {
        self.open_set.len()
    }

    /// Searches for the cheapest route from `start` to `goal`. When the graph's components are up
    /// to date and tell the two apart, the run fails without expanding anything.
    pub fn run(
        &mut self,
        graph: &PathingGraph<S>,
        start: NodeId,
        goal: NodeId,
    ) -> PathingResult<SearchOutcome<S>> {
        if self.state != SearchState::Idle {
            self.reset();
        }
        graph.node(start)?;
        graph.node(goal)?;
        if start == goal {
            return Ok(SearchOutcome::TrivialPath);
        }
        self.start = Some(start);
        self.goal = Some(goal);
        if graph.reachable(start, goal) == Some(false) {
            info!("{} is not reachable from {}", goal, start);
            self.state = SearchState::Failed;
            return Ok(SearchOutcome::NoPathFound);
        }
        self.state = SearchState::Running;
        let outcome = self.search(graph, start, goal);
        self.state = match outcome {
            Ok(SearchOutcome::Found(_)) => SearchState::Succeeded,
            _ => SearchState::Failed,
        };
        outcome
    }

    fn search(
        &mut self,
        graph: &PathingGraph<S>,
        start: NodeId,
        goal: NodeId,
    ) -> PathingResult<SearchOutcome<S>> {
        self.add_to_open_set(graph, start, None, goal)?;
        let mut neighbors: SmallVec<[NodeId; N_SMALLVEC_SIZE]> = SmallVec::new();
        while let Some(slot) = self.open_set.pop_front() {
            let current = self.visited[slot].as_predecessor(slot);
            if current.node == goal {
                let plan = self.rebuild_path(graph, slot)?;
                debug!(
                    "Found {} waypoint plan from {} to {} after {} expansions",
                    plan.len(),
                    start,
                    goal,
                    self.expanded
                );
                return Ok(SearchOutcome::Found(plan));
            }
            if let Some(budget) = self.step_budget {
                if self.expanded >= budget {
                    warn!(
                        "Search from {} to {} gave up after {} expansions",
                        start, goal, budget
                    );
                    return Ok(SearchOutcome::BudgetExhausted);
                }
            }
            self.expanded += 1;
            self.visited[slot].set_closed(true);

            neighbors.clear();
            graph
                .node(current.node)?
                .get_neighbors(graph.arcs(), &mut neighbors)?;
            for &neighbor in &neighbors {
                match self.visited.get_full_mut(&neighbor) {
                    Some((_, _, existing)) if existing.is_closed() => continue,
                    Some((neighbor_slot, _, existing)) => {
                        let cost = current.g + graph.cost_between(current.node, neighbor)?;
                        if cost < existing.g() {
                            existing.update_prev_node(graph, current)?;
                            self.reinsert_node(neighbor_slot);
                        }
                    }
                    None => {
                        self.add_to_open_set(graph, neighbor, Some(current), goal)?;
                    }
                }
            }
        }
        debug!(
            "Open set exhausted after {} expansions, {} is not reachable from {}",
            self.expanded, goal, start
        );
        Ok(SearchOutcome::NoPathFound)
    }

    fn add_to_open_set(
        &mut self,
        graph: &PathingGraph<S>,
        node: NodeId,
        predecessor: Option<Predecessor<S>>,
        goal: NodeId,
    ) -> PathingResult<usize> {
        let discovered = self.visited.len();
        let search_node = SearchNode::new(graph, node, predecessor, goal, discovered)?;
        let (slot, _) = self.visited.insert_full(node, search_node);
        self.insert_node(slot);
        Ok(slot)
    }

    /// Insertion sort: the node goes behind every entry that is at least as good.
    fn insert_node(&mut self, slot: usize) {
        let node = &self.visited[slot];
        let visited = &self.visited;
        let position = self
            .open_set
            .partition_point(|&other| !node.is_better_choice_than(&visited[other]));
        self.open_set.insert(position, slot);
    }

    fn reinsert_node(&mut self, slot: usize) {
        if let Some(position) = self.open_set.iter().position(|&other| other == slot) {
            self.open_set.remove(position);
        }
        self.insert_node(slot);
    }

    fn rebuild_path(&self, graph: &PathingGraph<S>, goal_slot: usize) -> PathingResult<PathPlan<S>> {
        let waypoints = reverse_path(&self.visited, |n| n.predecessor(), goal_slot)
            .into_iter()
            .map(|id| {
                graph.node(id).map(|node| Waypoint {
                    node: id,
                    position: node.position(),
                    tolerance: node.tolerance(),
                })
            })
            .collect::<PathingResult<Vec<_>>>()?;
        Ok(PathPlan::new(waypoints, self.visited[goal_slot].g()))
    }
}
