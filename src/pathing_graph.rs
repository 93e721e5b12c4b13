use core::fmt;
use itertools::Itertools;
use log::info;
use num_traits::Float;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

use crate::astar::{AStarSearch, SearchOutcome};
use crate::error::{Handle, PathingError, PathingResult};
use crate::pathing_node::{lookup_arc, ArcId, NodeId, PathingArc, PathingNode};
use crate::point::Vec3;
use crate::{config, N_SMALLVEC_SIZE};

/// Either end of a [find_path](PathingGraph::find_path) query. Positions are snapped to the
/// closest node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEndpoint<S = f32> {
    Node(NodeId),
    Position(Vec3<S>),
}

impl<S> From<NodeId> for PathEndpoint<S> {
    fn from(node: NodeId) -> Self {
        PathEndpoint::Node(node)
    }
}

impl<S> From<Vec3<S>> for PathEndpoint<S> {
    fn from(position: Vec3<S>) -> Self {
        PathEndpoint::Position(position)
    }
}

/// [PathingGraph] owns every [PathingNode] and [PathingArc] and answers path queries between
/// them. In addition it maintains connected components in a [UnionFind] so that queries between
/// different components are answered without searching.
///
/// Handles carry the graph generation, which [destroy_graph](Self::destroy_graph) bumps, so
/// handles and plans from before a rebuild are rejected rather than silently pointing at new
/// nodes.
#[derive(Clone, Debug)]
pub struct PathingGraph<S = f32> {
    nodes: Vec<PathingNode<S>>,
    arcs: Vec<PathingArc<S>>,
    generation: u32,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl<S: Float> Default for PathingGraph<S> {
    fn default() -> PathingGraph<S> {
        PathingGraph {
            nodes: Vec::new(),
            arcs: Vec::new(),
            generation: 0,
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl<S: Float> PathingGraph<S> {
    pub fn new() -> PathingGraph<S> {
        PathingGraph::default()
    }

    /// Adds a node with the default arrival tolerance.
    pub fn add_node(&mut self, position: Vec3<S>) -> NodeId {
        let tolerance = num_traits::cast(config::DEFAULT_TOLERANCE).unwrap_or_else(S::one);
        self.add_node_with_tolerance(position, tolerance)
    }

    pub fn add_node_with_tolerance(&mut self, position: Vec3<S>, tolerance: S) -> NodeId {
        let id = NodeId {
            index: self.nodes.len() as u32,
            generation: self.generation,
        };
        self.nodes.push(PathingNode::new(id, position, tolerance));
        // The union-find has a fixed size, the new node is only covered after regenerating.
        self.components_dirty = true;
        id
    }

    /// Connects two nodes with an arc of default weight.
    pub fn link_nodes(&mut self, a: NodeId, b: NodeId) -> PathingResult<ArcId> {
        let weight = num_traits::cast(config::DEFAULT_WEIGHT).unwrap_or_else(S::one);
        self.link_nodes_weighted(a, b, weight)
    }

    /// Connects two nodes and registers the arc on both of them. Weights below 1 make the
    /// distance heuristic inadmissible, see [AStarSearch].
    pub fn link_nodes_weighted(&mut self, a: NodeId, b: NodeId, weight: S) -> PathingResult<ArcId> {
        self.node(a)?;
        self.node(b)?;
        let id = ArcId {
            index: self.arcs.len() as u32,
            generation: self.generation,
        };
        let mut arc = PathingArc::new(id, weight);
        arc.link_nodes(a, b);
        self.nodes[a.index()].add_arc(id);
        if a != b {
            self.nodes[b.index()].add_arc(id);
        }
        self.arcs.push(arc);
        if !self.components_dirty {
            self.components.union(a.index(), b.index());
        }
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> PathingResult<&PathingNode<S>> {
        if id.generation != self.generation {
            return Err(PathingError::StaleHandle(Handle::Node(id)));
        }
        self.nodes
            .get(id.index())
            .ok_or(PathingError::StaleHandle(Handle::Node(id)))
    }

    pub fn arc(&self, id: ArcId) -> PathingResult<&PathingArc<S>> {
        lookup_arc(&self.arcs, id)
    }

    pub fn nodes(&self) -> &[PathingNode<S>] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[PathingArc<S>] {
        &self.arcs
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn neighbors(&self, id: NodeId) -> PathingResult<SmallVec<[NodeId; N_SMALLVEC_SIZE]>> {
        let mut out = SmallVec::new();
        self.node(id)?.get_neighbors(&self.arcs, &mut out)?;
        Ok(out)
    }

    /// Cost of moving along the arc from `from` to `to`.
    pub fn cost_between(&self, from: NodeId, to: NodeId) -> PathingResult<S> {
        self.node(to)?.get_cost_from_node(self.node(from)?, &self.arcs)
    }

    /// Straight-line distance, regardless of arcs.
    pub fn distance_between(&self, a: NodeId, b: NodeId) -> PathingResult<S> {
        Ok(self.node(a)?.position().distance(&self.node(b)?.position()))
    }

    /// Brute force scan keeping the first node for which `better` holds against the best so far.
    fn scan_nodes<F>(&self, position: &Vec3<S>, better: F) -> PathingResult<NodeId>
    where
        F: Fn(S, S) -> bool,
    {
        let mut best: Option<(NodeId, S)> = None;
        for node in &self.nodes {
            let distance = position.distance(&node.position());
            match best {
                Some((_, best_distance)) if !better(distance, best_distance) => {}
                _ => best = Some((node.id(), distance)),
            }
        }
        best.map(|(id, _)| id).ok_or(PathingError::EmptyGraph)
    }

    pub fn find_closest_node(&self, position: &Vec3<S>) -> PathingResult<NodeId> {
        self.scan_nodes(position, |candidate, best| candidate < best)
    }

    pub fn find_furthest_node(&self, position: &Vec3<S>) -> PathingResult<NodeId> {
        self.scan_nodes(position, |candidate, best| candidate > best)
    }

    pub fn find_random_node(&self) -> PathingResult<NodeId> {
        self.find_random_node_with(&mut rand::thread_rng())
    }

    /// Uniformly picks a node using the given generator.
    pub fn find_random_node_with<R: Rng + ?Sized>(&self, rng: &mut R) -> PathingResult<NodeId> {
        if self.nodes.is_empty() {
            return Err(PathingError::EmptyGraph);
        }
        Ok(self.nodes[rng.gen_range(0..self.nodes.len())].id())
    }

    fn resolve(&self, endpoint: PathEndpoint<S>) -> PathingResult<NodeId> {
        match endpoint {
            PathEndpoint::Node(id) => self.node(id).map(|node| node.id()),
            PathEndpoint::Position(position) => self.find_closest_node(&position),
        }
    }

    /// Computes a path between two nodes or positions. Positions are snapped to the closest node
    /// without checking whether that node can actually be walked to.
    pub fn find_path<A, B>(&self, start: A, goal: B) -> PathingResult<SearchOutcome<S>>
    where
        A: Into<PathEndpoint<S>>,
        B: Into<PathEndpoint<S>>,
    {
        let start = self.resolve(start.into())?;
        let goal = self.resolve(goal.into())?;
        self.find_path_between_nodes(start, goal)
    }

    pub fn find_path_between_nodes(
        &self,
        start: NodeId,
        goal: NodeId,
    ) -> PathingResult<SearchOutcome<S>> {
        self.find_path_with(&mut AStarSearch::new(), start, goal)
    }

    /// Like [find_path_between_nodes](Self::find_path_between_nodes) but runs the given search,
    /// e.g. one with a step budget.
    pub fn find_path_with(
        &self,
        search: &mut AStarSearch<S>,
        start: NodeId,
        goal: NodeId,
    ) -> PathingResult<SearchOutcome<S>> {
        search.run(self, start, goal)
    }

    /// Whether nodes were added since the components were last generated.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Checks if start and goal are on the same component. [None] if the components are dirty or
    /// a handle is stale.
    pub fn reachable(&self, start: NodeId, goal: NodeId) -> Option<bool> {
        if self.components_dirty || self.node(start).is_err() || self.node(goal).is_err() {
            return None;
        }
        Some(self.components.equiv(start.index(), goal.index()))
    }

    /// Component id of a node. Stale until [update](Self::update) if nodes were added since.
    pub fn get_component(&self, id: NodeId) -> PathingResult<usize> {
        self.node(id)?;
        if self.components_dirty {
            return Ok(id.index());
        }
        Ok(self.components.find(id.index()))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and joins the endpoints of every arc.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components for {} nodes and {} arcs",
            self.nodes.len(),
            self.arcs.len()
        );
        self.components = UnionFind::new(self.nodes.len());
        self.components_dirty = false;
        for arc in &self.arcs {
            if let Some((a, b)) = arc.endpoints() {
                self.components.union(a.index(), b.index());
            }
        }
    }

    /// Drops every node and arc. The graph can be rebuilt afterwards; handles and plans from
    /// before no longer resolve.
    pub fn destroy_graph(&mut self) {
        info!(
            "Destroying pathing graph with {} nodes and {} arcs",
            self.nodes.len(),
            self.arcs.len()
        );
        self.nodes.clear();
        self.arcs.clear();
        self.generation = self.generation.wrapping_add(1);
        self.components = UnionFind::new(0);
        self.components_dirty = false;
    }
}

impl<S: Float + fmt::Display> fmt::Display for PathingGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for node in &self.nodes {
            writeln!(
                f,
                "{} {} tolerance {}",
                node.id().index(),
                node.position(),
                node.tolerance()
            )?;
        }
        writeln!(f, "\nArcs:")?;
        for arc in &self.arcs {
            let ends = arc
                .endpoints()
                .map(|(a, b)| [a.index(), b.index()].iter().join(" <-> "))
                .unwrap_or_else(|| "unlinked".to_owned());
            writeln!(f, "{} weight {}", ends, arc.weight())?;
        }
        Ok(())
    }
}
