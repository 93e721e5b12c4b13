//! # waypoint_pathfinding
//!
//! Pathfinding over a graph of waypoints in 3D space. A [PathingGraph] owns weighted,
//! bidirectional arcs between [PathingNode]s and answers point-to-point queries with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the straight-line distance to
//! the goal as heuristic. A successful query yields a [PathPlan] that an agent follows one
//! waypoint at a time, advancing whenever it gets within the tolerance radius of the current one.
//!
//! Connected components are kept alongside the graph so that queries between parts that are not
//! linked at all are answered without flood-filling the reachable part.
//!
//! ```
//! use waypoint_pathfinding::{PathingGraph, SearchOutcome, Vec3};
//!
//! let mut graph = PathingGraph::new();
//! let a = graph.add_node(Vec3::new(0.0, 0.0, 0.0));
//! let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
//! let c = graph.add_node(Vec3::new(10.0, 0.0, 10.0));
//! graph.link_nodes(a, b).unwrap();
//! graph.link_nodes(b, c).unwrap();
//! graph.update();
//!
//! let mut plan = match graph.find_path(Vec3::new(1.0, 0.0, 0.0), c).unwrap() {
//!     SearchOutcome::Found(plan) => plan,
//!     other => panic!("no plan: {:?}", other),
//! };
//! assert_eq!(plan.len(), 3);
//! while !plan.check_for_end() {
//!     let target = plan.current_node_position().unwrap();
//!     plan.check_for_next_node(target);
//! }
//! ```
mod astar;
mod error;
mod path_plan;
mod pathing_graph;
mod pathing_node;
mod point;
mod search_node;

pub use crate::astar::{AStarSearch, SearchOutcome, SearchState};
pub use crate::error::{Handle, PathingError, PathingResult};
pub use crate::path_plan::{PathPlan, Waypoint};
pub use crate::pathing_graph::{PathEndpoint, PathingGraph};
pub use crate::pathing_node::{ArcId, NodeId, PathingArc, PathingNode};
pub use crate::point::Vec3;
pub use crate::search_node::SearchNode;

/// Inline capacity for per-node arc lists and neighbour buffers.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Defaults used when nodes and arcs are created without explicit values.
pub mod config {
    /// Radius within which an agent counts as having reached a node.
    pub const DEFAULT_TOLERANCE: f64 = 5.0;

    /// Weight of arcs created by [link_nodes](crate::PathingGraph::link_nodes).
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Nodes per side of the diagnostic grid layout.
    pub const TEST_GRID_SIZE: usize = 9;

    /// Distance between neighbouring nodes of the diagnostic grid layout.
    pub const TEST_GRID_SPACING: f64 = 10.0;
}
