use itertools::Itertools;
use num_traits::Float;

use crate::pathing_node::NodeId;
use crate::point::Vec3;

/// One stop of a [PathPlan]: the node it came from plus a copy of its position and tolerance,
/// so a plan can be followed without access to the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint<S = f32> {
    pub node: NodeId,
    pub position: Vec3<S>,
    pub tolerance: S,
}

/// A finished start to goal route with a cursor for following it one waypoint at a time. The
/// waypoints never change after construction; only the cursor moves, and only forward until
/// [reset_path](Self::reset_path) is called.
///
/// A typical agent calls [check_for_next_node](Self::check_for_next_node) with its current
/// position every tick and stops once [check_for_end](Self::check_for_end) returns [true].
#[derive(Clone, Debug)]
pub struct PathPlan<S = f32> {
    waypoints: Vec<Waypoint<S>>,
    cursor: usize,
    total_cost: S,
}

impl<S: Float> PathPlan<S> {
    /// Creates a plan with its cursor on the first waypoint.
    pub fn new(waypoints: Vec<Waypoint<S>>, total_cost: S) -> PathPlan<S> {
        PathPlan {
            waypoints,
            cursor: 0,
            total_cost,
        }
    }

    /// Advances to the next waypoint if `position` lies within the tolerance of the current one.
    /// Returns whether the cursor moved.
    pub fn check_for_next_node(&mut self, position: Vec3<S>) -> bool {
        match self.waypoints.get(self.cursor) {
            Some(current) if position.distance(&current.position) <= current.tolerance => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// True once every waypoint has been reached.
    pub fn check_for_end(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    pub fn reset_path(&mut self) {
        self.cursor = 0;
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.waypoints.get(self.cursor).map(|w| w.node)
    }

    /// Where the agent should be heading, or [None] once the plan is finished.
    pub fn current_node_position(&self) -> Option<Vec3<S>> {
        self.waypoints.get(self.cursor).map(|w| w.position)
    }

    pub fn waypoints(&self) -> &[Waypoint<S>] {
        &self.waypoints
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.waypoints.iter().map(|w| w.node)
    }

    /// Waypoints not reached yet.
    pub fn remaining(&self) -> &[Waypoint<S>] {
        &self.waypoints[self.cursor.min(self.waypoints.len())..]
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Weighted cost of the route as computed by the search.
    pub fn total_cost(&self) -> S {
        self.total_cost
    }

    /// Unweighted length of the route through all waypoint positions.
    pub fn length(&self) -> S {
        self.waypoints
            .iter()
            .tuple_windows()
            .fold(S::zero(), |acc, (a, b)| acc + a.position.distance(&b.position))
    }
}
