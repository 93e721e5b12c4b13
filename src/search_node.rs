use num_traits::Float;

use crate::error::PathingResult;
use crate::pathing_graph::PathingGraph;
use crate::pathing_node::NodeId;

/// The search node a [SearchNode] was reached from. `slot` indexes the visited map of the
/// owning [AStarSearch](crate::AStarSearch).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Predecessor<S = f32> {
    pub(crate) slot: usize,
    pub(crate) node: NodeId,
    pub(crate) g: S,
}

/// Cost bookkeeping for one [PathingNode](crate::PathingNode) during one search.
#[derive(Clone, Debug)]
pub struct SearchNode<S = f32> {
    pathing_node: NodeId,
    predecessor: Option<usize>,
    goal_node: NodeId,
    closed: bool,
    g: S,
    h: S,
    f: S,
    discovered: usize,
}

impl<S: Float> SearchNode<S> {
    /// Only the start node of a search has no predecessor. `discovered` is the discovery
    /// sequence number used as the final tie-break.
    pub(crate) fn new(
        graph: &PathingGraph<S>,
        pathing_node: NodeId,
        predecessor: Option<Predecessor<S>>,
        goal_node: NodeId,
        discovered: usize,
    ) -> PathingResult<SearchNode<S>> {
        let mut node = SearchNode {
            pathing_node,
            predecessor: None,
            goal_node,
            closed: false,
            g: S::zero(),
            h: S::zero(),
            f: S::zero(),
            discovered,
        };
        node.update_heuristics(graph, predecessor)?;
        Ok(node)
    }

    /// Relinks this node to a cheaper predecessor and recomputes its costs.
    pub(crate) fn update_prev_node(
        &mut self,
        graph: &PathingGraph<S>,
        predecessor: Predecessor<S>,
    ) -> PathingResult<()> {
        self.update_heuristics(graph, Some(predecessor))
    }

    fn update_heuristics(
        &mut self,
        graph: &PathingGraph<S>,
        predecessor: Option<Predecessor<S>>,
    ) -> PathingResult<()> {
        let g = match predecessor {
            Some(prev) => prev.g + graph.cost_between(prev.node, self.pathing_node)?,
            None => S::zero(),
        };
        let h = graph.distance_between(self.pathing_node, self.goal_node)?;
        self.predecessor = predecessor.map(|prev| prev.slot);
        self.g = g;
        self.h = h;
        self.f = g + h;
        Ok(())
    }

    /// Open set ordering. Lower f wins; ties go to the lower h, i.e. the node closer to the
    /// goal, and then to the node discovered first.
    pub fn is_better_choice_than(&self, other: &SearchNode<S>) -> bool {
        if self.f != other.f {
            return self.f < other.f;
        }
        if self.h != other.h {
            return self.h < other.h;
        }
        self.discovered < other.discovered
    }

    pub fn pathing_node(&self) -> NodeId {
        self.pathing_node
    }

    pub fn goal_node(&self) -> NodeId {
        self.goal_node
    }

    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Cost so far.
    pub fn g(&self) -> S {
        self.g
    }

    /// Straight-line estimate of the remaining cost.
    pub fn h(&self) -> S {
        self.h
    }

    pub fn f(&self) -> S {
        self.f
    }

    pub(crate) fn as_predecessor(&self, slot: usize) -> Predecessor<S> {
        Predecessor {
            slot,
            node: self.pathing_node,
            g: self.g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    fn line() -> (PathingGraph, Vec<NodeId>) {
        let mut graph = PathingGraph::new();
        let ids = (0..3)
            .map(|i| graph.add_node(Vec3::new(10.0 * i as f32, 0.0, 0.0)))
            .collect::<Vec<_>>();
        graph.link_nodes(ids[0], ids[1]).unwrap();
        graph.link_nodes(ids[1], ids[2]).unwrap();
        (graph, ids)
    }

    #[test]
    fn start_node_has_zero_cost() {
        let (graph, ids) = line();
        let start = SearchNode::new(&graph, ids[0], None, ids[2], 0).unwrap();
        assert_eq!(start.g(), 0.0);
        assert_eq!(start.h(), 20.0);
        assert_eq!(start.f(), 20.0);
        assert!(start.predecessor().is_none());
        assert!(!start.is_closed());
    }

    #[test]
    fn successor_accumulates_cost() {
        let (graph, ids) = line();
        let start = SearchNode::new(&graph, ids[0], None, ids[2], 0).unwrap();
        let next = SearchNode::new(&graph, ids[1], Some(start.as_predecessor(0)), ids[2], 1)
            .unwrap();
        assert_eq!(next.g(), 10.0);
        assert_eq!(next.h(), 10.0);
        assert_eq!(next.predecessor(), Some(0));
    }

    #[test]
    fn unlinked_predecessor_is_an_error() {
        let (graph, ids) = line();
        let start = SearchNode::new(&graph, ids[0], None, ids[2], 0).unwrap();
        let mut far = SearchNode::new(&graph, ids[2], None, ids[2], 1).unwrap();
        assert!(far
            .update_prev_node(&graph, start.as_predecessor(0))
            .is_err());
        // A failed relink leaves the node untouched.
        assert!(far.predecessor().is_none());
        assert_eq!(far.g(), 0.0);
    }

    #[test]
    fn tie_break_prefers_lower_h_then_discovery() {
        let (graph, ids) = line();
        let a = SearchNode::new(&graph, ids[0], None, ids[2], 0).unwrap();
        let b = SearchNode::new(&graph, ids[0], None, ids[2], 1).unwrap();
        assert!(a.is_better_choice_than(&b));
        assert!(!b.is_better_choice_than(&a));
        let closer = SearchNode::new(&graph, ids[1], Some(a.as_predecessor(0)), ids[2], 2)
            .unwrap();
        // Same f (20) but closer to the goal.
        assert!(closer.is_better_choice_than(&a));
    }
}
