use core::fmt;
use num_traits::Float;
use smallvec::SmallVec;

use crate::error::{Handle, PathingError, PathingResult};
use crate::point::Vec3;
use crate::N_SMALLVEC_SIZE;

/// Generation-checked handle to a [PathingNode]. Handles issued before
/// [destroy_graph](crate::PathingGraph::destroy_graph) are rejected afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Generation-checked handle to a [PathingArc].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Position of the node in the graph's node list.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl ArcId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "node {}v{}", self.index, self.generation)
    }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "arc {}v{}", self.index, self.generation)
    }
}

pub(crate) fn lookup_arc<S>(arcs: &[PathingArc<S>], id: ArcId) -> PathingResult<&PathingArc<S>> {
    arcs.get(id.index())
        .filter(|arc| arc.id == id)
        .ok_or(PathingError::StaleHandle(Handle::Arc(id)))
}

/// A waypoint of the graph: a world position, the radius within which an agent counts as having
/// reached it and the arcs that touch it. Two nodes at the same position are still distinct.
#[derive(Clone, Debug)]
pub struct PathingNode<S = f32> {
    id: NodeId,
    position: Vec3<S>,
    tolerance: S,
    arcs: SmallVec<[ArcId; N_SMALLVEC_SIZE]>,
}

impl<S: Float> PathingNode<S> {
    pub(crate) fn new(id: NodeId, position: Vec3<S>, tolerance: S) -> PathingNode<S> {
        PathingNode {
            id,
            position,
            tolerance,
            arcs: SmallVec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec3<S> {
        self.position
    }

    pub fn tolerance(&self) -> S {
        self.tolerance
    }

    /// Arcs in the order they were linked.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// Does not check that `arc` actually touches this node; only
    /// [PathingGraph::link_nodes](crate::PathingGraph::link_nodes) registers arcs.
    pub(crate) fn add_arc(&mut self, arc: ArcId) {
        self.arcs.push(arc);
    }

    /// Appends the far endpoint of every incident arc to `out`, in arc insertion order.
    pub fn get_neighbors(
        &self,
        arcs: &[PathingArc<S>],
        out: &mut SmallVec<[NodeId; N_SMALLVEC_SIZE]>,
    ) -> PathingResult<()> {
        for &arc_id in &self.arcs {
            out.push(lookup_arc(arcs, arc_id)?.get_neighbor(self.id)?);
        }
        Ok(())
    }

    /// The arc connecting this node to `linked`, if any. The first one wins if several exist.
    pub fn find_arc(&self, linked: NodeId, arcs: &[PathingArc<S>]) -> Option<ArcId> {
        self.arcs.iter().copied().find(|&arc_id| {
            lookup_arc(arcs, arc_id)
                .and_then(|arc| arc.get_neighbor(self.id))
                .map_or(false, |neighbor| neighbor == linked)
        })
    }

    /// Cost of moving from `from` to this node: the arc weight times the Euclidean distance.
    pub fn get_cost_from_node(
        &self,
        from: &PathingNode<S>,
        arcs: &[PathingArc<S>],
    ) -> PathingResult<S> {
        let arc_id = self
            .find_arc(from.id, arcs)
            .ok_or(PathingError::DisconnectedQuery {
                from: from.id,
                to: self.id,
            })?;
        let arc = lookup_arc(arcs, arc_id)?;
        Ok(arc.weight() * from.position.distance(&self.position))
    }
}

/// A weighted, bidirectional edge. Invalid until both endpoints are linked.
#[derive(Clone, Debug)]
pub struct PathingArc<S = f32> {
    id: ArcId,
    weight: S,
    nodes: Option<[NodeId; 2]>,
}

impl<S: Float> PathingArc<S> {
    pub(crate) fn new(id: ArcId, weight: S) -> PathingArc<S> {
        PathingArc {
            id,
            weight,
            nodes: None,
        }
    }

    /// Sets the endpoints only; registering the arc on both nodes is done by the graph.
    pub(crate) fn link_nodes(&mut self, a: NodeId, b: NodeId) {
        self.nodes = Some([a, b]);
    }

    pub fn id(&self) -> ArcId {
        self.id
    }

    pub fn weight(&self) -> S {
        self.weight
    }

    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        self.nodes.map(|[a, b]| (a, b))
    }

    /// The endpoint that is not `me`.
    pub fn get_neighbor(&self, me: NodeId) -> PathingResult<NodeId> {
        match self.nodes {
            Some([a, b]) if a == me => Ok(b),
            Some([a, b]) if b == me => Ok(a),
            _ => Err(PathingError::InvalidArc {
                arc: self.id,
                node: me,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_id(index: u32) -> NodeId {
        NodeId {
            index,
            generation: 0,
        }
    }

    fn arc_id(index: u32) -> ArcId {
        ArcId {
            index,
            generation: 0,
        }
    }

    /// Two nodes joined by one arc of weight 2, plus a third node that is not linked.
    fn setup() -> (Vec<PathingNode>, Vec<PathingArc>) {
        let mut nodes = vec![
            PathingNode::new(node_id(0), Vec3::new(0.0, 0.0, 0.0), 5.0),
            PathingNode::new(node_id(1), Vec3::new(3.0, 0.0, 4.0), 5.0),
            PathingNode::new(node_id(2), Vec3::new(9.0, 0.0, 0.0), 5.0),
        ];
        let mut arc = PathingArc::new(arc_id(0), 2.0);
        arc.link_nodes(node_id(0), node_id(1));
        nodes[0].add_arc(arc.id());
        nodes[1].add_arc(arc.id());
        (nodes, vec![arc])
    }

    #[test]
    fn neighbor_of_each_endpoint() {
        let (_, arcs) = setup();
        assert_eq!(arcs[0].get_neighbor(node_id(0)), Ok(node_id(1)));
        assert_eq!(arcs[0].get_neighbor(node_id(1)), Ok(node_id(0)));
    }

    #[test]
    fn neighbor_of_foreign_node_is_invalid() {
        let (_, arcs) = setup();
        assert_eq!(
            arcs[0].get_neighbor(node_id(2)),
            Err(PathingError::InvalidArc {
                arc: arc_id(0),
                node: node_id(2)
            })
        );
        let unlinked: PathingArc = PathingArc::new(arc_id(1), 1.0);
        assert!(unlinked.get_neighbor(node_id(0)).is_err());
        assert!(unlinked.endpoints().is_none());
    }

    #[test]
    fn cost_is_weighted_distance_both_ways() {
        let (nodes, arcs) = setup();
        let forward = nodes[1].get_cost_from_node(&nodes[0], &arcs).unwrap();
        let backward = nodes[0].get_cost_from_node(&nodes[1], &arcs).unwrap();
        assert_eq!(forward, 10.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn cost_between_unlinked_nodes_is_disconnected() {
        let (nodes, arcs) = setup();
        assert_eq!(
            nodes[2].get_cost_from_node(&nodes[0], &arcs),
            Err(PathingError::DisconnectedQuery {
                from: node_id(0),
                to: node_id(2)
            })
        );
    }

    #[test]
    fn neighbors_follow_arc_order() {
        let (nodes, arcs) = setup();
        let mut out = SmallVec::new();
        nodes[0].get_neighbors(&arcs, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[node_id(1)]);
        out.clear();
        nodes[2].get_neighbors(&arcs, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(nodes[1].find_arc(node_id(0), &arcs), Some(arc_id(0)));
        assert_eq!(nodes[1].find_arc(node_id(2), &arcs), None);
    }
}
