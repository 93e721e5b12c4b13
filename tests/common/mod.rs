use waypoint_pathfinding::{NodeId, PathingGraph, Vec3};

/// Square grid of `n` x `n` nodes on the x/z plane starting at the origin, each node linked to
/// its left neighbour and to the node in the row above. Node ids are returned row by row.
pub fn build_grid(n: usize, spacing: f32) -> (PathingGraph, Vec<NodeId>) {
    let mut graph = PathingGraph::new();
    let mut ids = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let id = graph.add_node(Vec3::new(spacing * col as f32, 0.0, spacing * row as f32));
            if col > 0 {
                graph.link_nodes(ids[ids.len() - 1], id).unwrap();
            }
            if row > 0 {
                graph.link_nodes(ids[ids.len() - n], id).unwrap();
            }
            ids.push(id);
        }
    }
    graph.update();
    (graph, ids)
}
