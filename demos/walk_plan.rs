use waypoint_pathfinding::{PathingGraph, SearchOutcome, Vec3};

/// Builds a small graph with a wall in the middle and walks an agent across it.
///
/// ```text
/// S . . . .
/// . # # # .
/// . . . . G
/// ```
/// where
/// - S marks the start
/// - G marks the goal
/// - # marks spots without a waypoint
///
/// Run with `RUST_LOG=debug` to see the search log.
fn main() {
    env_logger::init();
    let mut graph: PathingGraph = PathingGraph::new();
    let open = |row: usize, col: usize| !(row == 1 && (1..=3).contains(&col));
    let mut ids = vec![vec![None; 5]; 3];
    for row in 0..3 {
        for col in 0..5 {
            if open(row, col) {
                let position = Vec3::new(10.0 * col as f32, 0.0, 10.0 * row as f32);
                ids[row][col] = Some(graph.add_node(position));
            }
        }
    }
    for row in 0..3 {
        for col in 0..5 {
            let Some(id) = ids[row][col] else { continue };
            if let Some(left) = col.checked_sub(1).and_then(|c| ids[row][c]) {
                graph.link_nodes(left, id).unwrap();
            }
            if let Some(up) = row.checked_sub(1).and_then(|r| ids[r][col]) {
                graph.link_nodes(up, id).unwrap();
            }
        }
    }
    graph.update();
    println!("{}", graph);

    let mut plan = match graph.find_path(Vec3::new(-2.0, 0.0, 1.0), Vec3::new(41.0, 0.0, 19.0)) {
        Ok(SearchOutcome::Found(plan)) => plan,
        other => {
            println!("No plan: {:?}", other);
            return;
        }
    };
    println!("Plan with {} waypoints, cost {}", plan.len(), plan.total_cost());

    let mut position = Vec3::new(-2.0, 0.0, 1.0);
    let speed = 3.0;
    let mut tick = 0;
    while !plan.check_for_end() {
        let Some(target) = plan.current_node_position() else { break };
        let distance = position.distance(&target);
        if distance > 0.0 {
            let step = distance.min(speed) / distance;
            position = Vec3::new(
                position.x + (target.x - position.x) * step,
                position.y + (target.y - position.y) * step,
                position.z + (target.z - position.z) * step,
            );
        }
        if plan.check_for_next_node(position) {
            println!("tick {tick}: reached waypoint near {}", target);
        }
        tick += 1;
    }
    println!("Arrived at {} after {} ticks", position, tick);
}
