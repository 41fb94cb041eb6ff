use crate::grid::{CubePoint, CubePointMap, OffsetCoord};
use std::{cmp::Ordering, collections::BinaryHeap};

/// One frontier entry in the A* search: a cell plus the priority it was
/// enqueued with (cost so far plus the distance heuristic).
#[derive(Copy, Clone, Debug)]
struct Frontier {
    cube: CubePoint,
    priority: usize,
}

// The standard library heap is a max-heap, so ordering is reversed to make
// it pop the lowest priority first. Only the priority participates in the
// ordering; two entries for different cells with equal priority are equal.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Frontier {}

/// Find a shortest walkable path from `start` to `goal` over the six-way
/// hex lattice. The result runs from the first step taken to the goal
/// inclusive; `start` itself is not part of it. An empty result means no
/// path exists (or that `goal == start`), never an error.
///
/// This is A* with cube distance as the heuristic. Hex distance is a metric
/// that matches the uniform step cost of 1, so the heuristic is admissible
/// and consistent and the first time the goal leaves the frontier its cost
/// is optimal. The walkability of `start` is never consulted; the unit's
/// own cell is not walkable while it stands there.
pub fn find_path(
    start: CubePoint,
    goal: CubePoint,
    is_walkable: impl Fn(OffsetCoord) -> bool,
) -> Vec<CubePoint> {
    let mut frontier = BinaryHeap::new();
    frontier.push(Frontier {
        cube: start,
        priority: 0,
    });
    let mut came_from: CubePointMap<CubePoint> = CubePointMap::default();
    let mut cost_so_far: CubePointMap<usize> = CubePointMap::default();
    came_from.insert(start, start);
    cost_so_far.insert(start, 0);

    while let Some(Frontier { cube: current, .. }) = frontier.pop() {
        if current == goal {
            break;
        }

        for next in current.adjacents() {
            if !is_walkable(OffsetCoord::from(next)) {
                continue;
            }
            let new_cost = cost_so_far[&current] + 1;
            let improved = match cost_so_far.get(&next) {
                Some(&prior) => new_cost < prior,
                None => true,
            };
            if improved {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                frontier.push(Frontier {
                    cube: next,
                    priority: new_cost + next.distance_to(goal),
                });
            }
        }
    }

    // If the goal never made it into the predecessor map, the frontier
    // drained without touching it: no path
    if !came_from.contains_key(&goal) {
        return Vec::new();
    }

    // Walk the predecessor chain backward, then flip it. The loop stops
    // before pushing `start`, which keeps it out of the result.
    let mut path = Vec::new();
    let mut step = goal;
    while step != start {
        path.push(step);
        step = came_from[&step];
    }
    path.reverse();
    path
}

/// Sample the straight line between two cells: `N + 1` evenly spaced points
/// (`N` being the distance between them), each snapped to its nearest cell.
/// Walkability is ignored; this is for ruler-style overlays, not for
/// movement. Two equal endpoints yield that single cell.
pub fn hex_line(a: CubePoint, b: CubePoint) -> Vec<OffsetCoord> {
    let n = a.distance_to(b);
    if n == 0 {
        return vec![OffsetCoord::from(a)];
    }
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            OffsetCoord::from(a.lerp(b, t).round())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field(_: OffsetCoord) -> bool {
        true
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let start = CubePoint::new_xy(3, -2);
        assert!(find_path(start, start, open_field).is_empty());
    }

    #[test]
    fn test_path_length_matches_distance() {
        let start = CubePoint::ORIGIN;
        for &(x, y) in &[(4, 0), (0, 4), (-3, 1), (2, -5)] {
            let goal = CubePoint::new_xy(x, y);
            let path = find_path(start, goal, open_field);
            assert_eq!(
                path.len(),
                start.distance_to(goal),
                "suboptimal path to {}",
                goal
            );
            assert_eq!(path.last(), Some(&goal));
        }
    }

    #[test]
    fn test_path_steps_are_adjacent() {
        let start = CubePoint::ORIGIN;
        let goal = CubePoint::new_xy(3, 2);
        let path = find_path(start, goal, open_field);
        assert!(!path.is_empty());
        assert_eq!(start.distance_to(path[0]), 1);
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance_to(pair[1]), 1);
        }
    }

    #[test]
    fn test_corridor_path_is_exact() {
        // Walkable cells are a straight corridor along row 0. The only
        // shortest path is the corridor itself, in order.
        let corridor = |coord: OffsetCoord| {
            coord.row() == 0 && (0..=5).contains(&coord.col())
        };
        let start = CubePoint::from(OffsetCoord::new(0, 0));
        let goal = CubePoint::from(OffsetCoord::new(5, 0));
        let path = find_path(start, goal, corridor);
        let offsets: Vec<OffsetCoord> =
            path.into_iter().map(OffsetCoord::from).collect();
        assert_eq!(
            offsets,
            vec![
                OffsetCoord::new(1, 0),
                OffsetCoord::new(2, 0),
                OffsetCoord::new(3, 0),
                OffsetCoord::new(4, 0),
                OffsetCoord::new(5, 0),
            ]
        );
    }

    #[test]
    fn test_unreachable_goal_is_empty() {
        // Nothing next to the start is walkable, so the frontier drains
        let start = CubePoint::ORIGIN;
        let start_offset = OffsetCoord::from(start);
        let goal = CubePoint::new_xy(4, 0);
        let walled_in = |coord: OffsetCoord| coord == start_offset;
        assert!(find_path(start, goal, walled_in).is_empty());
    }

    #[test]
    fn test_path_routes_around_walls() {
        // A 3-cell wall sits between start and goal on row 1; the path has
        // to leave the row and come back
        let wall = [
            OffsetCoord::new(2, 0),
            OffsetCoord::new(2, 1),
            OffsetCoord::new(2, 2),
        ];
        let walkable = |coord: OffsetCoord| !wall.contains(&coord);
        let start = CubePoint::from(OffsetCoord::new(0, 1));
        let goal = CubePoint::from(OffsetCoord::new(4, 1));
        let path = find_path(start, goal, walkable);
        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&goal));
        assert!(path.len() > start.distance_to(goal));
        for cube in &path {
            assert!(walkable(OffsetCoord::from(*cube)));
        }
    }

    #[test]
    fn test_line_single_point() {
        let a = CubePoint::new_xy(2, 2);
        assert_eq!(hex_line(a, a), vec![OffsetCoord::from(a)]);
    }

    #[test]
    fn test_line_along_axis() {
        let a = CubePoint::ORIGIN;
        let b = CubePoint::new_xy(3, 0);
        assert_eq!(
            hex_line(a, b),
            vec![
                OffsetCoord::new(0, 0),
                OffsetCoord::new(1, 0),
                OffsetCoord::new(2, 0),
                OffsetCoord::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_line_cells_are_contiguous() {
        let a = CubePoint::new_xy(-2, 1);
        let b = CubePoint::new_xy(3, -3);
        let line = hex_line(a, b);
        assert_eq!(line.len(), a.distance_to(b) + 1);
        assert_eq!(line[0], OffsetCoord::from(a));
        assert_eq!(line[line.len() - 1], OffsetCoord::from(b));
        for pair in line.windows(2) {
            let c0 = CubePoint::from(pair[0]);
            let c1 = CubePoint::from(pair[1]);
            assert_eq!(c0.distance_to(c1), 1);
        }
    }
}
