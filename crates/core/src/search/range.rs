use crate::grid::{CubePoint, CubePointMap, CubePointSet, OffsetCoord};
use std::collections::VecDeque;

/// Compute the set of cells a unit standing at `origin` could reach in at
/// most `max_radius` steps, moving only through walkable cells. The origin
/// itself is excluded from the result.
///
/// This is a breadth-first search, so each cell's recorded distance is its
/// true shortest hop count from the origin and the result is independent of
/// traversal order. Cells at exactly `max_radius` are included but not
/// expanded. The origin's own walkability is never consulted; in practice
/// it holds the unit, which is not a walkable marker.
///
/// `max_radius = 0` yields an empty set.
pub fn reachable_within(
    origin: CubePoint,
    max_radius: u16,
    is_walkable: impl Fn(OffsetCoord) -> bool,
) -> CubePointSet {
    let max_radius = usize::from(max_radius);

    // Maps visited cube -> distance from origin
    let mut visited = CubePointMap::default();
    visited.insert(origin, 0);
    let mut queue = VecDeque::new();
    queue.push_back(origin);

    while let Some(cube) = queue.pop_front() {
        let dist = visited[&cube];
        if dist == max_radius {
            continue;
        }

        for adjacent in cube.adjacents() {
            if visited.contains_key(&adjacent) {
                continue;
            }
            // Walkability is answered in offset space
            if !is_walkable(OffsetCoord::from(adjacent)) {
                continue;
            }
            visited.insert(adjacent, dist + 1);
            queue.push_back(adjacent);
        }
    }

    // Distance 0 is the origin, which stays out of the result
    visited
        .into_iter()
        .filter(|&(_, dist)| dist > 0)
        .map(|(cube, _)| cube)
        .collect()
}
