use crate::algorithms::common::{RoutePlanner, DEFAULT_MAX_EXPANSIONS};
use crate::error::{Result, RoverError};
use crate::grid::{ObstacleSet, Position};
use pathfinding::prelude::astar;

/// Shortest-route planner built on the `pathfinding` crate's A*.
///
/// The grid is unbounded, so the search is confined to the box around the
/// start, the target and every obstacle, grown by one cell. A shortest route
/// never has to leave that box, and the bound makes an enclosed target fail
/// sooner. Far-apart obstacles still make that box huge, so every expansion
/// also counts against `max_expansions`; running out fails with `NoRouteFound`.
pub struct AStar {
    pub max_expansions: usize,
    expanded: usize,
}

impl Default for AStar {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPANSIONS)
    }
}

impl AStar {
    pub fn new(max_expansions: usize) -> Self {
        AStar {
            max_expansions,
            expanded: 0,
        }
    }

    fn search_bounds(obstacles: &ObstacleSet, start: Position, target: Position) -> (Position, Position) {
        let (mut min, mut max) = obstacles.bounds().unwrap_or((start, start));
        for p in [start, target] {
            min = Position::new(min.x.min(p.x), min.y.min(p.y));
            max = Position::new(max.x.max(p.x), max.y.max(p.y));
        }
        (
            Position::new(min.x.saturating_sub(1), min.y.saturating_sub(1)),
            Position::new(max.x.saturating_add(1), max.y.saturating_add(1)),
        )
    }
}

impl RoutePlanner for AStar {
    fn find_route(
        &mut self,
        obstacles: &ObstacleSet,
        start: Position,
        target: Position,
    ) -> Result<Vec<Position>> {
        let (min, max) = Self::search_bounds(obstacles, start, target);
        let in_bounds = |p: &Position| p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y;
        let max_expansions = self.max_expansions;
        let mut expanded = 0;

        let result = astar(
            &start,
            |p| {
                if expanded >= max_expansions {
                    // Starve the open set so the search winds down.
                    return Vec::new();
                }
                expanded += 1;
                p.neighbors()
                    .into_iter()
                    .filter(|n| in_bounds(n) && !obstacles.contains(n))
                    .map(|n| (n, 1u64))
                    .collect::<Vec<_>>()
            },
            |p| p.manhattan_distance(&target),
            |p| *p == target,
        );
        self.expanded = expanded;

        if expanded >= max_expansions && result.is_none() {
            log::debug!(
                "A* search budget of {} cells exhausted before reaching {}",
                max_expansions,
                target
            );
            return Err(RoverError::NoRouteFound { target, expanded });
        }

        match result {
            // The crate's path starts with `start`; routes do not.
            Some((path, _)) => Ok(path.into_iter().skip(1).collect()),
            None => {
                log::debug!("A* found no route to {} ({} cells expanded)", target, expanded);
                Err(RoverError::NoRouteFound { target, expanded })
            }
        }
    }

    fn nodes_expanded(&self) -> usize {
        self.expanded
    }

    fn name(&self) -> &'static str {
        "a_star"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles(points: &[(i64, i64)]) -> ObstacleSet {
        points.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn open_grid_route_has_manhattan_length() {
        let mut planner = AStar::default();
        let route = planner
            .find_route(&ObstacleSet::new(), Position::new(-2, 1), Position::new(3, -3))
            .unwrap();
        assert_eq!(route.len(), 9);
        assert_eq!(route.last(), Some(&Position::new(3, -3)));
        assert!(Position::new(-2, 1).is_adjacent(&route[0]));
    }

    #[test]
    fn start_equal_to_target_is_an_empty_route() {
        let mut planner = AStar::default();
        let route = planner
            .find_route(&ObstacleSet::new(), Position::new(1, 1), Position::new(1, 1))
            .unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn shortest_route_around_the_u_wall() {
        let walls = obstacles(&[
            (3, 0),
            (2, 1),
            (2, -1),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
            (0, -1),
            (4, 5),
            (4, 4),
            (5, 4),
            (6, 4),
            (6, 5),
            (4, 3),
            (6, 3),
        ]);
        let mut planner = AStar::default();
        let route = planner
            .find_route(&walls, Position::new(0, 0), Position::new(5, 5))
            .unwrap();
        assert_eq!(route.len(), 18);
        assert_eq!(route.last(), Some(&Position::new(5, 5)));
        assert!(route.iter().all(|p| !walls.contains(p)));
    }

    #[test]
    fn handles_obstacles_at_the_edge_of_the_coordinate_range() {
        let mut planner = AStar::new(1_000);
        let route = planner
            .find_route(
                &obstacles(&[(i64::MAX, 0), (i64::MIN, i64::MIN)]),
                Position::new(0, 0),
                Position::new(2, 0),
            )
            .unwrap();
        assert_eq!(route, vec![Position::new(1, 0), Position::new(2, 0)]);
    }

    #[test]
    fn sealed_target_with_a_distant_obstacle_stops_at_the_budget() {
        let mut planner = AStar::new(2_000);
        let err = planner
            .find_route(
                &obstacles(&[(3, 4), (5, 4), (4, 3), (4, 5), (1500, 1500)]),
                Position::new(0, 0),
                Position::new(4, 4),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RoverError::NoRouteFound {
                target: Position::new(4, 4),
                expanded: 2_000
            }
        );
        assert_eq!(planner.nodes_expanded(), 2_000);
    }

    #[test]
    fn enclosed_target_fails() {
        let mut planner = AStar::default();
        let err = planner
            .find_route(
                &obstacles(&[(3, 4), (5, 4), (4, 3), (4, 5)]),
                Position::new(0, 0),
                Position::new(4, 4),
            )
            .unwrap_err();
        assert!(matches!(err, RoverError::NoRouteFound { .. }));
        assert!(planner.nodes_expanded() > 0);
    }
}
