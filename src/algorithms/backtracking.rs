use crate::algorithms::common::{RoutePlanner, DEFAULT_MAX_EXPANSIONS};
use crate::error::{Result, RoverError};
use crate::grid::{ObstacleSet, Position};
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Neighbour order for a search step, keyed on the sign of the offset to the
/// target. The move that shrinks the Manhattan distance fastest comes first.
pub fn preference_order(last: Position, target: Position) -> [Position; 4] {
    let (up, right, left, down) = (last.up(), last.right(), last.left(), last.down());

    use Ordering::{Equal, Greater, Less};
    match (target.x.cmp(&last.x), target.y.cmp(&last.y)) {
        (Greater, Greater) => [right, up, left, down],
        (Equal, Greater) => [up, right, left, down],
        (Less, Greater) => [up, left, right, down],
        (Less, Equal) => [left, up, down, right],
        (Less, Less) => [left, down, up, right],
        (Equal, Less) => [down, right, left, up],
        (Greater, Less) => [right, down, up, left],
        // (Equal, Equal) is the base case and never expanded.
        (Greater, Equal) | (Equal, Equal) => [right, up, down, left],
    }
}

/// One level of the depth-first search: the candidates around a cell and
/// how many of them have been tried.
struct Frame {
    candidates: [Position; 4],
    tried: usize,
}

impl Frame {
    fn new(cell: Position, target: Position) -> Self {
        Frame {
            candidates: preference_order(cell, target),
            tried: 0,
        }
    }

    fn next_candidate(&mut self) -> Option<Position> {
        let candidate = self.candidates.get(self.tried).copied();
        self.tried += 1;
        candidate
    }
}

/// Greedy depth-first route search with backtracking.
///
/// Each step tries the four neighbours in [`preference_order`] and descends
/// into the first one that is free, not already on the current branch, and not
/// the rover's own cell. The first branch to reach the target wins, so the
/// route is the first one found, not necessarily the shortest.
///
/// Runs on an explicit stack. Every descent counts against `max_expansions`;
/// running out, or exhausting every branch, fails with `NoRouteFound`.
pub struct Backtracking {
    pub max_expansions: usize,
    expanded: usize,
}

impl Default for Backtracking {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPANSIONS)
    }
}

impl Backtracking {
    pub fn new(max_expansions: usize) -> Self {
        Backtracking {
            max_expansions,
            expanded: 0,
        }
    }

    /// Extend `prefix` into a route from the rover at `start` to `target`.
    ///
    /// The search continues from the last cell of `prefix`, or from `start` if
    /// the prefix is empty. The returned route keeps the prefix at its head; if
    /// the prefix already ends on the target it comes back unchanged.
    pub fn navigate(
        &mut self,
        obstacles: &ObstacleSet,
        start: Position,
        target: Position,
        prefix: Vec<Position>,
    ) -> Result<Vec<Position>> {
        self.expanded = 0;

        let origin = prefix.last().copied().unwrap_or(start);
        if origin == target {
            return Ok(prefix);
        }

        let base = prefix.len();
        let mut on_branch: FxHashSet<Position> = prefix.iter().copied().collect();
        let mut path = prefix;
        let mut stack = vec![Frame::new(origin, target)];

        while let Some(frame) = stack.last_mut() {
            let Some(candidate) = frame.next_candidate() else {
                stack.pop();
                if path.len() > base {
                    if let Some(dead_end) = path.pop() {
                        on_branch.remove(&dead_end);
                        trace!("Backtracking from {}", dead_end);
                    }
                }
                continue;
            };

            if obstacles.contains(&candidate) || on_branch.contains(&candidate) || candidate == start {
                continue;
            }

            if self.expanded >= self.max_expansions {
                debug!(
                    "Search budget of {} cells exhausted before reaching {} (branch depth {})",
                    self.max_expansions,
                    target,
                    path.len()
                );
                return Err(RoverError::NoRouteFound {
                    target,
                    expanded: self.expanded,
                });
            }
            self.expanded += 1;

            path.push(candidate);
            on_branch.insert(candidate);
            if candidate == target {
                debug!(
                    "Route to {} found: {} cells, {} expanded",
                    target,
                    path.len(),
                    self.expanded
                );
                return Ok(path);
            }
            stack.push(Frame::new(candidate, target));
        }

        debug!(
            "Every branch towards {} is blocked ({} cells expanded)",
            target, self.expanded
        );
        Err(RoverError::NoRouteFound {
            target,
            expanded: self.expanded,
        })
    }
}

impl RoutePlanner for Backtracking {
    fn find_route(
        &mut self,
        obstacles: &ObstacleSet,
        start: Position,
        target: Position,
    ) -> Result<Vec<Position>> {
        self.navigate(obstacles, start, target, Vec::new())
    }

    fn nodes_expanded(&self) -> usize {
        self.expanded
    }

    fn name(&self) -> &'static str {
        "backtracking"
    }
}
