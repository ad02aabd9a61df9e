use crate::error::Result;
use crate::grid::{ObstacleSet, Position};

/// Default cap on cells a planner may expand before giving up.
pub const DEFAULT_MAX_EXPANSIONS: usize = 100_000;

pub trait RoutePlanner {
    /// Plan a route from `start` to `target`.
    ///
    /// The returned route excludes `start`, ends at `target`, and is empty
    /// when `start == target`. Consecutive cells are adjacent and no cell
    /// repeats.
    fn find_route(
        &mut self,
        obstacles: &ObstacleSet,
        start: Position,
        target: Position,
    ) -> Result<Vec<Position>>;

    /// Cells expanded by the most recent search.
    fn nodes_expanded(&self) -> usize {
        0 // Default: not tracked
    }

    fn name(&self) -> &'static str;
}
