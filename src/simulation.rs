use crate::algorithms::a_star::AStar;
use crate::algorithms::backtracking::Backtracking;
use crate::algorithms::common::{RoutePlanner, DEFAULT_MAX_EXPANSIONS};
use crate::config::{Config, PlannerKind};
use crate::error::Result;
use crate::grid::{GridView, Heading, ObstacleSet, Position};
use crate::route::follow_route;
use crate::rover::{Rover, RoverStatus};
use crate::statistics::NavigationSummary;
use std::time::Instant;

/// One rover session: the rover, its obstacles and the planner that drives it.
///
/// Callers own the session and must hold `&mut` to change it, so command
/// batches against the same rover never overlap.
pub struct Simulation {
    rover: Rover,
    planner: Box<dyn RoutePlanner>,
    /// Cap for the A* pass that measures the shortest route.
    max_expansions: usize,
    last_route: Vec<Position>,
}

impl Simulation {
    pub fn new(position: Position, heading: Heading, planner: Box<dyn RoutePlanner>) -> Self {
        Simulation {
            rover: Rover::new(position, heading),
            planner,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            last_route: Vec::new(),
        }
    }

    /// Session with the backtracking planner at its default budget.
    pub fn with_backtracking(position: Position, heading: Heading) -> Self {
        Self::new(position, heading, Box::new(Backtracking::default()))
    }

    pub fn from_config(config: &Config) -> Self {
        let planner: Box<dyn RoutePlanner> = match config.planner {
            PlannerKind::Backtracking => Box::new(Backtracking::new(config.max_expansions)),
            PlannerKind::AStar => Box::new(AStar::new(config.max_expansions)),
        };

        let mut simulation = Simulation::new(config.start(), config.heading, planner);
        simulation.max_expansions = config.max_expansions;

        let mut obstacles: ObstacleSet = config.obstacles.iter().copied().collect();
        if config.random_obstacles > 0 {
            let mut keep_clear = vec![config.start()];
            keep_clear.extend(config.target);
            obstacles.extend(
                ObstacleSet::random(
                    config.random_obstacles,
                    config.start(),
                    config.area,
                    &keep_clear,
                    config.seed,
                )
                .iter()
                .copied(),
            );
        }
        simulation.set_obstacles(obstacles.iter().copied());
        simulation
    }

    /// Replace the rover and its obstacles.
    pub fn initialize(&mut self, position: Position, heading: Heading, obstacles: Option<Vec<Position>>) {
        log::info!("Initializing rover at {} facing {}", position, heading);
        self.rover = Rover::new(position, heading);
        self.last_route.clear();
        if let Some(obstacles) = obstacles {
            self.rover.set_obstacles(obstacles);
        }
    }

    pub fn status(&self) -> RoverStatus {
        self.rover.status()
    }

    pub fn rover(&self) -> &Rover {
        &self.rover
    }

    pub fn planner_name(&self) -> &'static str {
        self.planner.name()
    }

    /// Route taken by the most recent navigate call.
    pub fn last_route(&self) -> &[Position] {
        &self.last_route
    }

    pub fn set_obstacles<I: IntoIterator<Item = Position>>(&mut self, obstacles: I) {
        self.rover.set_obstacles(obstacles);
    }

    pub fn run_commands(&mut self, commands: &str) -> Result<()> {
        self.rover.run_commands(commands)?;
        log::info!("Ran {:?}: {}", commands, self.rover.status());
        Ok(())
    }

    /// Plan a route to `target` and drive the rover along it.
    pub fn navigate(&mut self, target: Position) -> Result<NavigationSummary> {
        let start = self.rover.position();

        let plan_start = Instant::now();
        let route = self
            .planner
            .find_route(self.rover.obstacles(), start, target)?;
        let planning_time = plan_start.elapsed();

        let optimal_route_length =
            Self::calculate_optimal_route_length(self.rover.obstacles(), start, target, self.max_expansions);

        log::info!(
            "Planned {} cells from {} to {} with {} in {:.2?}",
            route.len(),
            start,
            target,
            self.planner.name(),
            planning_time
        );

        self.last_route = route.clone();
        let execution = follow_route(&mut self.rover, &route)?;
        let arrived = self.rover.position() == target;
        if !arrived {
            log::warn!("Rover ended at {} short of {}", self.rover.position(), target);
        }

        Ok(NavigationSummary {
            planner: self.planner.name().to_string(),
            start,
            target,
            route,
            optimal_route_length,
            nodes_expanded: self.planner.nodes_expanded(),
            planning_time_us: u64::try_from(planning_time.as_micros()).unwrap_or(u64::MAX),
            commands: execution.commands,
            turns: execution.turns,
            stopped_steps: execution.stopped_steps,
            arrived,
        })
    }

    /// ASCII view of the area around the rover.
    pub fn render(&self, target: Option<Position>, radius: i64) -> String {
        GridView {
            obstacles: self.rover.obstacles(),
            rover: self.rover.position(),
            heading: self.rover.heading(),
            target,
            route: &self.last_route,
            radius,
        }
        .to_string()
    }

    /// Shortest route length from `start` to `target`, if A* finds one within
    /// `max_expansions`.
    fn calculate_optimal_route_length(
        obstacles: &ObstacleSet,
        start: Position,
        target: Position,
        max_expansions: usize,
    ) -> Option<usize> {
        let mut a_star = AStar::new(max_expansions);
        a_star.find_route(obstacles, start, target).ok().map(|route| route.len())
    }
}
