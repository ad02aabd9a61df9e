use crate::algorithms::common::DEFAULT_MAX_EXPANSIONS;
use crate::grid::{Heading, Position};
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerKind {
    /// Greedy depth-first search with backtracking
    Backtracking,
    /// Shortest route via A*
    #[value(name = "a_star")]
    AStar,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Drive a grid rover around obstacles", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub x: i64,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub y: i64,

    #[arg(long, default_value = "NORTH")]
    pub heading: Heading,

    /// Obstacle cell as `x,y`; repeatable
    #[arg(long = "obstacle", value_name = "X,Y", allow_hyphen_values = true)]
    pub obstacles: Vec<Position>,

    /// Scatter this many random obstacles around the rover
    #[arg(long, default_value_t = 0)]
    pub random_obstacles: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Half-width of the random obstacle area and of the rendered window
    #[arg(long, default_value_t = 10)]
    pub area: i64,

    /// Command batch of F, B, L and R, run before navigating
    #[arg(long)]
    pub commands: Option<String>,

    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub target: Option<Position>,

    #[arg(long, value_enum, default_value_t = PlannerKind::Backtracking)]
    pub planner: PlannerKind,

    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    pub max_expansions: usize,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,
}

impl Config {
    pub fn start(&self) -> Position {
        Position::new(self.x, self.y)
    }
}
