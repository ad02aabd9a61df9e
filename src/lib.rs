pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod route;
pub mod rover;
pub mod simulation;
pub mod statistics;

pub use error::{Result, RoverError};
pub use grid::{Heading, ObstacleSet, Position};
pub use rover::{Rover, RoverStatus};
pub use simulation::Simulation;
