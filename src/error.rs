use crate::grid::Position;
use thiserror::Error;

/// Errors raised by the rover core.
///
/// A blocked move is not an error: it is reported through the rover's
/// `STOPPED` status message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoverError {
    #[error("Unknown command '{token}' at index {index}")]
    InvalidCommand { token: char, index: usize },

    #[error("Point {to} is not adjacent to rover position {from}")]
    NonAdjacentPoint { from: Position, to: Position },

    #[error("No route found to {target} after expanding {expanded} cells")]
    NoRouteFound { target: Position, expanded: usize },

    #[error("Invalid heading: {0}")]
    InvalidHeading(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

pub type Result<T> = std::result::Result<T, RoverError>;
