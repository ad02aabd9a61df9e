use crate::error::{Result, RoverError};
use crate::grid::{Heading, ObstacleSet, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STOPPED: &str = "STOPPED";

/// Primitive rover instruction, one character on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    Back,
    Left,
    Right,
}

impl Command {
    pub fn from_char(token: char) -> Option<Command> {
        match token {
            'F' => Some(Command::Forward),
            'B' => Some(Command::Back),
            'L' => Some(Command::Left),
            'R' => Some(Command::Right),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Command::Forward => 'F',
            Command::Back => 'B',
            Command::Left => 'L',
            Command::Right => 'R',
        }
    }
}

/// Snapshot of the rover returned by the status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverStatus {
    pub x: i64,
    pub y: i64,
    pub heading: Heading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RoverStatus {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn is_stopped(&self) -> bool {
        self.message.as_deref() == Some(STOPPED)
    }
}

impl fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.heading)?;
        if let Some(message) = &self.message {
            write!(f, " {}", message)?;
        }
        Ok(())
    }
}

pub struct Rover {
    position: Position,
    heading: Heading,
    message: Option<String>,
    obstacles: ObstacleSet,
}

impl Rover {
    pub fn new(position: Position, heading: Heading) -> Self {
        Rover {
            position,
            heading,
            message: None,
            obstacles: ObstacleSet::new(),
        }
    }

    pub fn with_obstacles(position: Position, heading: Heading, obstacles: ObstacleSet) -> Self {
        Rover {
            position,
            heading,
            message: None,
            obstacles,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn status(&self) -> RoverStatus {
        RoverStatus {
            x: self.position.x,
            y: self.position.y,
            heading: self.heading,
            message: self.message.clone(),
        }
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Add obstacles. Existing ones are never removed.
    pub fn set_obstacles<I: IntoIterator<Item = Position>>(&mut self, obstacles: I) {
        let before = self.obstacles.len();
        self.obstacles.extend(obstacles);
        log::debug!(
            "Added {} obstacles ({} known)",
            self.obstacles.len() - before,
            self.obstacles.len()
        );
    }

    pub fn is_obstacle(&self, pos: &Position) -> bool {
        self.obstacles.contains(pos)
    }

    pub fn is_stopped(&self) -> bool {
        self.message.as_deref() == Some(STOPPED)
    }

    /// Run a batch of `F`/`B`/`L`/`R` tokens.
    ///
    /// Tokens are committed one at a time. A move onto an obstacle sets the
    /// `STOPPED` message and drops the rest of the batch; an unknown token
    /// fails the batch, leaving already committed tokens in place.
    pub fn run_commands(&mut self, input: &str) -> Result<()> {
        self.message = None;

        for (index, token) in input.chars().enumerate() {
            let command =
                Command::from_char(token).ok_or(RoverError::InvalidCommand { token, index })?;
            if !self.apply(command) {
                log::warn!(
                    "Rover stopped at {} facing {}: obstacle ahead (token {} of {})",
                    self.position,
                    self.heading,
                    index + 1,
                    input.chars().count()
                );
                self.message = Some(STOPPED.to_string());
                break;
            }
        }

        log::trace!("Batch {:?} finished at {}", input, self.status());
        Ok(())
    }

    /// Apply a single command; returns false when blocked by an obstacle.
    fn apply(&mut self, command: Command) -> bool {
        let proposed = match command {
            Command::Forward => self.position.step(self.heading),
            Command::Back => self.position.step(self.heading.right().right()),
            Command::Left => {
                self.heading = self.heading.left();
                return true;
            }
            Command::Right => {
                self.heading = self.heading.right();
                return true;
            }
        };

        if self.obstacles.contains(&proposed) {
            return false;
        }
        self.position = proposed;
        true
    }
}
