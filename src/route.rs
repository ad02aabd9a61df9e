//! Turning a planned route into rover command batches.

use crate::error::{Result, RoverError};
use crate::grid::{Heading, Position};
use crate::rover::{Command, Rover};

/// Fewest turns that take `from` to `to`. An about-face is two right turns.
pub fn turn_commands(from: Heading, to: Heading) -> Vec<Command> {
    match from.right_turns_to(to) {
        0 => vec![],
        1 => vec![Command::Right],
        2 => vec![Command::Right, Command::Right],
        _ => vec![Command::Left],
    }
}

/// Command batch that turns the rover towards `point` and steps onto it.
pub fn commands_to_adjacent(position: Position, heading: Heading, point: Position) -> Result<String> {
    let facing = Heading::towards(&position, &point).ok_or(RoverError::NonAdjacentPoint {
        from: position,
        to: point,
    })?;

    let mut batch: String = turn_commands(heading, facing).into_iter().map(Command::to_char).collect();
    batch.push(Command::Forward.to_char());
    Ok(batch)
}

/// Tally of a route execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteExecution {
    pub steps: usize,
    pub turns: usize,
    pub commands: String,
    pub stopped_steps: usize,
}

/// Drive `rover` along `route`, one adjacent cell per command batch.
///
/// A step that ends `STOPPED` does not end the run; the following steps are
/// still attempted from wherever the rover is.
pub fn follow_route(rover: &mut Rover, route: &[Position]) -> Result<RouteExecution> {
    let mut execution = RouteExecution::default();

    for &point in route {
        let batch = commands_to_adjacent(rover.position(), rover.heading(), point)?;
        rover.run_commands(&batch)?;

        execution.steps += 1;
        execution.turns += batch.len() - 1;
        execution.commands.push_str(&batch);
        if rover.is_stopped() {
            execution.stopped_steps += 1;
        }
    }

    Ok(execution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ObstacleSet;

    #[test]
    fn turn_counts_are_minimal() {
        for from in Heading::ALL {
            for to in Heading::ALL {
                let turns = turn_commands(from, to);
                let expected = match from.right_turns_to(to) {
                    0 => 0,
                    2 => 2,
                    _ => 1,
                };
                assert_eq!(turns.len(), expected, "{} -> {}", from, to);

                let reached = turns.iter().fold(from, |h, c| match c {
                    Command::Left => h.left(),
                    Command::Right => h.right(),
                    _ => h,
                });
                assert_eq!(reached, to);
            }
        }
    }

    #[test]
    fn batches_for_each_neighbour() {
        let origin = Position::new(0, 0);
        assert_eq!(commands_to_adjacent(origin, Heading::North, Position::new(0, 1)).unwrap(), "F");
        assert_eq!(commands_to_adjacent(origin, Heading::North, Position::new(1, 0)).unwrap(), "RF");
        assert_eq!(commands_to_adjacent(origin, Heading::North, Position::new(-1, 0)).unwrap(), "LF");
        assert_eq!(commands_to_adjacent(origin, Heading::North, Position::new(0, -1)).unwrap(), "RRF");
    }

    #[test]
    fn rejects_points_that_are_not_adjacent() {
        let origin = Position::new(0, 0);
        for point in [Position::new(1, 1), Position::new(0, 2), origin] {
            assert_eq!(
                commands_to_adjacent(origin, Heading::East, point),
                Err(RoverError::NonAdjacentPoint { from: origin, to: point })
            );
        }
    }

    #[test]
    fn follows_a_route_to_its_end() {
        let mut rover = Rover::new(Position::new(0, 0), Heading::North);
        let route = [
            Position::new(1, 0),
            Position::new(1, -1),
            Position::new(0, -1),
            Position::new(0, 0),
        ];
        let execution = follow_route(&mut rover, &route).unwrap();

        assert_eq!(rover.position(), Position::new(0, 0));
        assert_eq!(rover.heading(), Heading::North);
        assert_eq!(execution.commands, "RFRFRFRF");
        assert_eq!(execution.steps, 4);
        assert_eq!(execution.turns, 4);
        assert_eq!(execution.stopped_steps, 0);
    }

    #[test]
    fn blocked_step_leaves_the_rest_of_the_route_unreachable() {
        let obstacles: ObstacleSet = [Position::new(0, 2)].into_iter().collect();
        let mut rover = Rover::with_obstacles(Position::new(0, 0), Heading::North, obstacles);
        let route = [Position::new(0, 1), Position::new(0, 2), Position::new(0, 3)];

        let err = follow_route(&mut rover, &route).unwrap_err();

        assert_eq!(
            err,
            RoverError::NonAdjacentPoint {
                from: Position::new(0, 1),
                to: Position::new(0, 3)
            }
        );
        assert_eq!(rover.position(), Position::new(0, 1));
        assert!(rover.is_stopped());
    }
}
