use crate::error::RoverError;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Position { x, y }
    }

    pub fn up(&self) -> Position {
        Position::new(self.x, self.y.saturating_add(1))
    }

    pub fn right(&self) -> Position {
        Position::new(self.x.saturating_add(1), self.y)
    }

    pub fn left(&self) -> Position {
        Position::new(self.x.saturating_sub(1), self.y)
    }

    pub fn down(&self) -> Position {
        Position::new(self.x, self.y.saturating_sub(1))
    }

    /// The four axis-aligned neighbours: up, right, left, down.
    pub fn neighbors(&self) -> [Position; 4] {
        [self.up(), self.right(), self.left(), self.down()]
    }

    pub fn manhattan_distance(&self, other: &Position) -> u64 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Position reached by moving one cell along `heading`. Coordinates
    /// saturate at the edge of the `i64` range.
    pub fn step(&self, heading: Heading) -> Position {
        let (dx, dy) = heading.delta();
        Position::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"x,y"`, optionally wrapped in parentheses.
impl FromStr for Position {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = trimmed
            .split_once(',')
            .ok_or_else(|| RoverError::InvalidPosition(s.to_string()))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| RoverError::InvalidPosition(s.to_string()))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| RoverError::InvalidPosition(s.to_string()))?;
        Ok(Position { x, y })
    }
}

/// Compass heading. Turning right walks NORTH -> EAST -> SOUTH -> WEST -> NORTH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    pub fn right(self) -> Heading {
        Heading::ALL[(self.index() + 1) % 4]
    }

    pub fn left(self) -> Heading {
        Heading::ALL[(self.index() + 3) % 4]
    }

    /// Number of right turns needed to go from `self` to `other` (0..=3).
    pub fn right_turns_to(self, other: Heading) -> usize {
        (other.index() + 4 - self.index()) % 4
    }

    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    /// Heading that moves from `from` onto the adjacent cell `to`.
    pub fn towards(from: &Position, to: &Position) -> Option<Heading> {
        if !from.is_adjacent(to) {
            return None;
        }
        Heading::ALL.into_iter().find(|h| from.step(*h) == *to)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::North => "NORTH",
            Heading::East => "EAST",
            Heading::South => "SOUTH",
            Heading::West => "WEST",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Heading {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORTH" | "N" => Ok(Heading::North),
            "EAST" | "E" => Ok(Heading::East),
            "SOUTH" | "S" => Ok(Heading::South),
            "WEST" | "W" => Ok(Heading::West),
            _ => Err(RoverError::InvalidHeading(s.to_string())),
        }
    }
}

/// Sparse set of blocked cells on an unbounded grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleSet {
    cells: FxHashSet<Position>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.cells.contains(pos)
    }

    pub fn insert(&mut self, pos: Position) -> bool {
        self.cells.insert(pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    /// Inclusive (min, max) corners of the box holding every obstacle.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut iter = self.cells.iter();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| {
            (
                Position::new(min.x.min(p.x), min.y.min(p.y)),
                Position::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    /// Scatter `count` obstacles in the square `[center - area, center + area]`,
    /// never on any of the `keep_clear` cells.
    pub fn random(
        count: usize,
        center: Position,
        area: i64,
        keep_clear: &[Position],
        seed: Option<u64>,
    ) -> Self {
        let mut rng = if let Some(seed) = seed {
            rand::rngs::StdRng::seed_from_u64(seed)
        } else {
            rand::rngs::StdRng::from_entropy()
        };

        let area = area.max(1);
        let mut obstacles = ObstacleSet::new();
        let mut attempts = 0;
        let max_attempts = count.saturating_mul(10);

        while obstacles.len() < count && attempts < max_attempts {
            let pos = Position::new(
                rng.gen_range(center.x.saturating_sub(area)..=center.x.saturating_add(area)),
                rng.gen_range(center.y.saturating_sub(area)..=center.y.saturating_add(area)),
            );
            if !keep_clear.contains(&pos) {
                obstacles.insert(pos);
            }
            attempts += 1;
        }

        log::debug!(
            "Scattered {} obstacles around {} (requested {}, {} attempts)",
            obstacles.len(),
            center,
            count,
            attempts
        );
        obstacles
    }
}

impl Extend<Position> for ObstacleSet {
    fn extend<T: IntoIterator<Item = Position>>(&mut self, iter: T) {
        self.cells.extend(iter);
    }
}

impl FromIterator<Position> for ObstacleSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        ObstacleSet {
            cells: iter.into_iter().collect(),
        }
    }
}

/// ASCII window onto the grid, centred on the rover. North is up.
pub struct GridView<'a> {
    pub obstacles: &'a ObstacleSet,
    pub rover: Position,
    pub heading: Heading,
    pub target: Option<Position>,
    pub route: &'a [Position],
    pub radius: i64,
}

impl GridView<'_> {
    fn cell_char(&self, pos: Position) -> char {
        if pos == self.rover {
            match self.heading {
                Heading::North => '^',
                Heading::East => '>',
                Heading::South => 'v',
                Heading::West => '<',
            }
        } else if Some(pos) == self.target {
            'G'
        } else if self.obstacles.contains(&pos) {
            '#'
        } else if self.route.contains(&pos) {
            '*'
        } else {
            '.'
        }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Legend: ^>v<=Rover, G=Target, #=Obstacle, *=Route, .=Empty")?;

        let min_x = self.rover.x.saturating_sub(self.radius);
        let max_x = self.rover.x.saturating_add(self.radius);

        write!(f, "     ")?;
        for x in min_x..=max_x {
            write!(f, "{:2}", x.rem_euclid(10))?;
        }
        writeln!(f)?;

        for y in (self.rover.y.saturating_sub(self.radius)..=self.rover.y.saturating_add(self.radius)).rev() {
            write!(f, "{:4} ", y)?;
            for x in min_x..=max_x {
                write!(f, " {}", self.cell_char(Position::new(x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
