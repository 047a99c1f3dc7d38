//! Rover state and the motion engine that drives it.

use crate::moves::{Move, MoveKind};
use glam::IVec2;
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// A cell on the unbounded integer grid. `x` grows eastward, `y` northward.
pub type Position = IVec2;

/// Cardinal direction the rover is facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Heading {
    #[default]
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Rotation order. One step forward in this table is a quarter-turn
    /// counter-clockwise (a left turn).
    pub const CYCLE: [Heading; 4] = [
        Heading::North,
        Heading::West,
        Heading::South,
        Heading::East,
    ];

    fn cycle_index(self) -> i32 {
        match self {
            Heading::North => 0,
            Heading::West => 1,
            Heading::South => 2,
            Heading::East => 3,
        }
    }

    /// Returns the heading reached after `quarter_turns` counter-clockwise
    /// quarter-turns. Negative values turn clockwise.
    pub fn rotated(self, quarter_turns: i32) -> Heading {
        let idx = (self.cycle_index() + quarter_turns.rem_euclid(4)).rem_euclid(4);
        Self::CYCLE[idx as usize]
    }

    /// Unit displacement of one forward step.
    pub fn unit(self) -> IVec2 {
        match self {
            Heading::North => IVec2::Y,
            Heading::East => IVec2::X,
            Heading::South => IVec2::NEG_Y,
            Heading::West => IVec2::NEG_X,
        }
    }

    /// Single-letter code: `N`, `E`, `S` or `W`.
    pub fn code(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Raw commands accepted by the rover, one per input symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// One step along the current heading (`F`).
    Forward,
    /// One step against the current heading (`B`).
    Backward,
    /// Quarter-turn counter-clockwise (`L`).
    TurnLeft,
    /// Quarter-turn clockwise (`R`).
    TurnRight,
}

impl Command {
    pub fn symbol(self) -> char {
        match self {
            Command::Forward => 'F',
            Command::Backward => 'B',
            Command::TurnLeft => 'L',
            Command::TurnRight => 'R',
        }
    }

    pub fn kind(self) -> MoveKind {
        match self {
            Command::Forward | Command::Backward => MoveKind::Translation,
            Command::TurnLeft | Command::TurnRight => MoveKind::Rotation,
        }
    }

    /// The single-command equivalent [`Move`].
    pub fn as_move(self) -> Move {
        match self {
            Command::Forward => Move::Translate(1),
            Command::Backward => Move::Translate(-1),
            Command::TurnLeft => Move::Turn(1),
            Command::TurnRight => Move::Turn(-1),
        }
    }
}

/// Initial placement of a rover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoverConfig {
    pub start_position: Position,
    pub start_heading: Heading,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            start_position: IVec2::new(1, 1),
            start_heading: Heading::North,
        }
    }
}

/// Position and heading at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub position: Position,
    pub heading: Heading,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: ({}, {}), heading: {}",
            self.position.x, self.position.y, self.heading
        )
    }
}

/// A move together with the state it left the rover in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub applied: Move,
    pub state: Snapshot,
}

/// The vehicle. Owned by exactly one caller; every mutation goes through `&mut self`.
///
/// Coordinates are `i32` and wrap around at the edges of that range, so every
/// move is total.
#[derive(Clone, Debug, PartialEq)]
pub struct Rover {
    position: Position,
    heading: Heading,
}

impl Default for Rover {
    fn default() -> Self {
        Self::new(RoverConfig::default())
    }
}

impl Rover {
    pub fn new(config: RoverConfig) -> Self {
        Self {
            position: config.start_position,
            heading: config.start_heading,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            heading: self.heading,
        }
    }

    /// Moves `steps` cells along the current heading. Negative values back up.
    pub fn move_by(&mut self, steps: i32) {
        let offset = self.heading.unit().wrapping_mul(IVec2::splat(steps));
        self.position = self.position.wrapping_add(offset);
    }

    /// Turns `quarter_turns` counter-clockwise; negative values turn clockwise.
    pub fn rotate(&mut self, quarter_turns: i32) {
        self.heading = self.heading.rotated(quarter_turns);
    }

    /// Executes one raw command directly, bypassing the optimizer.
    pub fn execute(&mut self, command: Command) {
        self.apply_move(command.as_move());
    }

    pub fn apply_move(&mut self, mv: Move) {
        match mv {
            Move::Translate(steps) => self.move_by(steps),
            Move::Turn(quarter_turns) => self.rotate(quarter_turns),
        }
        trace!(
            ?mv,
            x = self.position.x,
            y = self.position.y,
            heading = %self.heading,
            "applied move"
        );
    }

    /// Applies every move of `route` in order.
    pub fn apply(&mut self, route: &[Move]) {
        for &mv in route {
            self.apply_move(mv);
        }
    }

    /// Like [`apply`](Self::apply), but records the state reached after each move.
    pub fn apply_traced(&mut self, route: &[Move]) -> Vec<TraceStep> {
        route
            .iter()
            .map(|&mv| {
                self.apply_move(mv);
                TraceStep {
                    applied: mv,
                    state: self.snapshot(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_one_facing_north() {
        let rover = Rover::default();
        assert_eq!(rover.position(), IVec2::new(1, 1));
        assert_eq!(rover.heading(), Heading::North);
    }

    #[test]
    fn full_turns_leave_heading_unchanged() {
        for heading in Heading::CYCLE {
            assert_eq!(heading.rotated(4), heading);
            assert_eq!(heading.rotated(-4), heading);
            assert_eq!(heading.rotated(0), heading);
        }
    }

    #[test]
    fn single_turns_go_opposite_ways() {
        assert_eq!(Heading::North.rotated(1), Heading::West);
        assert_eq!(Heading::North.rotated(-1), Heading::East);
        assert_eq!(Heading::East.rotated(1), Heading::North);
        assert_eq!(Heading::West.rotated(-1), Heading::North);
        assert_eq!(Heading::South.rotated(-3), Heading::East);
        assert_eq!(Heading::South.rotated(7), Heading::West);
    }

    #[test]
    fn move_follows_heading_axis() {
        let cases = [
            (Heading::North, IVec2::new(1, 4)),
            (Heading::South, IVec2::new(1, -2)),
            (Heading::East, IVec2::new(4, 1)),
            (Heading::West, IVec2::new(-2, 1)),
        ];
        for (heading, expected) in cases {
            let mut rover = Rover::new(RoverConfig {
                start_heading: heading,
                ..Default::default()
            });
            rover.move_by(3);
            assert_eq!(rover.position(), expected, "heading {heading}");
            assert_eq!(rover.heading(), heading);
        }
    }

    #[test]
    fn negative_steps_back_up() {
        let mut rover = Rover::new(RoverConfig {
            start_heading: Heading::East,
            ..Default::default()
        });
        rover.move_by(-5);
        assert_eq!(rover.position(), IVec2::new(-4, 1));
        assert_eq!(rover.heading(), Heading::East);
    }

    #[test]
    fn rotate_never_moves() {
        let mut rover = Rover::default();
        rover.rotate(3);
        assert_eq!(rover.position(), IVec2::new(1, 1));
        assert_eq!(rover.heading(), Heading::East);
    }

    #[test]
    fn traced_apply_records_each_step() {
        let mut rover = Rover::default();
        let trace = rover.apply_traced(&[Move::Translate(2), Move::Turn(3), Move::Translate(1)]);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0].applied, Move::Translate(2));
        assert_eq!(trace[0].state.position, IVec2::new(1, 3));
        assert_eq!(trace[1].state.heading, Heading::East);
        assert_eq!(trace[2].state.position, IVec2::new(2, 3));
        assert_eq!(trace[2].state, rover.snapshot());
    }

    #[test]
    fn snapshot_display() {
        let snap = Snapshot {
            position: IVec2::new(-1, 2),
            heading: Heading::East,
        };
        assert_eq!(snap.to_string(), "Position: (-1, 2), heading: E");
    }

    #[test]
    fn single_commands_match_their_moves() {
        let mut rover = Rover::default();
        rover.execute(Command::TurnRight);
        assert_eq!(rover.heading(), Heading::East);
        rover.execute(Command::Backward);
        assert_eq!(rover.position(), IVec2::new(0, 1));
        assert_eq!(Command::TurnLeft.kind(), MoveKind::Rotation);
    }

    #[test]
    fn coordinates_wrap_instead_of_overflowing() {
        let mut rover = Rover::new(RoverConfig {
            start_heading: Heading::South,
            ..Default::default()
        });
        rover.move_by(i32::MIN);
        assert_eq!(rover.position(), IVec2::new(1, i32::MIN + 1));

        let mut rover = Rover::new(RoverConfig {
            start_position: IVec2::new(1, i32::MAX),
            start_heading: Heading::North,
        });
        rover.apply_move(Move::Translate(1));
        assert_eq!(rover.position(), IVec2::new(1, i32::MIN));
        rover.move_by(-1);
        assert_eq!(rover.position(), IVec2::new(1, i32::MAX));
    }
}
