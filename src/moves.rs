use serde::Serialize;

/// One compressed unit of motion.
///
/// Produced by the [`CommandOptimizer`](crate::CommandOptimizer) and consumed by
/// [`Rover::apply`](crate::Rover::apply). Never mutated once emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    /// Signed step count along the current heading. Negative means backward.
    Translate(i32),
    /// Signed quarter-turn count, counter-clockwise positive.
    ///
    /// The optimizer always emits values in `0..4`; the rover accepts any value.
    Turn(i32),
}

/// The two families of moves. Consecutive moves of a route never share a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Translation,
    Rotation,
}

impl Move {
    pub fn kind(self) -> MoveKind {
        match self {
            Move::Translate(_) => MoveKind::Translation,
            Move::Turn(_) => MoveKind::Rotation,
        }
    }

    /// `true` when applying the move leaves the rover unchanged.
    pub fn is_null(self) -> bool {
        match self {
            Move::Translate(steps) => steps == 0,
            Move::Turn(quarter_turns) => quarter_turns.rem_euclid(4) == 0,
        }
    }
}

/// An ordered list of moves.
pub type Route = Vec<Move>;
