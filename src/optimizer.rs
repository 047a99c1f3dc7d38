//! Optimizer that collapses a raw command string into a run-length-encoded [`Route`].
//!
//! The entry point is [`CommandOptimizer`]. Build one with
//! [`CommandOptimizer::standard`] for the `F`/`B`/`L`/`R` alphabet, or start from
//! [`CommandOptimizer::new`] and register symbols via [`CommandOptimizer::set_symbol`].
//! Then call [`CommandOptimizer::compress`].

use crate::error::{RoverError, RoverResult};
use crate::moves::{Move, MoveKind, Route};
use crate::rover::Command;
use std::collections::HashMap;
use tracing::{debug, warn};

/// What to do with runs that cancel out to no motion (`FB`, `LLLL`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullMovePolicy {
    /// Emit them as explicit `Translate(0)` / `Turn(0)` moves.
    #[default]
    Keep,
    /// Drop them and merge the neighbouring runs that become adjacent.
    Elide,
}

/// Configuration for command compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptimizerConfig {
    pub null_moves: NullMovePolicy,
}

/// Compresses command strings into routes.
#[derive(Clone, Debug)]
pub struct CommandOptimizer {
    symbol_map: HashMap<char, Command>,
    config: OptimizerConfig,
}

impl Default for CommandOptimizer {
    fn default() -> Self {
        Self::standard(OptimizerConfig::default())
    }
}

impl CommandOptimizer {
    /// Creates an optimizer with the given configuration and an empty symbol map.
    ///
    /// Every symbol is rejected until registered with [`set_symbol`](Self::set_symbol)
    /// or [`populate_standard_symbols`](Self::populate_standard_symbols).
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            symbol_map: HashMap::new(),
            config,
        }
    }

    /// Creates an optimizer that understands `F`, `B`, `L` and `R`.
    pub fn standard(config: OptimizerConfig) -> Self {
        let mut optimizer = Self::new(config);
        optimizer.populate_standard_symbols();
        optimizer
    }

    /// Replaces the entire symbol map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, Command>) -> Self {
        self.symbol_map = map;
        self
    }

    /// Assigns a [`Command`] to a symbol, replacing any previous mapping.
    pub fn set_symbol(&mut self, symbol: char, command: Command) {
        self.symbol_map.insert(symbol, command);
    }

    /// Registers the case-sensitive standard alphabet.
    pub fn populate_standard_symbols(&mut self) {
        for command in [
            Command::Forward,
            Command::Backward,
            Command::TurnLeft,
            Command::TurnRight,
        ] {
            self.set_symbol(command.symbol(), command);
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn resolve(&self, symbol: char, index: usize) -> RoverResult<Command> {
        self.symbol_map.get(&symbol).copied().ok_or_else(|| {
            warn!(?symbol, index, "rejected command symbol");
            RoverError::UnrecognizedSymbol { symbol, index }
        })
    }

    /// Validates `commands` and maps every symbol to its [`Command`].
    ///
    /// Fails on the first unknown symbol.
    pub fn parse(&self, commands: &str) -> RoverResult<Vec<Command>> {
        commands
            .chars()
            .enumerate()
            .map(|(index, symbol)| self.resolve(symbol, index))
            .collect()
    }

    /// Compresses `commands` into a [`Route`].
    ///
    /// Consecutive symbols of the same family form a run. Each run collapses into a
    /// single move: steps are summed (`F` = +1, `B` = -1) and quarter-turns are
    /// summed (`L` = +1, `R` = -1) then reduced into `0..4`. A run is flushed when
    /// a symbol of the other family arrives and at end of input, even if its net
    /// value is zero (see [`NullMovePolicy`]).
    ///
    /// # Guarantees
    ///
    /// * The route is never longer than `commands`.
    /// * Consecutive moves always belong to different [`MoveKind`]s.
    /// * Applying the route gives the same position and heading as executing each
    ///   command individually.
    ///
    /// # Errors
    ///
    /// [`RoverError::UnrecognizedSymbol`] for the first symbol outside the map.
    /// No partial route is returned.
    pub fn compress(&self, commands: &str) -> RoverResult<Route> {
        let mut route = Route::with_capacity(commands.len());
        let mut run: Option<MoveKind> = None;
        let mut steps = 0i32;
        let mut turns = 0i32;

        for (index, symbol) in commands.chars().enumerate() {
            let command = self.resolve(symbol, index)?;
            let kind = command.kind();

            if let Some(open) = run
                && open != kind
            {
                flush(&mut route, open, &mut steps, &mut turns);
            }
            run = Some(kind);

            match command {
                Command::Forward => steps = steps.wrapping_add(1),
                Command::Backward => steps = steps.wrapping_sub(1),
                Command::TurnLeft => turns = turns.wrapping_add(1),
                Command::TurnRight => turns = turns.wrapping_sub(1),
            }
        }

        if let Some(open) = run {
            flush(&mut route, open, &mut steps, &mut turns);
        }

        if self.config.null_moves == NullMovePolicy::Elide {
            route = elide_null_moves(route);
        }

        debug!(input_len = commands.len(), route_len = route.len(), "compressed commands");
        Ok(route)
    }
}

fn flush(route: &mut Route, kind: MoveKind, steps: &mut i32, turns: &mut i32) {
    let mv = match kind {
        MoveKind::Translation => Move::Translate(std::mem::take(steps)),
        MoveKind::Rotation => Move::Turn(std::mem::take(turns).rem_euclid(4)),
    };
    debug!(?mv, "flushed run");
    route.push(mv);
}

/// Drops null moves, merging the same-family neighbours they separated.
fn elide_null_moves(route: Route) -> Route {
    let mut out = Route::with_capacity(route.len());
    for mv in route {
        if mv.is_null() {
            continue;
        }
        match (out.last().copied(), mv) {
            (Some(Move::Translate(a)), Move::Translate(b)) => {
                out.pop();
                let merged = Move::Translate(a.wrapping_add(b));
                if !merged.is_null() {
                    out.push(merged);
                }
            }
            (Some(Move::Turn(a)), Move::Turn(b)) => {
                out.pop();
                let merged = Move::Turn((a + b).rem_euclid(4));
                if !merged.is_null() {
                    out.push(merged);
                }
            }
            _ => out.push(mv),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compress(commands: &str) -> RoverResult<Route> {
        CommandOptimizer::default().compress(commands)
    }

    #[test]
    fn empty_input_gives_empty_route() {
        assert_eq!(compress("").unwrap(), Vec::new());
    }

    #[test]
    fn single_commands() {
        assert_eq!(compress("F").unwrap(), vec![Move::Translate(1)]);
        assert_eq!(compress("B").unwrap(), vec![Move::Translate(-1)]);
        assert_eq!(compress("L").unwrap(), vec![Move::Turn(1)]);
        assert_eq!(compress("R").unwrap(), vec![Move::Turn(3)]);
    }

    #[test]
    fn runs_merge() {
        assert_eq!(compress("FF").unwrap(), vec![Move::Translate(2)]);
        assert_eq!(compress("FFBFF").unwrap(), vec![Move::Translate(3)]);
        assert_eq!(compress("RRRRR").unwrap(), vec![Move::Turn(3)]);
    }

    #[test]
    fn cancelling_translation_run_is_still_emitted() {
        assert_eq!(compress("FB").unwrap(), vec![Move::Translate(0)]);
    }

    #[test]
    fn keep_policy_emits_zero_turn_mid_stream() {
        assert_eq!(
            compress("FFLRB").unwrap(),
            vec![Move::Translate(2), Move::Turn(0), Move::Translate(-1)]
        );
        assert_eq!(
            compress("FLLLLF").unwrap(),
            vec![Move::Translate(1), Move::Turn(0), Move::Translate(1)]
        );
    }

    #[test]
    fn elide_policy_drops_zero_runs_and_merges() {
        let optimizer = CommandOptimizer::standard(OptimizerConfig {
            null_moves: NullMovePolicy::Elide,
        });
        assert_eq!(optimizer.compress("FFLRB").unwrap(), vec![Move::Translate(1)]);
        assert_eq!(optimizer.compress("FB").unwrap(), Vec::new());
        assert_eq!(optimizer.compress("LFBL").unwrap(), vec![Move::Turn(2)]);
        assert_eq!(optimizer.compress("LFBRRL").unwrap(), Vec::new());
        assert_eq!(
            optimizer.compress("FLFRRB").unwrap(),
            compress("FLFRRB").unwrap()
        );
    }

    #[test]
    fn invalid_symbol_fails_fast() {
        match compress("FFLXBR") {
            Err(RoverError::UnrecognizedSymbol { symbol, index }) => {
                assert_eq!(symbol, 'X');
                assert_eq!(index, 3);
            }
            other => panic!("expected UnrecognizedSymbol, got {other:?}"),
        }
    }

    #[test]
    fn symbols_are_case_sensitive() {
        assert!(matches!(
            compress("f"),
            Err(RoverError::UnrecognizedSymbol { symbol: 'f', index: 0 })
        ));
    }

    #[test]
    fn empty_map_rejects_everything() {
        let optimizer = CommandOptimizer::new(OptimizerConfig::default());
        assert!(optimizer.compress("F").is_err());
        assert_eq!(optimizer.compress("").unwrap(), Vec::new());
    }

    #[test]
    fn custom_symbols() {
        let mut optimizer = CommandOptimizer::new(OptimizerConfig::default());
        optimizer.set_symbol('^', Command::Forward);
        optimizer.set_symbol('<', Command::TurnLeft);
        assert_eq!(
            optimizer.compress("^^<^").unwrap(),
            vec![Move::Translate(2), Move::Turn(1), Move::Translate(1)]
        );
    }

    #[test]
    fn with_map_replaces_standard_symbols() {
        let optimizer = CommandOptimizer::default()
            .with_map(HashMap::from([('w', Command::Forward), ('s', Command::Backward)]));
        assert_eq!(optimizer.compress("wws").unwrap(), vec![Move::Translate(1)]);
        assert!(optimizer.compress("F").is_err());
        assert_eq!(optimizer.config().null_moves, NullMovePolicy::Keep);
    }

    #[test]
    fn parse_maps_each_symbol() {
        let optimizer = CommandOptimizer::default();
        assert_eq!(
            optimizer.parse("FRB").unwrap(),
            vec![Command::Forward, Command::TurnRight, Command::Backward]
        );
        assert!(optimizer.parse("F R").is_err());
    }

    #[test]
    fn route_alternates_and_never_grows() {
        let input = "FFRBLLLLFRRRFBBLRLF";
        let route = compress(input).unwrap();
        assert!(route.len() <= input.len());
        for pair in route.windows(2) {
            assert_ne!(pair[0].kind(), pair[1].kind());
        }
    }
}
