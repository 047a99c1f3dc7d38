//! Orchestration: raw input in, rover state out.
//!
//! [`Mission`] owns one [`Rover`] and one [`CommandOptimizer`] and wires them
//! together. The helpers here are the thin adapters around the core: reading a
//! command file, the token-driven interactive loop, and user-facing error text.

use crate::error::{RoverError, RoverResult};
use crate::moves::Route;
use crate::optimizer::CommandOptimizer;
use crate::rover::{Rover, RoverConfig, Snapshot, TraceStep};
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, warn};

/// Tokens understood by [`Mission::interactive_control`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlToken {
    Up,
    Down,
    Left,
    Right,
    Exit,
}

impl ControlToken {
    pub fn parse(token: &str) -> Option<ControlToken> {
        match token {
            "up" => Some(ControlToken::Up),
            "down" => Some(ControlToken::Down),
            "left" => Some(ControlToken::Left),
            "right" => Some(ControlToken::Right),
            "exit" => Some(ControlToken::Exit),
            _ => None,
        }
    }
}

pub struct Mission {
    rover: Rover,
    optimizer: CommandOptimizer,
}

impl Default for Mission {
    fn default() -> Self {
        Self::new(RoverConfig::default(), CommandOptimizer::default())
    }
}

impl Mission {
    pub fn new(rover_config: RoverConfig, optimizer: CommandOptimizer) -> Self {
        Self {
            rover: Rover::new(rover_config),
            optimizer,
        }
    }

    pub fn rover(&self) -> &Rover {
        &self.rover
    }

    /// Compresses trimmed `commands` without touching the rover.
    pub fn plan(&self, commands: &str) -> RoverResult<Route> {
        self.optimizer.compress(commands.trim())
    }

    /// Compresses `commands`, drives the rover along the result and returns where it ended up.
    ///
    /// On an invalid symbol the rover is left untouched.
    pub fn calculate_route(&mut self, commands: &str) -> RoverResult<Snapshot> {
        let route = self.plan(commands)?;
        self.rover.apply(&route);
        let snapshot = self.rover.snapshot();
        info!(moves = route.len(), %snapshot, "route complete");
        Ok(snapshot)
    }

    /// Like [`calculate_route`](Self::calculate_route), returning every applied move
    /// with the state it produced.
    pub fn calculate_route_traced(&mut self, commands: &str) -> RoverResult<Vec<TraceStep>> {
        let route = self.plan(commands)?;
        Ok(self.rover.apply_traced(&route))
    }

    /// Drives the rover one step per token until `exit` arrives or `input` closes.
    ///
    /// `up`/`down` move one cell forward/backward, `left`/`right` turn a quarter.
    /// Every valid token is answered with the new state on `output`; unknown tokens
    /// are answered with a hint. `output` is dropped on return.
    ///
    /// # Errors
    ///
    /// [`RoverError::ChannelClosed`] if the receiving side of `output` goes away.
    pub fn interactive_control(
        &mut self,
        input: Receiver<String>,
        output: Sender<String>,
    ) -> RoverResult<()> {
        for raw in input {
            let token = raw.trim();
            let reply = match ControlToken::parse(token) {
                Some(ControlToken::Exit) => {
                    debug!("interactive control finished");
                    return Ok(());
                }
                Some(ControlToken::Up) => self.steer(|rover| rover.move_by(1)),
                Some(ControlToken::Down) => self.steer(|rover| rover.move_by(-1)),
                Some(ControlToken::Left) => self.steer(|rover| rover.rotate(1)),
                Some(ControlToken::Right) => self.steer(|rover| rover.rotate(-1)),
                None => {
                    warn!(token, "unknown control token");
                    format!("Unknown command {token:?}; use up, down, left, right or exit.")
                }
            };
            output.send(reply).map_err(|_| RoverError::ChannelClosed)?;
        }
        Ok(())
    }

    fn steer(&mut self, action: impl FnOnce(&mut Rover)) -> String {
        action(&mut self.rover);
        self.rover.snapshot().to_string()
    }
}

/// Reads a command string from `path`, trimming surrounding whitespace.
pub fn read_commands(path: impl AsRef<Path>) -> RoverResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_owned())
        .map_err(|source| RoverError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Message suitable for showing to an operator.
pub fn describe_error(err: &RoverError) -> String {
    match err {
        RoverError::UnrecognizedSymbol { symbol, index } => format!(
            "Invalid route: unexpected symbol {symbol:?} at position {}; a route may only contain F, B, L and R.",
            index + 1
        ),
        other => format!("Error: {other}"),
    }
}
