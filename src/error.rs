use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoverError {
    #[error("unrecognized command symbol {symbol:?} at index {index}")]
    UnrecognizedSymbol { symbol: char, index: usize },

    #[error("failed to read commands from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("control output channel closed")]
    ChannelClosed,
}

pub type RoverResult<T> = Result<T, RoverError>;
