//! Errors raised while repairing, parsing, and replaying a game record.
//!
//! Every variant is terminal for the game it was raised on. Callers
//! processing a batch decide whether to skip and continue.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The record contains the `[ZZ]` move token, which this archive uses for
    /// corrupt moves.
    #[error("record contains invalid [ZZ] move")]
    MalformedMove,

    #[error("record declares a handicap of {handicap} but has no handicap stones")]
    MissingHandicapStones { handicap: usize },

    #[error("record parse error: {0}")]
    RecordParse(String),

    #[error("record has no moves")]
    EmptyGame,

    #[error("point ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("illegal move: point ({row}, {col}) not empty")]
    PointOccupied { row: usize, col: usize },

    #[error("illegal move: suicide at ({row}, {col})")]
    IllegalSuicideMove { row: usize, col: usize },

    #[error("move {move_number} cannot be replayed: {source}")]
    InvalidGameReplay {
        move_number: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid {property} value {value:?}")]
    InvalidMetadata { property: String, value: String },

    #[error("invalid record path pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Error::RecordParse(format!("at byte {offset}: {}", message.into()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
