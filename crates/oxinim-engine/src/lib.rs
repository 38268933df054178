//! Core rules engine for the game of Nim.
//!
//! Provides the board state ([`Nim`]), moves, the symmetry-reduced
//! [`CanonicalState`] used as a search/learning key, the [`Agent`]
//! capability contract, and the [`Duel`] harness that alternates two
//! agents until the board is empty.

pub use self::{agent::*, canonical::*, duel::*, game::*};

pub mod agent;
pub mod canonical;
pub mod duel;
pub mod game;

/// A move that addresses a missing row, takes zero objects, or takes
/// more objects than the row holds.
#[derive(Debug, Clone, Copy, derive_more::Display, derive_more::Error)]
#[display("illegal move: take {count} from row {row}")]
pub struct IllegalMoveError {
    pub row: usize,
    pub count: u32,
}

/// Failure to produce a move.
///
/// Search and learned agents always return a move; only input-driven
/// agents can fail here.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AgentError {
    #[display("failed to read move input: {_0}")]
    Input(std::io::Error),
    #[display("malformed move input {line:?}, expected \"<row> <count>\"")]
    #[from(ignore)]
    MalformedInput {
        #[error(not(source))]
        line: String,
    },
}

/// A duel aborted before reaching a terminal board.
///
/// An illegal move indicates a bug in the offending agent; it is never
/// retried.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DuelError {
    #[display("agent failed to produce a move: {_0}")]
    Agent(AgentError),
    #[display("agent produced an illegal move: {_0}")]
    IllegalMove(IllegalMoveError),
}
