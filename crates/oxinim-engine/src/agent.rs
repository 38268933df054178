use crate::{AgentError, Move, Nim};

/// A move-producing capability: given the live board, return a legal
/// move for the player to act.
///
/// Returning an illegal move is a programming error and aborts the duel
/// in progress. Only input-driven agents are expected to ever return
/// `Err`; re-prompting on bad input is the caller's concern.
pub trait Agent {
    /// Display name used in duel logs.
    fn name(&self) -> &str;

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError>;
}
