use std::io::BufRead;

use oxinim_engine::{Agent, AgentError, Move, Nim};

/// Agent driven by a line-oriented input stream, one move per line in
/// the form `"<row> <count>"`.
///
/// Malformed lines and read failures propagate to the caller of the
/// duel; prompting and re-prompting are console concerns that live
/// outside this crate.
#[derive(Debug)]
pub struct HumanAgent<R> {
    input: R,
}

impl<R: BufRead> HumanAgent<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Agent for HumanAgent<R> {
    fn name(&self) -> &str {
        "human"
    }

    fn select_move(&mut self, _game: &Nim) -> Result<Move, AgentError> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let malformed = || AgentError::MalformedInput {
            line: line.trim().to_string(),
        };
        let mut parts = line.split_whitespace();
        let (Some(row), Some(count), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let (Ok(row), Ok(count)) = (row.parse(), count.parse()) else {
            return Err(malformed());
        };
        Ok(Move::new(row, count))
    }
}
