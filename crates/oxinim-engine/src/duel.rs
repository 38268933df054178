use log::debug;

use crate::{Agent, DuelError, Nim};

/// Alternates two agents on one board until it is empty.
///
/// Seat 0 moves first. The seat that makes the final move wins: its
/// opponent then faces an empty board and loses by the normal-play
/// convention.
pub struct Duel<'a> {
    game: Nim,
    seats: [&'a mut dyn Agent; 2],
    turn: usize,
}

impl<'a> Duel<'a> {
    #[must_use]
    pub fn new(game: Nim, seat0: &'a mut dyn Agent, seat1: &'a mut dyn Agent) -> Self {
        Self {
            game,
            seats: [seat0, seat1],
            turn: 0,
        }
    }

    /// Plays the duel to completion and returns the winning seat index.
    pub fn play(&mut self) -> Result<usize, DuelError> {
        while !self.game.is_terminal() {
            let agent = &mut self.seats[self.turn];
            debug!("seat {} ({}) to move\n{}", self.turn, agent.name(), self.game);
            let mv = agent.select_move(&self.game)?;
            debug!("seat {} takes {mv}", self.turn);
            self.game.apply(mv)?;
            self.turn = 1 - self.turn;
        }
        let winner = 1 - self.turn;
        debug!("seat {winner} ({}) wins", self.seats[winner].name());
        Ok(winner)
    }
}
