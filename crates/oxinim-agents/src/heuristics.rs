use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use oxinim_engine::{Agent, AgentError, Move, Nim};

fn nim_sum(game: &Nim) -> u32 {
    game.rows().iter().fold(0, |acc, &count| acc ^ count)
}

fn first_positive_row(game: &Nim) -> usize {
    game.rows()
        .iter()
        .position(|&count| count > 0)
        .expect("non-terminal game has a non-empty row")
}

/// Clears the fullest row in one move. Loses to anything that counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeMost;

impl Agent for TakeMost {
    fn name(&self) -> &str {
        "take-most"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        let (row, &count) = game
            .rows()
            .iter()
            .enumerate()
            .max_by_key(|&(row, &count)| (count, row))
            .expect("game has at least one row");
        Ok(Move::new(row, count))
    }
}

/// Optimal play by the nim-sum theorem: take the move that zeroes the
/// XOR of the row counts, or a single object when no such move exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimSum;

impl Agent for NimSum {
    fn name(&self) -> &str {
        "nim-sum"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        let target = nim_sum(game);
        for (row, &count) in game.rows().iter().enumerate() {
            // count ^ target < count exactly when this row can absorb
            // the whole nim-sum
            if count ^ target < count {
                return Ok(Move::new(row, count - (count ^ target)));
            }
        }
        Ok(Move::new(first_positive_row(game), 1))
    }
}

/// The nim-sum move plus one extra object, clamped to the row. Always
/// one object away from optimal: a punching bag for training runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overshoot;

impl Agent for Overshoot {
    fn name(&self) -> &str {
        "overshoot"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        let best = NimSum.select_move(game)?;
        let available = game.rows()[best.row];
        Ok(Move::new(best.row, (best.count + 1).min(available)))
    }
}

/// Uniformly random legal move from its own seeded generator.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: Pcg32,
}

impl RandomAgent {
    /// Creates an agent seeded from the process-wide entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        let rows: Vec<usize> = game
            .rows()
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(row, _)| row)
            .collect();
        let &row = rows
            .choose(&mut self.rng)
            .expect("non-terminal game has a non-empty row");
        let count = self.rng.random_range(1..=game.rows()[row]);
        Ok(Move::new(row, count))
    }
}
