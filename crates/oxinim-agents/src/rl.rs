use log::debug;
use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use rustc_hash::FxHashMap;

use oxinim_engine::{Agent, AgentError, Canonical, CanonicalState, Duel, DuelError, Move, Nim};

const DEFAULT_ALPHA: f64 = 0.15;
const DEFAULT_GAMMA: f64 = 0.8;
const DEFAULT_EXPLORE_RATE: f64 = 0.2;
const EXPLORE_DECAY: f64 = 1e-5;

/// Tabular Q-learning agent over canonical Nim states.
///
/// While training it plays epsilon-greedy and records every
/// (state, move) pair it takes; [`Self::learn`] then runs one
/// credit-assignment pass per finished episode. In evaluation mode it
/// plays the greedy move only and records nothing.
#[derive(Debug)]
pub struct RlAgent {
    alpha: f64,
    gamma: f64,
    explore_rate: f64,
    quality: FxHashMap<(CanonicalState, Move), f64>,
    history: Vec<(CanonicalState, Move)>,
    training: bool,
    rng: Pcg32,
}

impl RlAgent {
    /// Creates an agent in training mode, seeded from the process-wide
    /// entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed: replaying a seed
    /// reproduces a training run bit for bit against a deterministic
    /// adversary.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
            explore_rate: DEFAULT_EXPLORE_RATE,
            quality: FxHashMap::default(),
            history: Vec::new(),
            training: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    #[must_use]
    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }

    /// Number of (state, move) pairs the quality table has estimates for.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.quality.len()
    }

    /// Looks up a table entry, lazily inserting a fresh uniform random
    /// estimate.
    ///
    /// Unseen entries default to a random value rather than zero so that
    /// greedy ties break stochastically instead of favoring whichever
    /// move happens to be enumerated first.
    fn quality(&mut self, state: &CanonicalState, mv: Move) -> f64 {
        *self
            .quality
            .entry((state.clone(), mv))
            .or_insert_with(|| self.rng.random())
    }

    fn greedy_move(&mut self, state: &CanonicalState) -> Move {
        let mut best: Option<(f64, Move)> = None;
        for mv in state.moves().collect::<Vec<_>>() {
            let q = self.quality(state, mv);
            if best.is_none_or(|(bq, _)| q > bq) {
                best = Some((q, mv));
            }
        }
        best.expect("non-terminal state always has a move").1
    }

    /// One credit-assignment pass over the finished episode, most recent
    /// move first.
    ///
    /// Every step shares the same terminal reward (+1 won, -1 lost); the
    /// discounted estimate of the successor state chains the credit
    /// backward. A terminal successor counts as `next_quality = 1`: the
    /// state just vacated was a win for whoever captured it. Afterwards
    /// the history is cleared and the exploration rate decays, floored
    /// at zero to keep it a probability.
    pub fn learn(&mut self, has_won: bool) {
        let reward = if has_won { 1.0 } else { -1.0 };
        let history = std::mem::take(&mut self.history);
        for (state, mv) in history.iter().rev() {
            let successor = state.apply(*mv);
            let next_quality = if successor.is_terminal() {
                1.0
            } else {
                let mut max = f64::NEG_INFINITY;
                for next_mv in successor.moves().collect::<Vec<_>>() {
                    max = max.max(self.quality(&successor, next_mv));
                }
                max
            };
            let current = self.quality(state, *mv);
            let updated =
                (1.0 - self.alpha) * current + self.alpha * (reward + self.gamma * next_quality);
            self.quality.insert((state.clone(), *mv), updated);
        }
        self.explore_rate = (self.explore_rate - EXPLORE_DECAY).max(0.0);
    }
}

impl Default for RlAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RlAgent {
    fn name(&self) -> &str {
        "q-learning"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        let canonical = Canonical::of(game);
        let state = canonical.state();
        let mv = if self.training && self.rng.random::<f64>() < self.explore_rate {
            let moves: Vec<Move> = state.moves().collect();
            *moves
                .choose(&mut self.rng)
                .expect("non-terminal state always has a move")
        } else {
            self.greedy_move(state)
        };
        if self.training {
            self.history.push((state.clone(), mv));
        }
        Ok(canonical.translate(mv))
    }
}

/// Self-play trainer: runs episodes of the learner against a fixed
/// adversary, alternating the learner's seat by episode parity so it
/// sees both the first-mover and the second-mover game.
#[derive(Debug)]
pub struct Trainer<A> {
    rows: usize,
    adversary: A,
}

impl<A: Agent> Trainer<A> {
    pub fn new(rows: usize, adversary: A) -> Self {
        Self { rows, adversary }
    }

    /// Trains `agent` for `episodes` self-play duels and returns it in
    /// evaluation mode (exploration and history recording disabled).
    pub fn train(&mut self, mut agent: RlAgent, episodes: usize) -> Result<RlAgent, DuelError> {
        agent.set_training(true);
        for episode in 0..episodes {
            let game = Nim::new(self.rows);
            let has_won = if episode % 2 == 1 {
                Duel::new(game, &mut self.adversary, &mut agent).play()? == 1
            } else {
                Duel::new(game, &mut agent, &mut self.adversary).play()? == 0
            };
            agent.learn(has_won);
        }
        debug!(
            "trained {episodes} episodes, table holds {} entries, explore rate {:.4}",
            agent.table_len(),
            agent.explore_rate()
        );
        agent.set_training(false);
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::TakeMost;

    /// Win fraction of `agent` over `n_games`, seat alternating by
    /// parity, against a fresh `TakeMost` each game.
    fn win_fraction(agent: &mut RlAgent, rows: usize, n_games: usize) -> f64 {
        let mut adversary = TakeMost;
        let mut wins = 0_u32;
        for game_id in 0..n_games {
            let game = Nim::new(rows);
            let won = if game_id % 2 == 1 {
                Duel::new(game, &mut adversary, &mut *agent).play().unwrap() == 1
            } else {
                Duel::new(game, &mut *agent, &mut adversary).play().unwrap() == 0
            };
            wins += u32::from(won);
        }
        f64::from(wins) / n_games as f64
    }

    #[test]
    fn test_explore_rate_decays_and_floors_at_zero() {
        let mut agent = RlAgent::with_seed(1);
        let initial = agent.explore_rate();
        agent.learn(true);
        assert!(agent.explore_rate() < initial);
        for _ in 0..30_000 {
            agent.learn(true);
        }
        assert_eq!(agent.explore_rate(), 0.0);
    }

    #[test]
    fn test_evaluation_mode_records_no_history_and_stays_deterministic() {
        let mut agent = RlAgent::with_seed(5);
        agent.set_training(false);
        let game = Nim::new(3);
        let first = agent.select_move(&game).unwrap();
        for _ in 0..10 {
            assert_eq!(agent.select_move(&game).unwrap(), first);
        }
        agent.learn(true); // empty history: only the decay applies
        assert!(agent.table_len() > 0);
    }

    #[test]
    fn test_training_populates_the_quality_table() {
        let mut trainer = Trainer::new(3, TakeMost);
        let agent = trainer.train(RlAgent::with_seed(9), 50).unwrap();
        assert!(agent.table_len() > 0);
    }

    #[test]
    fn test_trained_agent_beats_its_training_adversary() {
        // regression property: after self-play against a fixed weak
        // adversary on a small board, greedy play must clearly beat it
        let mut trainer = Trainer::new(3, TakeMost);
        let mut agent = trainer.train(RlAgent::with_seed(42), 10_000).unwrap();
        let fraction = win_fraction(&mut agent, 3, 100);
        assert!(fraction >= 0.55, "win fraction {fraction}");
    }
}
