use rustc_hash::FxHashMap;

use oxinim_engine::{Agent, AgentError, Canonical, CanonicalState, Move, Nim};

/// Value of a state from the perspective of the player about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// A solved canonical state: its outcome and a move achieving it.
///
/// Terminal states carry no move. For lost states the move is merely
/// some legal continuation; every option loses equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solved {
    pub outcome: Outcome,
    pub best: Option<Move>,
}

/// Exact memoized search over canonical Nim states.
///
/// Nim is an impartial normal-play game, so a state's value depends only
/// on "the player to move", never on which seat that player occupies:
/// the cache holds exactly one entry per canonical state, not one per
/// (state, turn) pair.
#[derive(Debug, Default)]
pub struct Solver {
    cache: FxHashMap<CanonicalState, Solved>,
}

impl Solver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct states solved so far.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Solves `state` for the player about to move.
    pub fn solve(&mut self, state: &CanonicalState) -> Solved {
        if let Some(&solved) = self.cache.get(state) {
            return solved;
        }
        let solved = self.search(state);
        self.cache.insert(state.clone(), solved);
        solved
    }

    fn search(&mut self, state: &CanonicalState) -> Solved {
        if state.is_terminal() {
            // the mover faces an empty board and has already lost
            return Solved {
                outcome: Outcome::Loss,
                best: None,
            };
        }
        let mut moves: Vec<Move> = state.moves().collect();
        // fixed candidate order: biggest takes first, ties keep the
        // ascending-row enumeration (stable sort)
        moves.sort_by(|a, b| b.count.cmp(&a.count));
        let mut last = None;
        for &mv in &moves {
            let successor = state.apply(mv);
            if self.solve(&successor).outcome == Outcome::Loss {
                return Solved {
                    outcome: Outcome::Win,
                    best: Some(mv),
                };
            }
            last = Some(mv);
        }
        Solved {
            outcome: Outcome::Loss,
            best: last,
        }
    }
}

/// Plays perfectly by exact search, keeping one memo cache for the
/// agent's whole lifetime.
#[derive(Debug, Default)]
pub struct MinimaxAgent {
    solver: Solver,
}

impl MinimaxAgent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        let canonical = Canonical::of(game);
        let solved = self.solver.solve(canonical.state());
        let mv = solved.best.expect("non-terminal state always has a move");
        Ok(canonical.translate(mv))
    }
}

#[cfg(test)]
mod tests {
    use oxinim_engine::Duel;

    use super::*;

    fn nim_sum(rows: &[u32]) -> u32 {
        rows.iter().fold(0, |acc, &count| acc ^ count)
    }

    fn solve_rows(rows: Vec<u32>) -> Solved {
        Solver::new().solve(&CanonicalState::of(&Nim::from_rows(rows)))
    }

    #[test]
    fn test_outcome_matches_the_nim_sum_theorem() {
        let configs: Vec<Vec<u32>> = vec![
            vec![1],
            vec![2, 2],
            vec![1, 2, 3],
            vec![1, 3, 5],
            vec![1, 3, 5, 7],
            vec![4, 4, 3],
            vec![9, 2, 6],
        ];
        for rows in configs {
            let expected = if nim_sum(&rows) == 0 {
                Outcome::Loss
            } else {
                Outcome::Win
            };
            assert_eq!(solve_rows(rows.clone()).outcome, expected, "rows {rows:?}");
        }
    }

    #[test]
    fn test_terminal_state_is_a_loss_without_a_move() {
        let solved = solve_rows(vec![0, 0]);
        assert_eq!(solved.outcome, Outcome::Loss);
        assert_eq!(solved.best, None);
    }

    #[test]
    fn test_lost_state_still_offers_a_legal_move() {
        let solved = solve_rows(vec![1, 1]);
        assert_eq!(solved.outcome, Outcome::Loss);
        let state = CanonicalState::of(&Nim::from_rows(vec![1, 1]));
        let mv = solved.best.unwrap();
        assert!(state.moves().any(|m| m == mv));
    }

    #[test]
    fn test_permuted_boards_hit_the_same_cache_entry() {
        let mut solver = Solver::new();
        let a = solver.solve(&CanonicalState::of(&Nim::from_rows(vec![1, 3, 5])));
        let solved_states = solver.cache_len();
        let b = solver.solve(&CanonicalState::of(&Nim::from_rows(vec![5, 1, 3])));
        assert_eq!(a, b);
        assert_eq!(solver.cache_len(), solved_states);
    }

    #[test]
    fn test_winning_move_zeroes_the_nim_sum_on_any_row_order() {
        for rows in [vec![1, 3, 5], vec![5, 1, 3], vec![3, 5, 1]] {
            let mut game = Nim::from_rows(rows);
            let mv = MinimaxAgent::new().select_move(&game).unwrap();
            game.apply(mv).unwrap();
            assert_eq!(nim_sum(game.rows()), 0);
        }
    }

    #[test]
    fn test_solver_duel_from_winning_start_goes_to_seat_zero() {
        // rows (1, 3, 5): nim-sum 7, the first mover wins under optimal play
        let mut seat0 = MinimaxAgent::new();
        let mut seat1 = MinimaxAgent::new();
        let winner = Duel::new(Nim::new(3), &mut seat0, &mut seat1)
            .play()
            .unwrap();
        assert_eq!(winner, 0);
    }

    #[test]
    fn test_solver_duel_from_lost_start_goes_to_seat_one() {
        // rows (1, 3, 5, 7): nim-sum 0, the first mover loses under optimal play
        let mut seat0 = MinimaxAgent::new();
        let mut seat1 = MinimaxAgent::new();
        let winner = Duel::new(Nim::new(4), &mut seat0, &mut seat1)
            .play()
            .unwrap();
        assert_eq!(winner, 1);
    }
}
