use oxinim_engine::{Agent, Duel, DuelError, Nim};

/// Fraction of `n_games` duels won by `agent` against `adversary` on
/// fresh `Nim::new(rows)` boards.
///
/// The agent's seat alternates by game parity, mirroring the RL
/// trainer's alternation, so neither side banks the first-move
/// advantage. Duel failures propagate; there is no retry.
pub fn nim_fitness(
    agent: &mut dyn Agent,
    adversary: &mut dyn Agent,
    rows: usize,
    n_games: usize,
) -> Result<f64, DuelError> {
    let mut wins = 0_u32;
    for game_id in 0..n_games {
        let game = Nim::new(rows);
        let won = if game_id % 2 == 1 {
            Duel::new(game, &mut *adversary, &mut *agent).play()? == 1
        } else {
            Duel::new(game, &mut *agent, &mut *adversary).play()? == 0
        };
        wins += u32::from(won);
    }
    Ok(f64::from(wins) / n_games as f64)
}

/// One win fraction per (adversary, game count) pair, in input order.
///
/// The fixed order is what lexicase selection permutes; callers must
/// keep it stable across a run.
pub fn lexicase_nim_fitness(
    agent: &mut dyn Agent,
    adversaries: &mut [(&mut dyn Agent, usize)],
    rows: usize,
) -> Result<Vec<f64>, DuelError> {
    adversaries
        .iter_mut()
        .map(|(adversary, n_games)| nim_fitness(&mut *agent, &mut **adversary, rows, *n_games))
        .collect()
}
