use std::fmt::Debug;

use log::trace;
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use oxinim_engine::DuelError;

/// A selection policy was invoked on an empty generation; there is no
/// meaningful "max of nothing" to return.
#[derive(Debug, Clone, Copy, Default, derive_more::Display, derive_more::Error)]
#[display("selection invoked with no candidates")]
pub struct EmptySelectionError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SelectionError {
    #[display("{_0}")]
    Empty(EmptySelectionError),
    #[display("fitness evaluation failed: {_0}")]
    Duel(DuelError),
}

/// Turns one generation of candidates into a single winner.
///
/// Policies own their fitness function and whatever randomness they
/// need; candidates are consumed lazily where the policy allows it.
pub trait Evaluator<G> {
    type Fitness: Clone + Debug;

    /// Consumes the candidates and returns the winning
    /// (fitness, candidate) pair under this policy.
    fn select(
        &mut self,
        candidates: impl Iterator<Item = G>,
    ) -> Result<(Self::Fitness, G), SelectionError>;
}

/// Maximizes a scalar fitness; ties keep the earliest candidate.
#[derive(Debug)]
pub struct ScalarSelection<F> {
    fitness: F,
}

impl<F> ScalarSelection<F> {
    pub fn new(fitness: F) -> Self {
        Self { fitness }
    }
}

impl<G, F> Evaluator<G> for ScalarSelection<F>
where
    F: FnMut(&mut G) -> Result<f64, DuelError>,
{
    type Fitness = f64;

    fn select(
        &mut self,
        candidates: impl Iterator<Item = G>,
    ) -> Result<(f64, G), SelectionError> {
        let mut best: Option<(f64, G)> = None;
        for mut candidate in candidates {
            let fitness = (self.fitness)(&mut candidate)?;
            if best.as_ref().is_none_or(|&(top, _)| fitness > top) {
                best = Some((fitness, candidate));
            }
        }
        best.ok_or_else(|| EmptySelectionError.into())
    }
}

/// Lexicase selection over fitness vectors.
///
/// Each call draws a fresh uniform random permutation of the criterion
/// indices and compares the vectors lexicographically in that order.
/// Re-randomizing per call, not per run, is what gives every criterion
/// a chance to lead: the pressure is multi-objective without ever being
/// aggregated.
#[derive(Debug)]
pub struct LexicaseSelection<F> {
    fitness: F,
    rng: Pcg32,
}

impl<F> LexicaseSelection<F> {
    pub fn new(fitness: F) -> Self {
        Self::with_seed(fitness, rand::rng().random())
    }

    pub fn with_seed(fitness: F, seed: u64) -> Self {
        Self {
            fitness,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl<G, F> Evaluator<G> for LexicaseSelection<F>
where
    F: FnMut(&mut G) -> Result<Vec<f64>, DuelError>,
{
    type Fitness = Vec<f64>;

    fn select(
        &mut self,
        candidates: impl Iterator<Item = G>,
    ) -> Result<(Vec<f64>, G), SelectionError> {
        let mut scored = Vec::new();
        for mut candidate in candidates {
            let fitness = (self.fitness)(&mut candidate)?;
            scored.push((fitness, candidate));
        }
        let criteria = scored.first().ok_or(EmptySelectionError)?.0.len();
        let mut order: Vec<usize> = (0..criteria).collect();
        order.shuffle(&mut self.rng);
        trace!("lexicase criterion order {order:?}");
        let scores: Vec<&[f64]> = scored.iter().map(|(f, _)| f.as_slice()).collect();
        let winner = lexicase_winner(&scores, &order);
        Ok(scored.swap_remove(winner))
    }
}

/// Index of the vector winning a lexicographic comparison over the
/// given criterion order; full ties keep the earliest.
#[must_use]
pub fn lexicase_winner(scores: &[&[f64]], order: &[usize]) -> usize {
    let mut winner = 0;
    for challenger in 1..scores.len() {
        if lexicase_beats(scores[challenger], scores[winner], order) {
            winner = challenger;
        }
    }
    winner
}

fn lexicase_beats(a: &[f64], b: &[f64], order: &[usize]) -> bool {
    for &criterion in order {
        if a[criterion] > b[criterion] {
            return true;
        }
        if a[criterion] < b[criterion] {
            return false;
        }
    }
    false
}

/// Boolean efficiency mask over a batch of fitness vectors, in input
/// order.
///
/// Keeps the reference implementation's dominance rule verbatim: a
/// vector is dropped iff *every* other vector beats it in at least one
/// coordinate. This is stricter than textbook Pareto dominance (which
/// only needs a single dominating point) and it vacuously excludes a
/// lone vector; it is preserved as-is for compatibility with the
/// behavior downstream code was tuned against.
#[must_use]
pub fn pareto_efficiency_mask(scores: &[Vec<f64>]) -> Vec<bool> {
    scores
        .iter()
        .enumerate()
        .map(|(i, a)| {
            !scores
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .all(|(_, b)| a.iter().zip(b).any(|(ai, bi)| bi > ai))
        })
        .collect()
}
