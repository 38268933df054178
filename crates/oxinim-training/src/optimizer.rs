use log::debug;

use crate::{
    selection::{Evaluator, SelectionError},
    self_adaptive::Tweak,
};

/// (1,λ) evolution strategy without elitism.
///
/// Every generation produces exactly `lambda` independent tweaks of the
/// current point and hands them, lazily, to the evaluator's selection
/// policy. The winner replaces the current point even when its fitness
/// is worse: the drift is deliberate exploration, not a bug, and there
/// is no shadow "best so far" kept on the side.
///
/// Returns the final point together with the per-generation
/// (fitness, survivor) history.
pub fn one_lambda<G, E>(
    initial: G,
    lambda: usize,
    evaluator: &mut E,
    epochs: usize,
) -> Result<(G, Vec<(E::Fitness, G)>), SelectionError>
where
    G: Tweak + Clone,
    E: Evaluator<G>,
{
    let mut one = initial;
    let mut history = Vec::with_capacity(epochs);
    for epoch in 0..epochs {
        let (fitness, survivor) = evaluator.select((0..lambda).map(|_| one.tweak()))?;
        debug!("generation {epoch}: fitness {fitness:?}");
        history.push((fitness, survivor.clone()));
        one = survivor;
    }
    Ok((one, history))
}

#[cfg(test)]
mod tests {
    use oxinim_engine::DuelError;

    use super::*;
    use crate::{selection::ScalarSelection, self_adaptive::SelfAdaptiveParameters};

    fn sphere(p: &mut SelfAdaptiveParameters) -> Result<f64, DuelError> {
        Ok(-p.value().iter().map(|v| v * v).sum::<f64>())
    }

    #[test]
    fn test_history_has_one_entry_per_generation() {
        let initial = SelfAdaptiveParameters::with_seed(vec![1.0, 1.0], vec![0.5, 0.5], 1);
        let mut evaluator = ScalarSelection::new(sphere);
        let (_, history) = one_lambda(initial, 5, &mut evaluator, 12).unwrap();
        assert_eq!(history.len(), 12);
    }

    #[test]
    fn test_zero_offspring_fails_explicitly() {
        let initial = SelfAdaptiveParameters::with_seed(vec![1.0], vec![0.5], 1);
        let mut evaluator = ScalarSelection::new(sphere);
        let result = one_lambda(initial, 0, &mut evaluator, 3);
        assert!(matches!(result, Err(SelectionError::Empty(_))));
    }

    #[test]
    fn test_descends_the_sphere_function() {
        // start far from the optimum; a (1,30) run has to close most of
        // the distance even without elitism
        let initial =
            SelfAdaptiveParameters::with_seed(vec![100.0, 100.0], vec![10.0, 10.0], 42);
        let mut evaluator = ScalarSelection::new(sphere);
        let (_, history) = one_lambda(initial, 30, &mut evaluator, 150).unwrap();
        let first = history.first().unwrap().0;
        let best = history
            .iter()
            .map(|(fitness, _)| *fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(best > first, "best {best} vs first {first}");
        assert!(best > -2_000.0, "run never got near the optimum: {best}");
    }

    #[test]
    fn test_survivor_step_counts_the_generations() {
        let initial = SelfAdaptiveParameters::with_seed(vec![0.0], vec![1.0], 9);
        let mut evaluator = ScalarSelection::new(sphere);
        let (survivor, _) = one_lambda(initial, 4, &mut evaluator, 10).unwrap();
        // every generation's survivor is a fresh tweak of the previous one
        assert_eq!(survivor.step(), 11);
    }
}
