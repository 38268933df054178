use rand::Rng;

use oxinim_engine::{Agent, AgentError, Move, Nim};

use crate::self_adaptive::{SelfAdaptiveParameters, Tweak};

const RULES_PER_ROW: usize = 10;
const PARAM_INIT_MAX: f64 = 10.0;

/// One parametric firing rule bound to a single row: a linear
/// activation over the row's count, and a preferred take size.
///
/// The three parameter components are (weight, bias, objects).
#[derive(Debug, Clone)]
pub struct AdaptiveRule {
    params: SelfAdaptiveParameters,
    row: usize,
}

impl AdaptiveRule {
    #[must_use]
    pub fn new(params: SelfAdaptiveParameters, row: usize) -> Self {
        Self { params, row }
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    fn weight(&self) -> f64 {
        self.params.value()[0]
    }

    fn bias(&self) -> f64 {
        self.params.value()[1]
    }

    fn objects(&self) -> f64 {
        self.params.value()[2]
    }

    /// Non-negative firing strength on the current board; zero once the
    /// rule's row has been emptied.
    #[must_use]
    pub fn activation(&self, game: &Nim) -> f64 {
        let count = f64::from(game.rows()[self.row]);
        if count == 0.0 {
            return 0.0;
        }
        (self.weight() * count + self.bias()).max(0.0)
    }

    /// The move this rule plays: its preferred take, clamped to what
    /// the row still holds.
    #[must_use]
    pub fn action(&self, game: &Nim) -> Move {
        let available = game.rows()[self.row];
        let count = self.objects().round().clamp(1.0, f64::from(available)) as u32;
        Move::new(self.row, count)
    }
}

impl Tweak for AdaptiveRule {
    fn tweak(&mut self) -> Self {
        Self {
            params: self.params.tweak(),
            row: self.row,
        }
    }
}

/// Parametric Nim player evolved by the (1,λ) optimizer: a bank of
/// adaptive rules, several per row, where the highest-activation rule
/// on a non-empty row decides the move.
#[derive(Debug, Clone)]
pub struct AdaptivePlayer {
    rules: Vec<AdaptiveRule>,
}

impl AdaptivePlayer {
    /// Random initial rule bank for a board of `num_rows` rows, with
    /// parameters and step sizes uniform in `[0, 10)`. Each rule's
    /// generator is seeded from `rng`, so the whole bank replays from
    /// one seed.
    #[must_use]
    pub fn random<R>(num_rows: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut rules = Vec::with_capacity(num_rows * RULES_PER_ROW);
        for row in 0..num_rows {
            for _ in 0..RULES_PER_ROW {
                let value = (0..3).map(|_| rng.random_range(0.0..PARAM_INIT_MAX)).collect();
                let sigma = (0..3).map(|_| rng.random_range(0.0..PARAM_INIT_MAX)).collect();
                let params = SelfAdaptiveParameters::with_seed(value, sigma, rng.random());
                rules.push(AdaptiveRule::new(params, row));
            }
        }
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[AdaptiveRule] {
        &self.rules
    }
}

impl Tweak for AdaptivePlayer {
    fn tweak(&mut self) -> Self {
        Self {
            rules: self.rules.iter_mut().map(Tweak::tweak).collect(),
        }
    }
}

impl Agent for AdaptivePlayer {
    fn name(&self) -> &str {
        "adaptive"
    }

    fn select_move(&mut self, game: &Nim) -> Result<Move, AgentError> {
        // the argmax only ranges over rules whose row still holds
        // objects, so the chosen action is always legal
        let rule = self
            .rules
            .iter()
            .filter(|rule| game.rows()[rule.row()] > 0)
            .map(|rule| (rule.activation(game), rule))
            .fold(None::<(f64, &AdaptiveRule)>, |best, (activation, rule)| {
                match best {
                    Some((top, _)) if top >= activation => best,
                    _ => Some((activation, rule)),
                }
            })
            .expect("non-terminal game has a non-empty row")
            .1;
        Ok(rule.action(game))
    }
}
