//! Evolutionary training for parametric Nim players.
//!
//! This crate implements a self-adaptive (1,λ) evolution strategy and
//! the multi-criteria selection machinery used to compare candidate
//! players.
//!
//! # How training works
//!
//! 1. **Genome** - a candidate carries real-valued parameters with
//!    per-component mutation step sizes ([`self_adaptive`])
//! 2. **Variation** - each generation produces λ independent tweaks of
//!    the current point; step sizes evolve log-normally alongside the
//!    values ([`optimizer`])
//! 3. **Fitness** - candidates play duels against fixed adversaries and
//!    are scored by win fraction, scalar or one score per adversary
//!    ([`fitness`])
//! 4. **Selection** - a policy reduces the generation to one survivor:
//!    scalar maximum, lexicase over a re-randomized criterion order, or
//!    a Pareto efficiency mask over fitness vectors ([`selection`])
//! 5. **Repeat** - the survivor replaces the current point whether or
//!    not it improved; (1,λ) keeps no elite
//!
//! # Architecture
//!
//! ```text
//! one_lambda (optimizer)
//!     ↓ tweaks
//! SelfAdaptiveParameters / AdaptivePlayer (genomes)
//!     ↓ scored by
//! nim_fitness (duels against adversaries)
//!     ↓ reduced by
//! ScalarSelection / LexicaseSelection (survivor per generation)
//! ```
//!
//! Determinism is seed-scoped: every stochastic component owns its own
//! seeded generator, and a tweak derives its child generator from the
//! parent's stream, so replaying a seed reproduces a whole run.

pub use self::{evolved::*, fitness::*, optimizer::*, selection::*, self_adaptive::*};

pub mod evolved;
pub mod fitness;
pub mod optimizer;
pub mod selection;
pub mod self_adaptive;
