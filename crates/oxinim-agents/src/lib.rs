//! Nim-playing agents.
//!
//! Implementations of the [`oxinim_engine::Agent`] contract:
//!
//! - [`heuristics`] - fixed decision rules, from the deliberately bad
//!   ([`TakeMost`]) to the provably optimal ([`NimSum`])
//! - [`human`] - moves parsed from a line-oriented input stream
//! - [`minimax`] - exact adversarial search with a symmetry-aware memo
//!   cache, optimal for any position
//! - [`rl`] - tabular Q-learning over canonical states, trained by
//!   self-play against a fixed adversary

pub use self::{heuristics::*, human::*, minimax::*, rl::*};

pub mod heuristics;
pub mod human;
pub mod minimax;
pub mod rl;
