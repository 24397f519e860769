//! Boss attack catalog + selector.
//!
//! ECS ответственность:
//! - Attack data: ranges, cooldowns, weights, curves
//! - Selection rules: scoring, tie-break, cooldown gating
//!
//! Animator ответственность:
//! - Attack clip playback + root motion
//! - Completion signal (`AttackFinished`) обратно в ECS

pub mod attack;
pub mod catalog;
pub mod selector;

pub use attack::{AttackDescriptor, AttackId, DistanceCurve};
pub use catalog::AttackCatalog;
pub use selector::{facing_factor, score_attack, select_attack, AttackChoice, SelectionContext};
