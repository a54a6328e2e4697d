//! RiskGate Engine - deterministic risk scoring for logins and sessions
//!
//! Maps a bag of independently-observed signals ([`RiskInput`]) to a verdict
//! ([`RiskOutput`]): a 0-100 score, a coarse [`RiskLevel`] and the
//! [`EnforcementAction`] to take.
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────┐    ┌──────────────────┐    ┌───────┐    ┌───────┐    ┌────────┐
//! │ RiskInput  │───►│ Rule table (20)  │───►│ Clamp │───►│ Level │───►│ Action │
//! │ (signals)  │    │ base 10 + points │    │ 0-100 │    │       │    │        │
//! └────────────┘    └──────────────────┘    └───────┘    └───────┘    └────────┘
//! ```
//!
//! The engine is a pure function. It holds no state, performs no I/O and
//! never logs, so it can be called from any thread without coordination.
//!
//! ```
//! use riskgate_engine::{score, EnforcementAction, RiskInput, RiskLevel};
//!
//! let verdict = score(&RiskInput {
//!     is_new_device: true,
//!     ..Default::default()
//! });
//! assert_eq!(verdict.score.value(), 35);
//! assert_eq!(verdict.level, RiskLevel::Medium);
//! assert_eq!(verdict.action, EnforcementAction::Allowed);
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod input;
pub mod rules;
pub mod verdict;

pub use engine::{score, RiskEngine, BASE_SCORE};
pub use input::{RiskInput, Signal};
pub use rules::{rules, Rule, RULES};
pub use verdict::{BreakdownEntry, EnforcementAction, RiskLevel, RiskOutput};

pub use riskgate_common::RiskScore;
