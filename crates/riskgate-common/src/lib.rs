//! RiskGate Common - Shared types for the risk decision workspace
//!
//! This crate provides:
//! - Domain value objects (`RiskScore`, `UserId`)
//! - The workspace error type
//!
//! Value objects are immutable, comparable by value and self-validating.
//! Everything that crosses a crate boundary in RiskGate is expressed in
//! these terms.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod value_objects;

pub use error::*;
pub use value_objects::*;
