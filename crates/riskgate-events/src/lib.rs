//! RiskGate Events - records derived from engine verdicts
//!
//! The engine answers one question per attempt. Everything that outlives a
//! single call lives here:
//! - [`SecurityEvent`]: one scored attempt, with the event-level action
//! - [`Session`]: spawned by login events, status mirroring the verdict
//! - [`ActivityLedger`]: explicit, shareable state holding recent events,
//!   sessions and dashboard counters
//!
//! ```text
//! EventDraft + RiskInput ──► ActivityLedger::ingest ──► engine ──► SecurityEvent
//!                                                              └─► Session (logins)
//! ```

pub mod error;
pub mod event;
pub mod ledger;
pub mod session;

pub use error::LedgerError;
pub use event::{EventAction, EventDraft, EventSource, EventType, SecurityEvent, UserRef, UserRole};
pub use ledger::{
    ActivityLedger, DashboardStats, EventFilter, DEFAULT_EVENT_CAPACITY, DEFAULT_SESSION_CAPACITY,
};
pub use session::{Session, SessionStatus};
