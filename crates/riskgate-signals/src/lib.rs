//! RiskGate Signals - the normalization layer in front of the engine
//!
//! The engine trusts its input. This crate is where raw, caller-captured
//! telemetry is validated and turned into the boolean/numeric signals the
//! engine consumes.
//!
//! ```text
//! LoginTelemetry ─┐
//!                 ├──► SignalNormalizer ──► RiskInput ──► riskgate_engine::score
//! UserBaseline  ──┘
//!
//! Scenario (what-if knobs) ─────────────► RiskInput
//! ```

pub mod baseline;
pub mod config;
pub mod error;
pub mod geo;
pub mod normalize;
pub mod scenario;
pub mod telemetry;

pub use baseline::UserBaseline;
pub use config::NormalizerConfig;
pub use error::SignalError;
pub use geo::{haversine_km, GeoPoint};
pub use normalize::SignalNormalizer;
pub use scenario::Scenario;
pub use telemetry::{
    ClickTelemetry, FormTelemetry, LoginTelemetry, MouseTelemetry, NavigationTelemetry,
    TypingTelemetry,
};
