//! TRACIENT core library.
//!
//! Pattern-based income anomaly screening: every worker is compared against
//! their own income history rather than fixed income thresholds, so naturally
//! variable earners (gig work, seasonal labor) are not penalized for being
//! variable. The crate exposes the screening engine, a service facade with
//! pluggable storage and classifier seams, and an axum router for the HTTP
//! surface hosted by `services/api`.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
