//! Screening workflows for traceable income verification.

pub mod income;
