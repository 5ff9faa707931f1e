//! Credibility scoring for tutoring sessions.
//!
//! Raw session telemetry is turned into a fixed-order feature vector, scored by a
//! pre-trained classifier, and mapped together with the session rating into a pay
//! bonus tier.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
