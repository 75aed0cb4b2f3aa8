//! Simulated multi-pass sanitization
//!
//! A run walks passes, then phases, then sub-steps in strict order, pacing each
//! sub-step and publishing every transition through [`crate::telemetry::Telemetry`].

pub mod engine;
pub mod pacing;
pub mod phases;

pub use self::{
    engine::Simulator,
    pacing::{InstantPacer, Pacer, TokioPacer},
    phases::WipePhase,
};
