//! Shared utilities: clock, identifiers, logging set-up and metrics

pub mod clock;
pub mod identifier;
pub mod logger;
pub mod metrics;

pub use self::{
    clock::{Clock, ManualClock, SystemClock},
    identifier::generate_certificate_id,
    logger::Logger,
    metrics::{Metrics, MetricsSnapshot},
};
