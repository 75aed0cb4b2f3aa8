// Type definitions shared by the simulator, session and certificate pipeline

pub mod record;
pub mod target;

pub use record::*;
pub use target::*;
