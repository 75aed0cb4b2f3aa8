//! Fixed overwrite and verification phases of a pass

use std::fmt;

use rand::{Rng, RngCore};

/// Upper bound (exclusive) of the random sector offset
const SECTOR_SPACE: u32 = 0xFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WipePhase {
    ZeroFill,
    InverseFill,
    RandomPulse,
    Verification,
}

impl WipePhase {
    /// Execution order within every pass
    pub const ALL: [WipePhase; 4] = [
        WipePhase::ZeroFill,
        WipePhase::InverseFill,
        WipePhase::RandomPulse,
        WipePhase::Verification,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WipePhase::ZeroFill => "Binary Zero Fill",
            WipePhase::InverseFill => "Inverse Byte Fill",
            WipePhase::RandomPulse => "PRNG Random Pulse",
            WipePhase::Verification => "Bit-Level Verification",
        }
    }

    pub fn sector_prefix(self) -> &'static str {
        match self {
            WipePhase::ZeroFill => "0x00",
            WipePhase::InverseFill => "0xFF",
            WipePhase::RandomPulse => "0xRND",
            WipePhase::Verification => "0xVER",
        }
    }

    /// Synthetic sector address: the phase prefix plus six upper-case hex digits
    pub fn sector_label<R: RngCore + ?Sized>(self, rng: &mut R) -> String {
        let offset = rng.gen_range(0..SECTOR_SPACE);
        format!("{}{:06X}", self.sector_prefix(), offset)
    }
}

impl fmt::Display for WipePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
