//! Certificate identifier generation

use chrono::{DateTime, FixedOffset};
use rand::{Rng, RngCore};

/// Builds `<prefix>-YYYYMMDD-NNNN` from the UTC date and a random four digit suffix
pub fn generate_certificate_id<R: RngCore + ?Sized>(
    prefix: &str,
    now: &DateTime<FixedOffset>,
    rng: &mut R,
) -> String {
    let suffix: u32 = rng.gen_range(1000..=9999);
    format!("{}-{}-{}", prefix, now.naive_utc().format("%Y%m%d"), suffix)
}
