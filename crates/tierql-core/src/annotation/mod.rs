//! Annotation primitives: intervals, tiers, and per-speaker tier
//! groups.

mod interval;
mod tier;
mod tier_group;

#[cfg(test)]
mod tests;

pub use interval::{Interval, PAUSE_SYMBOL};
pub use tier::IntervalTier;
pub use tier_group::TierGroup;
