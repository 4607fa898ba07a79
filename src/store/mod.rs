//! Store behaviour models
//!
//! This module contains the building blocks the day generator composes:
//!
//! - **Rush windows**: lunch, dinner and senior-discount intervals with their
//!   dwell rules and activation percentages
//! - **Dwell distribution**: the store-wide triangular dwell draw
//! - **Traffic resolver**: weekday baselines adjusted for holidays
//! - **Sunny modifier**: weekend weather and its dwell rules
//!
//! All sampling takes the caller's random source so runs are reproducible.

pub mod dwell;
pub mod rush;
pub mod traffic;
pub mod weather;

pub use dwell::*;
pub use rush::*;
pub use traffic::*;
pub use weather::*;

/// Round a non-negative count half to even
pub fn round_count(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round_ties_even().min(u32::MAX as f64) as u32
}
