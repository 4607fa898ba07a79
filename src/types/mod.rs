//! Core types and identifiers for the shopper traffic simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulator.
//!
//! # Overview
//!
//! - **Identifiers**: sequential shopper IDs and UUID-based run IDs
//! - **Enums**: holiday proximity, visit buckets and output formats
//! - **Configuration**: raw settings with CLI and file support, validated into
//!   an immutable [`StoreConfig`]
//!
//! # Usage Example
//!
//! ```rust
//! use shopper_traffic_simulator::types::*;
//!
//! let settings = StoreSettings {
//!     start_date: "2021-06-01".to_string(),
//!     end_date: "2021-06-30".to_string(),
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let config = settings.build().expect("valid settings");
//! assert_eq!(config.day_count(), 30);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod store_config;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use store_config::*;
