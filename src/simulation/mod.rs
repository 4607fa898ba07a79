//! Visit generation and dataset assembly
//!
//! This module contains the day generator, the dataset assembler, statistics
//! collection, the parameter manifest, logging and error handling.
//!
//! # Overview
//!
//! - **DayGenerator**: turns one date's visitor count into individual visits
//! - **DatasetAssembler**: runs the day generator over the date range, sorts
//!   and numbers the result
//! - **GenerationStatistics**: counters collected during a run
//! - **DatasetManifest**: the parameters needed to reproduce a dataset
//! - **SimulationError**: error handling for the outer plumbing
//!
//! # Usage Example
//!
//! ```rust
//! use shopper_traffic_simulator::simulation::*;
//! use shopper_traffic_simulator::types::*;
//!
//! let config = StoreSettings {
//!     start_date: "2020-12-20".to_string(),
//!     end_date: "2020-12-27".to_string(),
//!     seed: Some(7),
//!     ..Default::default()
//! }
//! .build()
//! .unwrap();
//!
//! let dataset = DatasetAssembler::new(config).generate();
//! assert_eq!(dataset.statistics().days_generated, 8);
//! assert_eq!(dataset.records()[0].shopper_id, ShopperId(0));
//! ```

pub mod assembler;
pub mod day;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod statistics;

// Re-export all public types for convenience
pub use assembler::*;
pub use day::*;
pub use error::*;
pub use logging::*;
pub use manifest::*;
pub use statistics::*;
