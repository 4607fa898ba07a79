//! Shopper Traffic Simulator
//!
//! Generates a plausible per-visitor event log for a fictitious retail store
//! over an arbitrary date range.
//!
//! # Overview
//!
//! Each date's expected visitor count comes from a weekday baseline adjusted
//! for nearby holidays. The count is then turned into individual visits by
//! layering lunch and dinner rushes, weekend and sunny-day dwell rules, and a
//! weekly senior-discount window on top of a baseline random draw.
//!
//! ## Key Features
//!
//! - **Validated Configuration**: one constructor checks every invariant up front
//! - **Injectable Holiday Calendar**: US federal rules, fixed date sets, or your own
//! - **Reproducible Runs**: every random draw flows from an explicit seed
//! - **Parallel Generation**: dates run on rayon with identical results
//! - **Export**: CSV or JSON Lines plus a parameter manifest
//!
//! ## Quick Start
//!
//! ```rust
//! use shopper_traffic_simulator::*;
//!
//! let settings = StoreSettings {
//!     start_date: "2021-11-20".to_string(),
//!     end_date: "2021-11-30".to_string(),
//!     seed: Some(2021),
//!     ..Default::default()
//! };
//!
//! let config = settings.build()?;
//! let dataset = DatasetAssembler::new(config).generate();
//! println!("{}", dataset.statistics().compact_summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, settings and the validated configuration
//! - [`calendar`]: Holiday calendars and the holiday oracle
//! - [`store`]: Rush windows, dwell distribution, traffic resolver, weather
//! - [`events`]: Visit records and their export
//! - [`simulation`]: Day generator, dataset assembler, statistics, logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Calendar   │    │    Store    │
//! │             │    │             │    │             │
//! │ Settings    │───►│ Holiday     │───►│ Traffic     │
//! │ StoreConfig │    │ Oracle      │    │ Rush/Sunny  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              │
//!                                              ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Events    │◄───│  Assembler  │◄───│ Day         │
//! │             │    │             │    │ Generator   │
//! │ CSV / JSONL │    │ Sort + IDs  │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod calendar;
pub mod events;
pub mod simulation;
pub mod store;
pub mod types;

// Core types and identifiers
pub use types::{
    // Configuration
    CliArgs,
    ConfigError,
    ConfigValidationError,
    // Enums
    HolidayProximity,
    OutputFormat,
    RunId,
    // Identifiers
    ShopperId,
    StoreConfig,
    StoreSettings,
    ValidationError,
};

// Calendars
pub use calendar::{FixedCalendar, HolidayCalendar, HolidayOracle, UsFederalCalendar};

// Store behaviour
pub use store::{DwellTarget, RushWindow, SeniorDiscountWindow, SunnyModifier, TrafficResolver};

// Records and export
pub use events::{RecordWriter, Visit, VisitRecord};

// Generation
pub use simulation::{
    Dataset, DatasetAssembler, DatasetManifest, Day, DayGenerator, GenerationStatistics,
    LoggingConfig, SimulationError, SimulationResult,
};
