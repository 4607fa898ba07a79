//! Visit records and dataset export
//!
//! # Overview
//!
//! - **Visit**: one generated shopper visit, produced by the day generator
//! - **VisitRecord**: the exported row, stamped with a sequential shopper ID
//! - **RecordWriter**: writes records as CSV or JSON Lines
//!
//! # Usage Example
//!
//! ```rust
//! use shopper_traffic_simulator::events::*;
//! use shopper_traffic_simulator::types::OutputFormat;
//!
//! let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Csv);
//! writer.write_all(&[]).unwrap();
//! assert_eq!(writer.written(), 0);
//! ```

pub mod export;
pub mod visit;

// Re-export all public types for convenience
pub use export::*;
pub use visit::*;
