//! Error types and handling
//!
//! This module contains the error type used by the outer plumbing of the
//! simulator: configuration loading, validation and dataset export. Generation
//! itself cannot fail once a [`StoreConfig`](crate::types::StoreConfig) exists.

use crate::types::{ConfigError, ConfigValidationError};
use thiserror::Error;

/// Errors that can occur around a generation run
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),

    /// Configuration failed validation
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),

    /// Dataset export failed
    #[error("Export error: {0}")]
    ExportError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl SimulationError {
    /// Create an export error
    pub fn export_error(msg: impl Into<String>) -> Self {
        Self::ExportError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ValidationError(_) => "Validation",
            SimulationError::ExportError(_) => "Export",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::CsvError(_) => "CSV",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
