//! Error types for configuration and connection setup.
//!
//! Metadata queries issued by the schema helpers return `sqlx::Error`
//! untouched; only the two setup failures get their own variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be turned into connection settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The booking section is absent, empty, or not a table
    #[error("Booking database configuration (db_booking) is missing")]
    MissingBookingSection,

    /// The booking section exists but a field is missing or has the wrong type
    #[error("Booking database configuration (db_booking) is malformed: {0}")]
    Malformed(#[source] toml::de::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path:?} (invalid TOML): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure while opening the booking database handle
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The driver could not establish the connection
    #[error("Could not connect to booking database: {source}")]
    Connection {
        #[source]
        source: sqlx::Error,
    },
}
