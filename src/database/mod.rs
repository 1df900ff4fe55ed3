/// Schema name resolution
mod schema;

pub use schema::{
    NamingConvention, ReservationUserFields, SchemaCatalog, column_exists,
    reservation_user_fields, table_exists, users_table_name,
};

use sqlx::{Connection, MySqlConnection};
use toml::Table;
use tracing::info;

use crate::{config::BookingDbConfig, error::Error};

/// Handle to the booking database
///
/// Wraps a single connection: every query failure comes back as an `Err`,
/// and rows are read by column name. Operations take `&mut self`, so one
/// handle serves one unit of work at a time.
pub struct Database {
    conn: MySqlConnection,
}

impl Database {
    /// Open the booking database connection
    pub async fn connect(config: &BookingDbConfig) -> Result<Self, Error> {
        let conn = MySqlConnection::connect_with(&config.connect_options())
            .await
            .map_err(|source| Error::Connection { source })?;

        info!("Connected to booking database ({})", config.dsn());
        Ok(Self { conn })
    }

    /// Validate the application configuration, then connect
    ///
    /// Configuration problems are reported before any network I/O.
    pub async fn from_config(config: &Table) -> Result<Self, Error> {
        let config = BookingDbConfig::from_config(config)?;
        Self::connect(&config).await
    }

    /// Get the underlying connection for building queries
    pub fn connection(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }

    /// Check that the server still answers
    pub async fn ping(&mut self) -> Result<(), sqlx::Error> {
        self.conn.ping().await
    }

    /// Close the connection gracefully
    pub async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await?;
        info!("Booking database connection closed");
        Ok(())
    }
}
