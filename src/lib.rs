//! Booking database connection and helpers for the student -> user rename.

pub mod config;
pub mod constants;
pub mod database;
pub mod error;

pub use config::BookingDbConfig;
pub use database::{
    Database, NamingConvention, ReservationUserFields, SchemaCatalog, column_exists,
    reservation_user_fields, table_exists, users_table_name,
};
pub use error::{ConfigError, Error};
