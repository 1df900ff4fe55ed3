/// Configuration section holding the booking database settings
pub const BOOKING_SECTION: &str = "db_booking";

/// Charset used when the configuration does not name one
pub const DEFAULT_CHARSET: &str = "utf8mb4";

/// Environment variable pointing at the configuration file
pub const CONFIG_PATH_ENV: &str = "RESERVEIT_CONFIG";

/// Configuration file used when `RESERVEIT_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Table holding reservations
pub const RESERVATIONS_TABLE: &str = "reservations";

/// Reservation owner table under the current naming
pub const USERS_TABLE: &str = "users";

/// Reservation owner table under the legacy naming
pub const STUDENTS_TABLE: &str = "students";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "reserveit_db=info";
