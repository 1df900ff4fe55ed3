use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use crate::{
    constants::{BOOKING_SECTION, CONFIG_PATH_ENV, DEFAULT_CHARSET, DEFAULT_CONFIG_PATH},
    error::ConfigError,
};

/// Connection settings for the booking database (`[db_booking]`)
#[derive(Clone, Deserialize)]
pub struct BookingDbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    #[serde(default)]
    pub charset: Option<String>,
    pub username: String,
    pub password: String,
}

impl BookingDbConfig {
    /// Extract the booking section from an application configuration record
    ///
    /// Fails without touching the network when the section is absent, empty,
    /// or not a table, and when one of its fields cannot be read.
    pub fn from_config(config: &Table) -> Result<Self, ConfigError> {
        let section = match config.get(BOOKING_SECTION) {
            Some(Value::Table(section)) if !section.is_empty() => section,
            _ => return Err(ConfigError::MissingBookingSection),
        };

        Value::Table(section.clone())
            .try_into()
            .map_err(ConfigError::Malformed)
    }

    /// Configured charset, or `utf8mb4`
    pub fn charset(&self) -> &str {
        self.charset.as_deref().unwrap_or(DEFAULT_CHARSET)
    }

    /// Connection locator without credentials, safe to log
    pub fn dsn(&self) -> String {
        format!(
            "mysql:host={};port={};dbname={};charset={}",
            self.host,
            self.port,
            self.dbname,
            self.charset()
        )
    }

    /// Driver options for opening the connection
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .charset(self.charset())
            .username(&self.username)
            .password(&self.password)
    }
}

impl fmt::Debug for BookingDbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingDbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("charset", &self.charset())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration file location: `$RESERVEIT_CONFIG` or `./config.toml`
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Read the application configuration record from a TOML file
pub fn load_config(path: &Path) -> Result<Table, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Table {
        toml::from_str(raw).unwrap()
    }

    const FULL: &str = r#"
        [db_booking]
        host = "db.internal"
        port = 3307
        dbname = "snipeit_reservations"
        charset = "latin1"
        username = "booking"
        password = "hunter2"
    "#;

    #[test]
    fn test_reads_booking_section() {
        let config = BookingDbConfig::from_config(&parse(FULL)).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.dbname, "snipeit_reservations");
        assert_eq!(config.charset(), "latin1");
        assert_eq!(config.username, "booking");
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn test_charset_defaults_to_utf8mb4() {
        let raw = r#"
            [db_booking]
            host = "localhost"
            port = 3306
            dbname = "snipeit_reservations"
            username = "booking"
            password = ""
        "#;
        let config = BookingDbConfig::from_config(&parse(raw)).unwrap();
        assert_eq!(config.charset(), "utf8mb4");
        assert_eq!(
            config.dsn(),
            "mysql:host=localhost;port=3306;dbname=snipeit_reservations;charset=utf8mb4"
        );
    }

    #[test]
    fn test_missing_section() {
        let raw = r#"
            [db_snipeit]
            host = "localhost"
        "#;
        assert!(matches!(
            BookingDbConfig::from_config(&parse(raw)),
            Err(ConfigError::MissingBookingSection)
        ));
    }

    #[test]
    fn test_empty_section() {
        assert!(matches!(
            BookingDbConfig::from_config(&parse("[db_booking]\n")),
            Err(ConfigError::MissingBookingSection)
        ));
    }

    #[test]
    fn test_section_not_a_table() {
        assert!(matches!(
            BookingDbConfig::from_config(&parse("db_booking = \"mysql://localhost\"\n")),
            Err(ConfigError::MissingBookingSection)
        ));
    }

    #[test]
    fn test_malformed_section() {
        let raw = r#"
            [db_booking]
            host = "localhost"
            port = "not a port"
            dbname = "snipeit_reservations"
            username = "booking"
            password = "secret"
        "#;
        assert!(matches!(
            BookingDbConfig::from_config(&parse(raw)),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_field() {
        let raw = r#"
            [db_booking]
            host = "localhost"
            port = 3306
            dbname = "snipeit_reservations"
            username = "booking"
        "#;
        let err = BookingDbConfig::from_config(&parse(raw)).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_dsn_and_debug_hide_password() {
        let config = BookingDbConfig::from_config(&parse(FULL)).unwrap();
        assert_eq!(
            config.dsn(),
            "mysql:host=db.internal;port=3307;dbname=snipeit_reservations;charset=latin1"
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/reserveit/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
