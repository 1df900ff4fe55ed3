use tracing::{error, info};

use reserveit_db::{
    Database, config,
    constants::LOG_DIRECTIVE,
    database::{reservation_user_fields, users_table_name},
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from file
    let path = config::config_path();
    let config = match config::load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    let mut db = match Database::from_config(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db.ping().await {
        error!("Booking database did not answer: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = report_schema(&mut db).await {
        error!("Failed to inspect booking schema: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = db.close().await {
        error!("Failed to close booking database connection: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Log which naming convention the booking schema currently follows
async fn report_schema(db: &mut Database) -> Result<(), sqlx::Error> {
    let users_table = users_table_name(db).await?;
    let fields = reservation_user_fields(db).await?;

    info!("Reservation owners table: {}", users_table);
    info!(
        "Reservation owner columns: id={}, name={}, email={} ({:?})",
        fields.id,
        fields.name,
        fields.email,
        fields.convention()
    );
    Ok(())
}
