use anyhow::Result;
use log::{error, info};

use visit_tracker::backend::{
    initialize_session, AppConfig, ConsoleMap, ConsoleView, FixedPosition, JsonConnection,
};

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting Visit Tracker");

    let data_directory = JsonConnection::default_data_directory()?;
    let config = AppConfig::load_or_default(&AppConfig::path_in(&data_directory)).map_err(|e| {
        error!("Failed to load config: {:#}", e);
        e
    })?;

    let mut session = initialize_session(
        &data_directory,
        &config,
        ConsoleMap::stdout(),
        ConsoleView::stdout(),
    )?;
    info!("{} saved visits in {}", session.visits().len(), data_directory.display());

    session.acquire_position(&FixedPosition(config.home_position));
    Ok(())
}
