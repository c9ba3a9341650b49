//! # Backend Module
//!
//! Contains all non-UI logic for the visit tracker.
//!
//! ## Architecture
//!
//! ```text
//! Front end (map, list, form)
//!     ↓ events                ↑ render calls
//! IO Layer (collaborator traits)
//!     ↓
//! Domain Layer (session controller, store, rules)
//!     ↓
//! Storage Layer (visit repository, slot storage)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::Path;

pub use config::AppConfig;
pub use domain::{
    classify, Clock, SessionConfig, SessionController, SessionError, SessionState, SystemClock,
    VisitDraft, VisitFormService, VisitRecord, VisitStore,
};
pub use io::{
    ConsoleMap, ConsoleView, FixedPosition, GeolocationError, GeolocationProvider, MapSurface,
    RecenterOptions, VisitView,
};
pub use storage::{JsonConnection, LoadOutcome, MemoryConnection, SlotStorage, VisitRepository, VisitStorage};

/// Session persisted to JSON files in a data directory
pub type FileSession<M, V> = SessionController<M, V, VisitRepository<JsonConnection>>;

/// Build a hydrated session over the data directory at `data_directory`
pub fn initialize_session<M: MapSurface, V: VisitView>(
    data_directory: &Path,
    config: &AppConfig,
    map: M,
    view: V,
) -> Result<FileSession<M, V>> {
    info!("Setting up storage in {}", data_directory.display());
    let connection = JsonConnection::new(data_directory)?;
    let repository = VisitRepository::with_key(connection, config.storage_key.clone());

    info!("Setting up session");
    Ok(SessionController::new(map, view, repository, config.session_config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Coords, VisitForm};
    use tempfile::TempDir;

    #[test]
    fn test_visits_survive_a_new_session() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = AppConfig::default();

        let recorded = {
            let mut session = initialize_session(
                temp_dir.path(),
                &config,
                ConsoleMap::new(Vec::new()),
                ConsoleView::new(Vec::new()),
            )
            .unwrap();
            session.acquire_position(&FixedPosition(Some(Coords::new(51.5, -0.1))));
            session.on_location_picked(Coords::new(51.51, -0.12));
            session
                .submit(&VisitForm {
                    title: "Park".to_string(),
                    rating: "9".to_string(),
                    ..VisitForm::default()
                })
                .unwrap()
        };

        let mut session = initialize_session(
            temp_dir.path(),
            &config,
            ConsoleMap::new(Vec::new()),
            ConsoleView::new(Vec::new()),
        )
        .unwrap();
        assert_eq!(session.visits(), &[recorded.clone()]);

        session.acquire_position(&FixedPosition(Some(Coords::new(51.5, -0.1))));
        assert_eq!(session.map().marker_count(), 1);
        assert!(session.on_list_entry_clicked(recorded.id()));
    }

    #[test]
    fn test_custom_storage_key_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = AppConfig {
            storage_key: "holiday".to_string(),
            ..AppConfig::default()
        };
        let mut session = initialize_session(
            temp_dir.path(),
            &config,
            ConsoleMap::new(Vec::new()),
            ConsoleView::new(Vec::new()),
        )
        .unwrap();
        session.on_map_ready();
        session.on_location_picked(Coords::new(1.0, 1.0));
        session
            .submit(&VisitForm {
                title: "Beach".to_string(),
                rating: "7".to_string(),
                ..VisitForm::default()
            })
            .unwrap();

        assert!(temp_dir.path().join("holiday.json").exists());
    }
}
