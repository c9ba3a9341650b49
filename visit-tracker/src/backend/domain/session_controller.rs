//! Session orchestration for the visit tracker.
//!
//! The controller owns the visit store and keeps three things in step with it:
//! the list view, the marker layer and the persisted snapshot. Every method
//! handles one discrete event (position acquired, map ready, location picked,
//! form submitted or cancelled, list entry clicked, reset) and runs to
//! completion before the next one.
//!
//! ## States
//!
//! ```text
//! Idle --location picked--> AwaitingSubmission
//! AwaitingSubmission --submit--> Idle         (visit recorded)
//! AwaitingSubmission --cancel--> Idle         (nothing recorded)
//! AwaitingSubmission --location picked--> AwaitingSubmission (new spot)
//! any --reset--> Idle         (map must report ready again)
//! ```

use anyhow::Result;
use log::{debug, error, info, warn};
use shared::{Coords, VisitForm, VisitFormConfig, VisitValidationError};

use crate::backend::domain::clock::{Clock, SystemClock};
use crate::backend::domain::models::VisitRecord;
use crate::backend::domain::visit_form::VisitFormService;
use crate::backend::domain::visit_store::VisitStore;
use crate::backend::io::traits::{GeolocationProvider, MapSurface, RecenterOptions, VisitView};
use crate::backend::storage::traits::{LoadOutcome, VisitStorage};

pub const POSITION_UNAVAILABLE_MESSAGE: &str = "Could not get your position.";
pub const CORRUPT_DATA_MESSAGE: &str =
    "Your saved visits could not be read. A backup was kept and the list starts empty.";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save your visits. They are kept until the app closes.";

/// Where the session is in the record-a-visit flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// No pending visit
    Idle,
    /// A location was picked and the form is open
    AwaitingSubmission { coords: Coords },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("No location has been picked for this visit")]
    NoPendingVisit,
    #[error("Visit form is invalid: {}", join_errors(.0))]
    Validation(Vec<VisitValidationError>),
}

fn join_errors(errors: &[VisitValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Map behaviour and form rules for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub default_zoom: u8,
    pub recenter_duration_secs: f64,
    pub form: VisitFormConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_zoom: 15,
            recenter_duration_secs: 1.0,
            form: VisitFormConfig::default(),
        }
    }
}

pub struct SessionController<M: MapSurface, V: VisitView, P: VisitStorage> {
    map: M,
    view: V,
    storage: P,
    store: VisitStore,
    state: SessionState,
    map_ready: bool,
    form_service: VisitFormService,
    config: SessionConfig,
    clock: Box<dyn Clock>,
}

impl<M: MapSurface, V: VisitView, P: VisitStorage> SessionController<M, V, P> {
    /// Create a session and hydrate it from storage. Nothing is rendered
    /// until the map reports ready.
    pub fn new(map: M, view: V, storage: P, config: SessionConfig) -> Self {
        let form_service = VisitFormService::with_config(config.form.clone());
        let mut controller = Self {
            map,
            view,
            storage,
            store: VisitStore::new(),
            state: SessionState::Idle,
            map_ready: false,
            form_service,
            config,
            clock: Box::new(SystemClock),
        };
        controller.hydrate();
        controller
    }

    /// Replace the time source used for new visits
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn hydrate(&mut self) {
        match self.storage.load() {
            Ok(LoadOutcome::Loaded(visits)) => {
                info!("📍 Hydrated {} saved visits", visits.len());
                self.store.replace_all(visits);
            }
            Ok(LoadOutcome::NotFound) => {
                info!("No saved visits, starting with an empty list");
                self.store.clear();
            }
            Ok(LoadOutcome::CorruptData { reason }) => {
                warn!("Starting with an empty list, saved visits were unreadable: {}", reason);
                self.store.clear();
                self.view.show_alert(CORRUPT_DATA_MESSAGE);
            }
            Err(e) => {
                error!("Failed to load saved visits: {:#}", e);
                self.store.clear();
            }
        }
    }

    /// Ask for the user's position and bring up the map around it
    pub fn acquire_position<G: GeolocationProvider>(&mut self, geolocation: &G) {
        match geolocation.current_position() {
            Ok(position) => {
                info!("Position acquired at {}", position);
                self.map.load_map(position, self.config.default_zoom);
                self.on_map_ready();
            }
            Err(e) => {
                warn!("Could not get position: {}", e);
                self.view.show_alert(POSITION_UNAVAILABLE_MESSAGE);
            }
        }
    }

    /// Render every stored visit once the map can take markers
    pub fn on_map_ready(&mut self) {
        if self.map_ready {
            debug!("Map already marked ready, skipping render");
            return;
        }
        self.map_ready = true;

        for visit in self.store.all() {
            self.view.render_list_entry(visit);
            self.map.place_marker(visit.coords(), visit.tier(), visit.title());
        }
        info!("🗺️ Map ready, rendered {} visits", self.store.len());
    }

    /// Open the form for a new visit at `coords`
    pub fn on_location_picked(&mut self, coords: Coords) {
        if !self.map_ready {
            warn!("Ignoring picked location {} before the map is ready", coords);
            return;
        }
        if !coords.is_finite() {
            warn!("Ignoring picked location with non-finite coordinates {:?}", coords);
            return;
        }

        debug!("Location picked at {}", coords);
        self.state = SessionState::AwaitingSubmission { coords };
        self.view.clear_form();
        self.view.show_form();
    }

    /// Record the pending visit from the submitted form
    pub fn submit(&mut self, form: &VisitForm) -> std::result::Result<VisitRecord, SessionError> {
        let coords = match self.state {
            SessionState::AwaitingSubmission { coords } => coords,
            SessionState::Idle => return Err(SessionError::NoPendingVisit),
        };

        let draft = self.form_service.to_draft(coords, form).map_err(|errors| {
            info!("Rejected visit form: {:?}", errors);
            SessionError::Validation(errors)
        })?;

        let visit = VisitRecord::new_at(draft, self.clock.now());
        info!("🎯 Recording visit {} '{}' ({})", visit.id(), visit.title(), visit.tier());

        self.store.add(visit.clone());
        self.view.render_list_entry(&visit);
        self.map.place_marker(visit.coords(), visit.tier(), visit.title());
        self.close_form();
        self.persist();

        Ok(visit)
    }

    /// Abandon the pending visit
    pub fn cancel(&mut self) {
        if let SessionState::AwaitingSubmission { coords } = self.state {
            debug!("Cancelled pending visit at {}", coords);
            self.close_form();
        }
    }

    /// Move the map to the visit behind a clicked list entry.
    /// Returns false when no visit has that id or the map is not loaded.
    pub fn on_list_entry_clicked(&mut self, visit_id: &str) -> bool {
        if !self.map_ready {
            warn!("Ignoring click on visit {} before the map is ready", visit_id);
            return false;
        }

        let Some(visit) = self.store.find_by_id(visit_id) else {
            debug!("No visit with id {}, ignoring click", visit_id);
            return false;
        };

        let options = RecenterOptions {
            animate: true,
            duration_secs: self.config.recenter_duration_secs,
        };
        self.map.recenter(visit.coords(), self.config.default_zoom, options);
        true
    }

    /// Delete every visit, in storage and in memory, and reload the view.
    /// The map is cleared and must report ready again before new picks.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.reset()?;
        self.store.clear();
        self.state = SessionState::Idle;
        self.map.clear_markers();
        self.map_ready = false;
        self.view.reload();
        info!("Session reset, all visits removed");
        Ok(())
    }

    fn close_form(&mut self) {
        self.state = SessionState::Idle;
        self.view.clear_form();
        self.view.hide_form();
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.store) {
            error!("Failed to save visits: {:#}", e);
            self.view.show_alert(SAVE_FAILED_MESSAGE);
        }
    }

    pub fn visits(&self) -> &[VisitRecord] {
        self.store.all()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
