//! # Collaborator Traits
//!
//! The session controller drives the map, the visit list and the position
//! sensor only through these traits. Anything that can draw a marker or a list
//! entry can host a session.

use shared::{Coords, Tier};

use crate::backend::domain::models::VisitRecord;

/// Why the current position could not be determined
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Position unavailable: {0}")]
    Unavailable(String),
    #[error("Permission to read the position was denied")]
    PermissionDenied,
}

/// Source of the user's current position
pub trait GeolocationProvider {
    fn current_position(&self) -> Result<Coords, GeolocationError>;
}

/// How the map should move to a visit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecenterOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

/// Interactive map showing one marker per visit
///
/// Picked locations are reported by the host calling
/// `SessionController::on_location_picked`.
pub trait MapSurface {
    /// Initialise the map centred on `center`
    fn load_map(&mut self, center: Coords, zoom: u8);

    /// Add a marker styled for `tier` with `label` as its popup text
    fn place_marker(&mut self, coords: Coords, tier: Tier, label: &str);

    fn recenter(&mut self, coords: Coords, zoom: u8, options: RecenterOptions);

    /// Remove every marker placed so far
    fn clear_markers(&mut self);
}

/// Visit list and the visit form around it
pub trait VisitView {
    fn render_list_entry(&mut self, visit: &VisitRecord);

    /// Empty every form input
    fn clear_form(&mut self);

    fn show_form(&mut self);

    fn hide_form(&mut self);

    /// Tell the user something went wrong
    fn show_alert(&mut self, message: &str);

    /// Rebuild the whole presentation layer from scratch
    fn reload(&mut self);
}
