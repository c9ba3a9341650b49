//! # Domain Module
//!
//! Business logic for the visit tracker, independent of how visits are drawn
//! or where they are stored.
//!
//! ## Module Organization
//!
//! - **models**: the `VisitRecord` entity and its `VisitDraft` input
//! - **rating**: rating → tier classification
//! - **visit_store**: ordered in-memory collection of visits
//! - **visit_form**: parsing and validation of raw form input
//! - **session_controller**: event handling that keeps store, view, map and
//!   storage in step
//! - **clock**: time source for new visits
//!
//! ## Business Rules
//!
//! - A visit's tier is fixed when the visit is created
//! - Ratings below 5 are bad, 5 through 7 average, above 7 good
//! - Visits are listed and mapped in the order they were recorded
//! - Submissions need a title and a whole-number rating on the configured scale

pub mod clock;
pub mod models;
pub mod rating;
pub mod session_controller;
pub mod visit_form;
pub mod visit_store;

pub use clock::{Clock, SystemClock};
pub use models::{VisitDraft, VisitRecord};
pub use rating::classify;
pub use session_controller::{SessionConfig, SessionController, SessionError, SessionState};
pub use visit_form::VisitFormService;
pub use visit_store::VisitStore;
