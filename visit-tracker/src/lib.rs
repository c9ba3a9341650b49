//! Visit tracker: record rated visits to places on a map and keep them
//! across sessions.

pub mod backend;

pub use backend::{
    initialize_session, AppConfig, LoadOutcome, SessionConfig, SessionController, SessionError,
    SessionState, VisitRecord, VisitStore,
};
