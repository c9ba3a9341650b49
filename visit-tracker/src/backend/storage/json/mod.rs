//! # JSON Storage
//!
//! File-backed slot storage. Every slot is a single JSON document in the data
//! directory:
//!
//! ```text
//! Visit Tracker/
//! ├── visit_tracker.yaml
//! ├── visits.json           ← current snapshot
//! └── visits.corrupt.json   ← last unreadable snapshot, if any
//! ```

pub mod connection;
pub mod visit_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use visit_repository::VisitRepository;
