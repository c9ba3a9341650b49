//! # Storage Module
//!
//! Handles all data persistence for the visit tracker.
//!
//! Persistence is split in two layers:
//!
//! - **Slot storage** (`SlotStorage`): named text slots in some durable place.
//!   `JsonConnection` keeps one file per slot, `MemoryConnection` keeps them in
//!   memory.
//! - **Repositories** (`VisitStorage`): decide what goes into a slot.
//!   `VisitRepository` writes the visit snapshot and reads it back.
//!
//! The session controller only sees `VisitStorage`, so the backend can be
//! swapped without touching the domain.

pub mod json;
pub mod memory;
pub mod traits;

pub use json::{JsonConnection, VisitRepository};
pub use memory::MemoryConnection;
pub use traits::{LoadOutcome, SlotStorage, VisitStorage};
