//! # IO Module
//!
//! Boundary between the session and the outside world: the traits the session
//! controller calls out through, and console implementations of them used by
//! the headless binary.

pub mod console;
pub mod traits;

pub use console::{ConsoleMap, ConsoleView, FixedPosition};
pub use traits::{GeolocationError, GeolocationProvider, MapSurface, RecenterOptions, VisitView};
