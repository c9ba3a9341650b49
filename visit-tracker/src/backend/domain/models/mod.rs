pub mod visit;

pub use visit::{VisitDraft, VisitRecord};
