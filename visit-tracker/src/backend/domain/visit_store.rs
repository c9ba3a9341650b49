//! In-memory ordered collection of visits.
//!
//! Insertion order is the order visits are listed and the order their markers
//! are placed. There is no delete: the store only grows, is replaced wholesale
//! during hydration, or is emptied by a reset.

use crate::backend::domain::models::VisitRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitStore {
    visits: Vec<VisitRecord>,
}

impl VisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visit. Duplicate ids are not checked.
    pub fn add(&mut self, visit: VisitRecord) {
        self.visits.push(visit);
    }

    /// First visit with the given id, in insertion order
    pub fn find_by_id(&self, id: &str) -> Option<&VisitRecord> {
        self.visits.iter().find(|visit| visit.id() == id)
    }

    pub fn all(&self) -> &[VisitRecord] {
        &self.visits
    }

    /// Discard current contents and take `visits` in the order given
    pub fn replace_all(&mut self, visits: Vec<VisitRecord>) {
        self.visits = visits;
    }

    pub fn clear(&mut self) {
        self.visits.clear();
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
