//! The in-memory assignment "database". Everything lives for the lifetime of the process.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{error::ApiError, model::assignment::Assignment};

/// Insertion-ordered assignments plus the id counter.
///
/// Lookups are linear scans. Ids start at 1 and are never reused, not even after [`AssignmentStore::clear`].
#[derive(Debug)]
pub struct AssignmentStore {
    assignments: Vec<Assignment>,
    next_id: i64,
}

impl Default for AssignmentStore {
    fn default() -> Self {
        Self {
            assignments: Vec::new(),
            next_id: 1,
        }
    }
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new `pending` assignment under the next id
    pub fn create(
        &mut self,
        title: impl Into<String>,
        course: impl Into<String>,
        due_date: Option<String>,
    ) -> &Assignment {
        let assignment = Assignment::new(self.next_id, title, course, due_date);
        self.next_id += 1;
        self.assignments.push(assignment);
        &self.assignments[self.assignments.len() - 1]
    }

    pub fn all(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: i64) -> Option<&mut Assignment> {
        self.assignments.iter_mut().find(|a| a.id == id)
    }

    pub fn find_index_by_id(&self, id: i64) -> Option<usize> {
        self.assignments.iter().position(|a| a.id == id)
    }

    /// Panics if `index` is out of bounds, like [`Vec::remove`]
    pub fn remove_at(&mut self, index: usize) -> Assignment {
        self.assignments.remove(index)
    }

    /// Empties the store and returns how many assignments were removed
    pub fn clear(&mut self) -> usize {
        let count = self.assignments.len();
        self.assignments.clear();
        count
    }
}

/// Router state. Each router owns exactly one store.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: Arc<Mutex<AssignmentStore>>,
}

impl AppState {
    pub fn new(store: AssignmentStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store. The guard must not be held across an await point.
    pub fn store(&self) -> Result<MutexGuard<'_, AssignmentStore>, ApiError> {
        self.store.lock().map_err(|_| ApiError::StorePoisoned)
    }
}
