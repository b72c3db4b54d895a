//! Simulation state: the only mutable part of a session.
//!
//! RULES:
//!   - Created empty (fully nominal network).
//!   - Mutated ONLY through toggle_faculty, toggle_fixed and reset.
//!   - Transitions never call the resolver. Recomputation is the
//!     caller's job, right after each transition.
//!   - No terminal state.

use crate::types::{FacultyId, TraineeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    unavailable_faculty_ids: BTreeSet<FacultyId>,
    fixed_trainee_ids:       BTreeSet<TraineeId>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a faculty member's availability.
    /// Returns true if the faculty member is now unavailable.
    pub fn toggle_faculty(&mut self, faculty_id: &str) -> bool {
        flip(&mut self.unavailable_faculty_ids, faculty_id)
    }

    /// Flip a trainee's fixed mark. Returns true if the trainee is now fixed.
    pub fn toggle_fixed(&mut self, trainee_id: &str) -> bool {
        flip(&mut self.fixed_trainee_ids, trainee_id)
    }

    /// Back to the initial state: everyone available, nobody fixed.
    pub fn reset(&mut self) {
        self.unavailable_faculty_ids.clear();
        self.fixed_trainee_ids.clear();
    }

    pub fn is_unavailable(&self, faculty_id: &str) -> bool {
        self.unavailable_faculty_ids.contains(faculty_id)
    }

    pub fn is_fixed(&self, trainee_id: &str) -> bool {
        self.fixed_trainee_ids.contains(trainee_id)
    }

    pub fn unavailable_faculty_ids(&self) -> &BTreeSet<FacultyId> {
        &self.unavailable_faculty_ids
    }

    pub fn fixed_trainee_ids(&self) -> &BTreeSet<TraineeId> {
        &self.fixed_trainee_ids
    }

    pub fn is_initial(&self) -> bool {
        self.unavailable_faculty_ids.is_empty() && self.fixed_trainee_ids.is_empty()
    }
}

fn flip(set: &mut BTreeSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}
