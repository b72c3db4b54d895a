//! Snapshot: the read-only view the rendering layer consumes.
//!
//! A snapshot is captured from a session after recomputation. It holds
//! everything needed to draw the network without touching the session.

use crate::{
    error::SimResult,
    graph::SupervisionGraph,
    metrics::Metrics,
    resolver::{ResolvedStatus, TraineeStatus},
    state::SimulationState,
    types::{FacultyId, SessionId, Step, TraineeId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineeView {
    pub trainee_id:             TraineeId,
    pub name:                   String,
    pub status:                 TraineeStatus,
    pub covering_supervisor_id: Option<FacultyId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id:              SessionId,
    pub step:                    Step,
    /// Sorted by trainee id.
    pub trainees:                Vec<TraineeView>,
    pub metrics:                 Metrics,
    pub unavailable_faculty_ids: Vec<FacultyId>,
    pub fixed_trainee_ids:       Vec<TraineeId>,
}

impl SessionSnapshot {
    pub fn capture(
        session_id: &str,
        step:       Step,
        graph:      &SupervisionGraph,
        state:      &SimulationState,
        resolved:   &BTreeMap<TraineeId, ResolvedStatus>,
        metrics:    &Metrics,
    ) -> Self {
        let trainees = resolved
            .iter()
            .map(|(trainee_id, status)| TraineeView {
                trainee_id:             trainee_id.clone(),
                name:                   graph.trainee(trainee_id).map(|t| t.name.clone()).unwrap_or_default(),
                status:                 TraineeStatus::display(status, state.is_fixed(trainee_id)),
                covering_supervisor_id: status.covering_supervisor_id().map(str::to_string),
            })
            .collect();

        Self {
            session_id:              session_id.to_string(),
            step,
            trainees,
            metrics:                 metrics.clone(),
            unavailable_faculty_ids: state.unavailable_faculty_ids().iter().cloned().collect(),
            fixed_trainee_ids:       state.fixed_trainee_ids().iter().cloned().collect(),
        }
    }

    pub fn trainee(&self, trainee_id: &str) -> Option<&TraineeView> {
        self.trainees
            .binary_search_by(|t| t.trainee_id.as_str().cmp(trainee_id))
            .ok()
            .map(|i| &self.trainees[i])
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
