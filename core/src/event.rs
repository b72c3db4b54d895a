//! Session events: the record of every accepted transition and its effect.
//!
//! RULE: Events are emitted by the session only, after recomputation.
//! The rendering layer may read them; nothing reads them back into the
//! resolver.

use crate::{
    metrics::Metrics,
    resolver::TraineeStatus,
    types::{FacultyId, SessionId, Step, TraineeId},
};
use serde::{Deserialize, Serialize};

/// Every event emitted by a session.
/// Variants are never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Session lifecycle ──────────────────────────
    SessionStarted {
        session_id:    SessionId,
        faculty_count: usize,
        trainee_count: usize,
    },

    // ── State transitions ──────────────────────────
    FacultyToggled {
        step:        Step,
        faculty_id:  FacultyId,
        unavailable: bool,
    },
    TraineeFixToggled {
        step:       Step,
        trainee_id: TraineeId,
        fixed:      bool,
    },
    SimulationReset {
        step: Step,
    },

    // ── Recomputation results ──────────────────────
    TraineeStatusChanged {
        step:                   Step,
        trainee_id:             TraineeId,
        from:                   TraineeStatus,
        to:                     TraineeStatus,
        covering_supervisor_id: Option<FacultyId>,
    },
    MetricsUpdated {
        step:    Step,
        metrics: Metrics,
    },
}

impl SimEvent {
    /// Stable string name of the variant, used for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }       => "session_started",
            Self::FacultyToggled { .. }       => "faculty_toggled",
            Self::TraineeFixToggled { .. }    => "trainee_fix_toggled",
            Self::SimulationReset { .. }      => "simulation_reset",
            Self::TraineeStatusChanged { .. } => "trainee_status_changed",
            Self::MetricsUpdated { .. }       => "metrics_updated",
        }
    }
}

/// One entry in a session's in-memory event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Position in the log, starting at 0.
    pub id:         u64,
    pub session_id: SessionId,
    pub step:       Step,
    pub event_type: String,
    pub payload:    String, // JSON-serialized SimEvent
}
