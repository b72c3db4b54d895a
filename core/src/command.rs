use crate::types::{FacultyId, TraineeId};
use serde::{Deserialize, Serialize};

/// All commands the UI may send into a session.
/// Variants are never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SimCommand {
    ToggleFaculty { faculty_id: FacultyId },
    ToggleFixed   { trainee_id: TraineeId },
    Reset,
}

impl SimCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleFaculty { .. } => "toggle_faculty",
            Self::ToggleFixed { .. }   => "toggle_fixed",
            Self::Reset                => "reset",
        }
    }
}
