use crate::types::{FacultyId, TraineeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where in a trainee's supervision chain a reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupervisorRole {
    Primary,
    Backup { position: usize },
}

impl std::fmt::Display for SupervisorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary              => write!(f, "primary supervisor"),
            Self::Backup { position }  => write!(f, "backup supervisor #{}", position + 1),
        }
    }
}

/// Data-integrity problems found while building a supervision graph.
/// These are reported to the caller, who decides whether to drop the
/// trainee or abort the load.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum BuildError {
    #[error("Trainee '{trainee_id}' references missing faculty '{faculty_id}' as {role}")]
    DanglingSupervisor {
        trainee_id: TraineeId,
        faculty_id: FacultyId,
        role:       SupervisorRole,
    },

    #[error("Faculty id '{faculty_id}' appears more than once in the roster")]
    DuplicateFaculty { faculty_id: FacultyId },

    #[error("Trainee id '{trainee_id}' appears more than once in the roster")]
    DuplicateTrainee { trainee_id: TraineeId },
}

impl BuildError {
    /// The trainee this error is about, if any.
    pub fn trainee_id(&self) -> Option<&str> {
        match self {
            Self::DanglingSupervisor { trainee_id, .. } => Some(trainee_id),
            Self::DuplicateTrainee { trainee_id }       => Some(trainee_id),
            Self::DuplicateFaculty { .. }               => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Graph build failed: {0}")]
    Build(#[from] BuildError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Faculty '{faculty_id}' not found in supervision graph")]
    UnknownFaculty { faculty_id: FacultyId },

    #[error("Trainee '{trainee_id}' not found in supervision graph")]
    UnknownTrainee { trainee_id: TraineeId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
