//! Plain roster records as supplied by the faculty and trainee providers.
//!
//! These are input data only. The simulation never mutates them; the
//! graph builder copies what it needs into its own arena.

use crate::types::{FacultyId, TraineeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRecord {
    pub id:        FacultyId,
    pub name:      String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineeRecord {
    pub id:                    TraineeId,
    pub name:                  String,
    pub primary_supervisor_id: FacultyId,
    /// Priority order: the first entry is tried first.
    #[serde(default)]
    pub backup_supervisor_ids: Vec<FacultyId>,
}

/// Both rosters, as loaded together for a single data refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub faculty:  Vec<FacultyRecord>,
    pub trainees: Vec<TraineeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct FacultyFile {
    faculty: Vec<FacultyRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct TraineeFile {
    trainees: Vec<TraineeRecord>,
}

impl Roster {
    /// Load `faculty.json` and `trainees.json` from a roster directory.
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();

        let faculty_path = dir.join("faculty.json");
        let faculty_content = std::fs::read_to_string(&faculty_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", faculty_path.display()))?;
        let faculty_file: FacultyFile = serde_json::from_str(&faculty_content)
            .map_err(|e| anyhow::anyhow!("Invalid {}: {e}", faculty_path.display()))?;

        let trainee_path = dir.join("trainees.json");
        let trainee_content = std::fs::read_to_string(&trainee_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", trainee_path.display()))?;
        let trainee_file: TraineeFile = serde_json::from_str(&trainee_content)
            .map_err(|e| anyhow::anyhow!("Invalid {}: {e}", trainee_path.display()))?;

        log::debug!(
            "Loaded roster from {}: {} faculty, {} trainees",
            dir.display(),
            faculty_file.faculty.len(),
            trainee_file.trainees.len(),
        );

        Ok(Self {
            faculty:  faculty_file.faculty,
            trainees: trainee_file.trainees,
        })
    }
}
