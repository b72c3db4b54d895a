//! Synthetic roster generation for the runner and for tests.
//!
//! Same seed + same shape = same roster, byte for byte. Every generated
//! roster builds cleanly: backups are distinct and never include the
//! trainee's own primary supervisor.

use crate::{
    rng::{RosterStage, ScenarioRng},
    roster::{FacultyRecord, Roster, TraineeRecord},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterShape {
    pub faculty_count: usize,
    pub trainee_count: usize,
    /// Backup chain length is drawn from [min_backups, max_backups],
    /// capped by the number of other faculty.
    pub min_backups:   usize,
    pub max_backups:   usize,
}

impl Default for RosterShape {
    fn default() -> Self {
        Self {
            faculty_count: 12,
            trainee_count: 40,
            min_backups:   1,
            max_backups:   3,
        }
    }
}

pub fn generate_roster(seed: u64, shape: &RosterShape) -> Roster {
    let mut faculty_names = ScenarioRng::new(seed, RosterStage::FacultyNames);
    let mut specialties = ScenarioRng::new(seed, RosterStage::Specialties);
    let mut trainee_names = ScenarioRng::new(seed, RosterStage::TraineeNames);
    let mut assignments = ScenarioRng::new(seed, RosterStage::Assignments);

    let faculty: Vec<FacultyRecord> = (0..shape.faculty_count)
        .map(|i| FacultyRecord {
            id:        format!("F{:03}", i + 1),
            name:      format!("Dr. {}", full_name(&mut faculty_names)),
            specialty: specialties.pick(SPECIALTIES).to_string(),
        })
        .collect();

    let trainees = if faculty.is_empty() {
        Vec::new()
    } else {
        let other_faculty = faculty.len() - 1;
        let min_backups = shape.min_backups.min(other_faculty);
        let max_backups = shape.max_backups.max(shape.min_backups).min(other_faculty);
        (0..shape.trainee_count)
            .map(|i| {
                let primary = assignments.next_u64_below(faculty.len() as u64) as usize;
                let mut others: Vec<usize> = (0..faculty.len()).filter(|&f| f != primary).collect();
                let wanted = assignments.range_inclusive(min_backups, max_backups);
                let backups = assignments.sample_distinct(&mut others, wanted);

                TraineeRecord {
                    id:                    format!("T{:04}", i + 1),
                    name:                  full_name(&mut trainee_names),
                    primary_supervisor_id: faculty[primary].id.clone(),
                    backup_supervisor_ids: backups.iter().map(|&b| faculty[b].id.clone()).collect(),
                }
            })
            .collect()
    };

    log::debug!(
        "Generated roster (seed {seed}): {} faculty, {} trainees",
        faculty.len(),
        trainees.len(),
    );
    Roster { faculty, trainees }
}

fn full_name(rng: &mut ScenarioRng) -> String {
    format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES))
}

const SPECIALTIES: &[&str] = &[
    "Internal Medicine", "Pediatrics", "General Surgery", "Emergency Medicine",
    "Anesthesiology", "Radiology", "Psychiatry", "Obstetrics & Gynecology",
    "Cardiology", "Neurology", "Family Medicine", "Pathology",
];

const FIRST_NAMES: &[&str] = &[
    "Aisha", "Ben", "Carmen", "Deepak", "Elena", "Farid", "Grace", "Hiro",
    "Ines", "Jamal", "Keiko", "Luis", "Maya", "Nikolai", "Olu", "Priya",
    "Quinn", "Rosa", "Samir", "Tara", "Uma", "Victor", "Wen", "Yusuf", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Banerjee", "Castillo", "Dubois", "Eriksen", "Fujita", "Garcia",
    "Haddad", "Ivanova", "Johnson", "Kowalski", "Lindqvist", "Mensah", "Nakamura",
    "Okafor", "Patel", "Quintero", "Rossi", "Schmidt", "Tanaka", "Usman",
    "Varga", "Williams", "Xu", "Yilmaz", "Zhang",
];
