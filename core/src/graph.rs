//! Supervision graph: an immutable snapshot of who supervises whom.
//!
//! RULES:
//!   - Built once per data refresh, never mutated afterwards.
//!   - Faculty live in an arena; trainee chains hold arena indices.
//!   - Availability is NOT stored here. It is a membership test against
//!     the session's unavailable set, projected onto the arena on demand.
//!   - Backup order is preserved exactly as supplied.

use crate::{
    error::{BuildError, SupervisorRole},
    roster::{FacultyRecord, Roster, TraineeRecord},
    types::{FacultyId, TraineeId},
};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyNode {
    pub id:        FacultyId,
    pub name:      String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraineeNode {
    pub id:                    TraineeId,
    pub name:                  String,
    pub primary_supervisor_id: FacultyId,
    pub backup_supervisor_ids: Vec<FacultyId>,
}

/// A trainee's supervision chain, as faculty arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SupervisionChain {
    pub(crate) primary: usize,
    pub(crate) backups: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SupervisionGraph {
    faculty:       Vec<FacultyNode>,
    faculty_index: HashMap<FacultyId, usize>,
    trainees:      Vec<TraineeNode>,
    trainee_index: HashMap<TraineeId, usize>,
    /// Parallel to `trainees`.
    chains:        Vec<SupervisionChain>,
    /// Faculty arena index -> trainee indices, in trainee input order.
    primary_of:    Vec<Vec<usize>>,
    backup_of:     Vec<Vec<usize>>,
}

impl SupervisionGraph {
    /// Build a graph, failing on the first integrity problem in input order.
    pub fn build(
        faculty:  &[FacultyRecord],
        trainees: &[TraineeRecord],
    ) -> Result<Self, BuildError> {
        let (graph, mut errors) = assemble(faculty, trainees);
        if errors.is_empty() {
            Ok(graph)
        } else {
            Err(errors.swap_remove(0))
        }
    }

    /// Build a graph from whatever is valid. Trainees with dangling
    /// references or duplicate ids are dropped; every problem is returned.
    pub fn build_excluding_invalid(
        faculty:  &[FacultyRecord],
        trainees: &[TraineeRecord],
    ) -> (Self, Vec<BuildError>) {
        let (graph, errors) = assemble(faculty, trainees);
        for error in &errors {
            log::warn!("Excluded from supervision graph: {error}");
        }
        (graph, errors)
    }

    pub fn from_roster(roster: &Roster) -> Result<Self, BuildError> {
        Self::build(&roster.faculty, &roster.trainees)
    }

    pub fn faculty_count(&self) -> usize { self.faculty.len() }
    pub fn trainee_count(&self) -> usize { self.trainees.len() }
    pub fn is_empty(&self) -> bool { self.trainees.is_empty() && self.faculty.is_empty() }

    pub fn faculty(&self, id: &str) -> Option<&FacultyNode> {
        self.faculty_index.get(id).map(|&i| &self.faculty[i])
    }

    pub fn trainee(&self, id: &str) -> Option<&TraineeNode> {
        self.trainee_index.get(id).map(|&i| &self.trainees[i])
    }

    pub fn contains_faculty(&self, id: &str) -> bool {
        self.faculty_index.contains_key(id)
    }

    pub fn contains_trainee(&self, id: &str) -> bool {
        self.trainee_index.contains_key(id)
    }

    /// Faculty in roster order.
    pub fn faculty_nodes(&self) -> &[FacultyNode] {
        &self.faculty
    }

    /// Trainees in roster order.
    pub fn trainee_nodes(&self) -> &[TraineeNode] {
        &self.trainees
    }

    /// Trainees whose primary supervisor is `faculty_id`.
    pub fn primary_trainees(&self, faculty_id: &str) -> Vec<&TraineeNode> {
        self.reverse_lookup(&self.primary_of, faculty_id)
    }

    /// Trainees listing `faculty_id` anywhere in their backup chain.
    pub fn backup_trainees(&self, faculty_id: &str) -> Vec<&TraineeNode> {
        self.reverse_lookup(&self.backup_of, faculty_id)
    }

    fn reverse_lookup<'a>(&'a self, index: &[Vec<usize>], faculty_id: &str) -> Vec<&'a TraineeNode> {
        self.faculty_index
            .get(faculty_id)
            .map(|&f| index[f].iter().map(|&t| &self.trainees[t]).collect())
            .unwrap_or_default()
    }

    pub(crate) fn chain(&self, trainee_index: usize) -> &SupervisionChain {
        &self.chains[trainee_index]
    }

    pub(crate) fn faculty_at(&self, index: usize) -> &FacultyNode {
        &self.faculty[index]
    }

    pub(crate) fn faculty_position(&self, id: &str) -> Option<usize> {
        self.faculty_index.get(id).copied()
    }

    pub(crate) fn trainee_position(&self, id: &str) -> Option<usize> {
        self.trainee_index.get(id).copied()
    }

    /// Trainee indices whose chain mentions the faculty member at `faculty_index`,
    /// ascending and without repeats.
    pub(crate) fn dependents(&self, faculty_index: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self.primary_of[faculty_index]
            .iter()
            .chain(&self.backup_of[faculty_index])
            .copied()
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Project an unavailable-id set onto the faculty arena.
    /// Ids that are not in the graph are ignored.
    pub(crate) fn unavailable_mask(&self, unavailable: &BTreeSet<FacultyId>) -> Vec<bool> {
        let mut mask = vec![false; self.faculty.len()];
        for id in unavailable {
            if let Some(&i) = self.faculty_index.get(id) {
                mask[i] = true;
            }
        }
        mask
    }
}

/// Validate both rosters without keeping the graph.
/// Returns every problem found, in input order.
pub fn validate(faculty: &[FacultyRecord], trainees: &[TraineeRecord]) -> Vec<BuildError> {
    assemble(faculty, trainees).1
}

fn assemble(
    faculty_records: &[FacultyRecord],
    trainee_records: &[TraineeRecord],
) -> (SupervisionGraph, Vec<BuildError>) {
    let mut errors = Vec::new();
    let mut graph = SupervisionGraph::default();

    // ── Faculty arena ─────────────────────────────
    for record in faculty_records {
        if graph.faculty_index.contains_key(&record.id) {
            errors.push(BuildError::DuplicateFaculty { faculty_id: record.id.clone() });
            continue;
        }
        graph.faculty_index.insert(record.id.clone(), graph.faculty.len());
        graph.faculty.push(FacultyNode {
            id:        record.id.clone(),
            name:      record.name.clone(),
            specialty: record.specialty.clone(),
        });
    }
    graph.primary_of = vec![Vec::new(); graph.faculty.len()];
    graph.backup_of = vec![Vec::new(); graph.faculty.len()];

    // ── Trainee chains ────────────────────────────
    let mut seen_trainees: HashSet<&str> = HashSet::new();
    for record in trainee_records {
        if !seen_trainees.insert(record.id.as_str()) {
            errors.push(BuildError::DuplicateTrainee { trainee_id: record.id.clone() });
            continue;
        }

        // Every reference is looked up so all dangling ids get reported.
        let primary = lookup(&graph, record, &record.primary_supervisor_id, SupervisorRole::Primary, &mut errors);
        let backups: Vec<Option<usize>> = record
            .backup_supervisor_ids
            .iter()
            .enumerate()
            .map(|(position, id)| {
                lookup(&graph, record, id, SupervisorRole::Backup { position }, &mut errors)
            })
            .collect();

        let (Some(primary), Some(backups)) = (primary, backups.into_iter().collect::<Option<Vec<_>>>())
        else {
            continue;
        };

        warn_on_repeats(record);

        let trainee_index = graph.trainees.len();
        graph.trainee_index.insert(record.id.clone(), trainee_index);
        graph.primary_of[primary].push(trainee_index);
        let mut listed: Vec<usize> = backups.clone();
        listed.sort_unstable();
        listed.dedup();
        for b in listed {
            graph.backup_of[b].push(trainee_index);
        }
        graph.chains.push(SupervisionChain { primary, backups });
        graph.trainees.push(TraineeNode {
            id:                    record.id.clone(),
            name:                  record.name.clone(),
            primary_supervisor_id: record.primary_supervisor_id.clone(),
            backup_supervisor_ids: record.backup_supervisor_ids.clone(),
        });
    }

    log::debug!(
        "Supervision graph assembled: {} faculty, {} trainees, {} problems",
        graph.faculty.len(),
        graph.trainees.len(),
        errors.len(),
    );
    (graph, errors)
}

fn lookup(
    graph:      &SupervisionGraph,
    record:     &TraineeRecord,
    faculty_id: &FacultyId,
    role:       SupervisorRole,
    errors:     &mut Vec<BuildError>,
) -> Option<usize> {
    let found = graph.faculty_index.get(faculty_id).copied();
    if found.is_none() {
        errors.push(BuildError::DanglingSupervisor {
            trainee_id: record.id.clone(),
            faculty_id: faculty_id.clone(),
            role,
        });
    }
    found
}

/// Repeated ids in one chain are legal and resolved positionally,
/// but they give less redundancy than the list length suggests.
fn warn_on_repeats(record: &TraineeRecord) {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(record.primary_supervisor_id.as_str());
    for id in &record.backup_supervisor_ids {
        if !seen.insert(id.as_str()) {
            log::warn!(
                "Trainee '{}' lists faculty '{}' more than once in its supervision chain",
                record.id, id,
            );
        }
    }
}
