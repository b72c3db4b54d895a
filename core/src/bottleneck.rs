//! Bottleneck analysis: what would one more absence do?
//!
//! For every faculty member still available, take them out on top of the
//! current unavailable set and count the trainees that get worse. Only
//! trainees whose chain mentions that person can change, so each
//! assessment reads the reverse index and nothing else.
//!
//! Pure reader: the session state is never modified.

use crate::{
    config::CascadePolicy,
    graph::SupervisionGraph,
    resolver::{resolve_chain, Severity},
    state::SimulationState,
    types::FacultyId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyImpact {
    pub faculty_id:     FacultyId,
    pub name:           String,
    /// Trainees with this faculty member as primary.
    pub primary_load:   usize,
    /// Trainees listing this faculty member as a backup.
    pub backup_load:    usize,
    /// Unfixed trainees whose severity would increase.
    pub degraded:       usize,
    /// Unfixed trainees that would lose all coverage.
    pub newly_orphaned: usize,
}

/// Rank every available faculty member by the damage their absence
/// would cause: most newly orphaned first, then most degraded, then id.
pub fn rank_bottlenecks(
    graph:  &SupervisionGraph,
    state:  &SimulationState,
    policy: &CascadePolicy,
) -> Vec<FacultyImpact> {
    let mut down = graph.unavailable_mask(state.unavailable_faculty_ids());
    let available: Vec<usize> = (0..graph.faculty_count()).filter(|&f| !down[f]).collect();
    let mut impacts: Vec<FacultyImpact> = available
        .into_iter()
        .map(|f| assess(graph, state, policy, &mut down, f))
        .collect();

    impacts.sort_by(|a, b| {
        b.newly_orphaned
            .cmp(&a.newly_orphaned)
            .then(b.degraded.cmp(&a.degraded))
            .then_with(|| a.faculty_id.cmp(&b.faculty_id))
    });
    impacts
}

/// Impact of a single faculty member. None if the id is unknown or the
/// faculty member is already unavailable.
pub fn impact_of(
    graph:      &SupervisionGraph,
    state:      &SimulationState,
    faculty_id: &str,
    policy:     &CascadePolicy,
) -> Option<FacultyImpact> {
    let f = graph.faculty_position(faculty_id)?;
    let mut down = graph.unavailable_mask(state.unavailable_faculty_ids());
    if down[f] {
        return None;
    }
    Some(assess(graph, state, policy, &mut down, f))
}

/// `down[f]` must be false on entry and is false again on return.
fn assess(
    graph:  &SupervisionGraph,
    state:  &SimulationState,
    policy: &CascadePolicy,
    down:   &mut [bool],
    f:      usize,
) -> FacultyImpact {
    let faculty = graph.faculty_at(f);
    let dependents: Vec<usize> = graph
        .dependents(f)
        .into_iter()
        .filter(|&t| !state.is_fixed(&graph.trainee_nodes()[t].id))
        .collect();

    let grade = |mask: &[bool]| -> Vec<Severity> {
        dependents
            .iter()
            .map(|&t| resolve_chain(graph, graph.chain(t), mask, policy).severity())
            .collect()
    };

    let before = grade(&down[..]);
    down[f] = true;
    let after = grade(&down[..]);
    down[f] = false;

    let mut degraded = 0;
    let mut newly_orphaned = 0;
    for (b, a) in before.iter().zip(&after) {
        if a > b {
            degraded += 1;
            if *a == Severity::Orphaned {
                newly_orphaned += 1;
            }
        }
    }

    FacultyImpact {
        faculty_id:   faculty.id.clone(),
        name:         faculty.name.clone(),
        primary_load: graph.primary_trainees(&faculty.id).len(),
        backup_load:  graph.backup_trainees(&faculty.id).len(),
        degraded,
        newly_orphaned,
    }
}
