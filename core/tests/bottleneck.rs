//! Bottleneck analysis tests.
//!
//! Tests cover: ranking order, exclusion of unavailable faculty and
//! fixed trainees, and that ranking leaves the session untouched.

use cascade_core::{
    bottleneck::{impact_of, rank_bottlenecks},
    config::{CascadePolicy, SimConfig},
    roster::{FacultyRecord, TraineeRecord},
    SimSession, SimulationState, SupervisionGraph,
};
use std::sync::Arc;

fn faculty(id: &str) -> FacultyRecord {
    FacultyRecord { id: id.into(), name: format!("Dr. {id}"), specialty: "Cardiology".into() }
}

fn trainee(id: &str, primary: &str, backups: &[&str]) -> TraineeRecord {
    TraineeRecord {
        id:                    id.into(),
        name:                  id.into(),
        primary_supervisor_id: primary.into(),
        backup_supervisor_ids: backups.iter().map(|b| b.to_string()).collect(),
    }
}

/// A carries three trainees with thin cover; B and C back each other up.
fn graph() -> SupervisionGraph {
    SupervisionGraph::build(
        &[faculty("A"), faculty("B"), faculty("C")],
        &[
            trainee("T1", "A", &[]),
            trainee("T2", "A", &[]),
            trainee("T3", "A", &["B"]),
            trainee("T4", "B", &["C", "A"]),
            trainee("T5", "C", &["B"]),
        ],
    )
    .unwrap()
}

#[test]
fn heaviest_single_point_of_failure_ranks_first() {
    let ranking = rank_bottlenecks(&graph(), &SimulationState::new(), &CascadePolicy::default());
    let order: Vec<&str> = ranking.iter().map(|i| i.faculty_id.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);

    let a = &ranking[0];
    assert_eq!(a.primary_load, 3);
    assert_eq!(a.backup_load, 1);
    assert_eq!(a.newly_orphaned, 2); // T1, T2
    assert_eq!(a.degraded, 3);       // T1, T2, T3 (T4's backup A is unused)

    // B out: T4 rerouted to C, T5 unaffected.
    let b = &ranking[1];
    assert_eq!((b.degraded, b.newly_orphaned), (1, 0));

    // C out: T5 goes to its last backup B.
    let c = &ranking[2];
    assert_eq!((c.degraded, c.newly_orphaned), (1, 0));
}

#[test]
fn ties_break_on_faculty_id() {
    let ranking = rank_bottlenecks(&graph(), &SimulationState::new(), &CascadePolicy::default());
    assert_eq!(ranking[1].faculty_id, "B");
    assert_eq!(ranking[2].faculty_id, "C");
}

#[test]
fn unavailable_faculty_are_not_ranked_and_fixed_trainees_are_skipped() {
    let mut state = SimulationState::new();
    state.toggle_faculty("B");
    state.toggle_fixed("T1");

    let ranking = rank_bottlenecks(&graph(), &state, &CascadePolicy::default());
    assert!(ranking.iter().all(|i| i.faculty_id != "B"));

    let a = impact_of(&graph(), &state, "A", &CascadePolicy::default()).unwrap();
    // T2 orphaned, T3 orphaned (its only backup B is out); T1 is fixed.
    assert_eq!(a.newly_orphaned, 2);
    // T4 stays rerouted to C: A still sits after C in its chain.
    assert_eq!(a.degraded, 2);

    assert!(impact_of(&graph(), &state, "B", &CascadePolicy::default()).is_none());
    assert!(impact_of(&graph(), &state, "nobody", &CascadePolicy::default()).is_none());
}

#[test]
fn ranking_does_not_mutate_the_session() {
    let mut session =
        SimSession::with_id("bn", Arc::new(graph()), SimConfig::default_test()).unwrap();
    session.toggle_faculty("C").unwrap();
    let before = session.snapshot();

    let ranking = session.bottlenecks();
    assert_eq!(ranking.len(), 2);
    assert_eq!(session.snapshot(), before);
}
