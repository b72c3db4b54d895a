//! Cascade resolver tests.
//!
//! Tests cover: the four canonical chain walks, covering supervisor and
//! backup index bookkeeping, the at-risk policy threshold, degenerate
//! graphs, and ids in the unavailable set that the graph never heard of.

use cascade_core::{
    config::CascadePolicy,
    resolver::{resolve_trainee, resolve_with_policy, Severity},
    roster::{FacultyRecord, TraineeRecord},
    resolve, ResolvedStatus, SupervisionGraph,
};
use std::collections::BTreeSet;

fn faculty(id: &str) -> FacultyRecord {
    FacultyRecord {
        id:        id.into(),
        name:      format!("Dr. {id}"),
        specialty: "Internal Medicine".into(),
    }
}

fn trainee(id: &str, primary: &str, backups: &[&str]) -> TraineeRecord {
    TraineeRecord {
        id:                    id.into(),
        name:                  format!("Trainee {id}"),
        primary_supervisor_id: primary.into(),
        backup_supervisor_ids: backups.iter().map(|b| b.to_string()).collect(),
    }
}

/// Faculty {A, B, C}; T1 primary A, backups [B, C].
fn abc_graph() -> SupervisionGraph {
    SupervisionGraph::build(
        &[faculty("A"), faculty("B"), faculty("C")],
        &[trainee("T1", "A", &["B", "C"])],
    )
    .expect("valid graph")
}

fn down(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn nobody_unavailable_is_nominal() {
    let resolved = resolve(&abc_graph(), &down(&[]));
    assert_eq!(
        resolved["T1"],
        ResolvedStatus::Nominal { covering_supervisor_id: "A".into() }
    );
}

#[test]
fn primary_out_reroutes_to_first_backup() {
    let resolved = resolve(&abc_graph(), &down(&["A"]));
    assert_eq!(
        resolved["T1"],
        ResolvedStatus::Rerouted { covering_supervisor_id: "B".into(), backup_index: 0 }
    );
}

#[test]
fn last_backup_covering_is_at_risk() {
    let resolved = resolve(&abc_graph(), &down(&["A", "B"]));
    assert_eq!(
        resolved["T1"],
        ResolvedStatus::AtRisk { covering_supervisor_id: "C".into(), backup_index: 1 }
    );
}

#[test]
fn whole_chain_out_is_orphaned() {
    let resolved = resolve(&abc_graph(), &down(&["A", "B", "C"]));
    assert_eq!(resolved["T1"], ResolvedStatus::Orphaned);
    assert_eq!(resolved["T1"].covering_supervisor_id(), None);
}

#[test]
fn backup_out_while_primary_present_changes_nothing() {
    let resolved = resolve(&abc_graph(), &down(&["B", "C"]));
    assert_eq!(resolved["T1"].severity(), Severity::Nominal);
}

#[test]
fn skipped_backup_still_counts_toward_position() {
    // B is out but A is also out: C covers at index 1, which is last.
    let graph = SupervisionGraph::build(
        &[faculty("A"), faculty("B"), faculty("C"), faculty("D")],
        &[trainee("T1", "A", &["B", "C", "D"])],
    )
    .unwrap();

    let resolved = resolve(&graph, &down(&["A", "B"]));
    assert_eq!(
        resolved["T1"],
        ResolvedStatus::Rerouted { covering_supervisor_id: "C".into(), backup_index: 1 }
    );

    let resolved = resolve(&graph, &down(&["A", "B", "C"]));
    assert_eq!(
        resolved["T1"],
        ResolvedStatus::AtRisk { covering_supervisor_id: "D".into(), backup_index: 2 }
    );
}

#[test]
fn no_backups_goes_straight_from_nominal_to_orphaned() {
    let graph = SupervisionGraph::build(&[faculty("A")], &[trainee("T1", "A", &[])]).unwrap();

    assert_eq!(resolve(&graph, &down(&[]))["T1"].severity(), Severity::Nominal);
    assert_eq!(resolve(&graph, &down(&["A"]))["T1"], ResolvedStatus::Orphaned);
}

#[test]
fn single_backup_covering_is_at_risk() {
    let graph = SupervisionGraph::build(
        &[faculty("A"), faculty("B")],
        &[trainee("T1", "A", &["B"])],
    )
    .unwrap();

    let resolved = resolve(&graph, &down(&["A"]));
    assert_eq!(resolved["T1"].severity(), Severity::AtRisk);
    assert_eq!(resolved["T1"].backup_index(), Some(0));
}

#[test]
fn raised_threshold_flags_at_risk_earlier() {
    let graph = abc_graph();
    let cautious = CascadePolicy { at_risk_remaining_backups: 1 };

    // B covers with one backup (C) left behind it.
    let resolved = resolve_with_policy(&graph, &down(&["A"]), &cautious);
    assert_eq!(
        resolved["T1"],
        ResolvedStatus::AtRisk { covering_supervisor_id: "B".into(), backup_index: 0 }
    );

    let default = resolve_with_policy(&graph, &down(&["A"]), &CascadePolicy::default());
    assert_eq!(default["T1"].severity(), Severity::Rerouted);
}

#[test]
fn trainees_resolve_independently() {
    let graph = SupervisionGraph::build(
        &[faculty("A"), faculty("B"), faculty("C")],
        &[
            trainee("T1", "A", &["B", "C"]),
            trainee("T2", "B", &["C"]),
            trainee("T3", "C", &["A"]),
        ],
    )
    .unwrap();

    let resolved = resolve(&graph, &down(&["A", "B"]));
    assert_eq!(resolved["T1"].severity(), Severity::AtRisk);
    assert_eq!(resolved["T2"].severity(), Severity::AtRisk);
    assert_eq!(resolved["T3"].severity(), Severity::Nominal);
    // C covers both T1 and T2: capacity is not modeled.
    assert_eq!(resolved["T1"].covering_supervisor_id(), Some("C"));
    assert_eq!(resolved["T2"].covering_supervisor_id(), Some("C"));
}

#[test]
fn empty_graph_resolves_to_empty_map() {
    let graph = SupervisionGraph::build(&[], &[]).unwrap();
    assert!(resolve(&graph, &down(&["A"])).is_empty());
}

#[test]
fn unknown_ids_in_unavailable_set_are_ignored() {
    let resolved = resolve(&abc_graph(), &down(&["Z", "nobody"]));
    assert_eq!(resolved["T1"].severity(), Severity::Nominal);
}

#[test]
fn single_trainee_lookup_matches_full_resolution() {
    let graph = abc_graph();
    let policy = CascadePolicy::default();
    let set = down(&["A", "B"]);

    let one = resolve_trainee(&graph, "T1", &set, &policy);
    assert_eq!(one.as_ref(), resolve(&graph, &set).get("T1"));
    assert_eq!(resolve_trainee(&graph, "T9", &set, &policy), None);
}

#[test]
fn severity_order_is_nominal_to_orphaned() {
    assert!(Severity::Nominal < Severity::Rerouted);
    assert!(Severity::Rerouted < Severity::AtRisk);
    assert!(Severity::AtRisk < Severity::Orphaned);
}
