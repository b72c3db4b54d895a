//! Cascade resolver: walks each trainee's primary-then-backup chain
//! against the current unavailable set.
//!
//! RULES:
//!   - Pure reader. Never touches SimulationState.
//!   - Trainees are resolved independently; faculty have unlimited
//!     covering capacity in this model.
//!   - No randomness, no clock. Same graph + same set = same map.

use crate::{
    config::CascadePolicy,
    graph::{SupervisionChain, SupervisionGraph},
    types::{FacultyId, TraineeId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Coverage severity, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Nominal,
    Rerouted,
    AtRisk,
    Orphaned,
}

/// The resolver's verdict for one trainee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolvedStatus {
    /// Primary supervisor available.
    Nominal {
        covering_supervisor_id: FacultyId,
    },
    /// Primary out; a backup covers with more backups still unused behind it.
    Rerouted {
        covering_supervisor_id: FacultyId,
        backup_index:           usize,
    },
    /// Primary out; a backup covers with no (or too little) redundancy left.
    AtRisk {
        covering_supervisor_id: FacultyId,
        backup_index:           usize,
    },
    /// Nobody in the chain is available.
    Orphaned,
}

impl ResolvedStatus {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Nominal { .. }  => Severity::Nominal,
            Self::Rerouted { .. } => Severity::Rerouted,
            Self::AtRisk { .. }   => Severity::AtRisk,
            Self::Orphaned        => Severity::Orphaned,
        }
    }

    pub fn covering_supervisor_id(&self) -> Option<&str> {
        match self {
            Self::Nominal { covering_supervisor_id }
            | Self::Rerouted { covering_supervisor_id, .. }
            | Self::AtRisk { covering_supervisor_id, .. } => Some(covering_supervisor_id.as_str()),
            Self::Orphaned => None,
        }
    }

    /// Position in the backup list of the covering supervisor, if a backup covers.
    pub fn backup_index(&self) -> Option<usize> {
        match self {
            Self::Rerouted { backup_index, .. } | Self::AtRisk { backup_index, .. } => {
                Some(*backup_index)
            }
            _ => None,
        }
    }

    pub fn is_orphaned(&self) -> bool {
        matches!(self, Self::Orphaned)
    }
}

/// What the rendering layer shows for a trainee: the resolver's
/// verdict, unless the trainee was manually marked fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraineeStatus {
    Nominal,
    Rerouted,
    AtRisk,
    Orphaned,
    Fixed,
}

impl TraineeStatus {
    pub fn display(resolved: &ResolvedStatus, fixed: bool) -> Self {
        if fixed {
            return Self::Fixed;
        }
        match resolved.severity() {
            Severity::Nominal  => Self::Nominal,
            Severity::Rerouted => Self::Rerouted,
            Severity::AtRisk   => Self::AtRisk,
            Severity::Orphaned => Self::Orphaned,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nominal  => "nominal",
            Self::Rerouted => "rerouted",
            Self::AtRisk   => "at_risk",
            Self::Orphaned => "orphaned",
            Self::Fixed    => "fixed",
        }
    }
}

impl std::fmt::Display for TraineeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve every trainee with the default policy
/// (only the last backup counts as at-risk coverage).
pub fn resolve(
    graph:       &SupervisionGraph,
    unavailable: &BTreeSet<FacultyId>,
) -> BTreeMap<TraineeId, ResolvedStatus> {
    resolve_with_policy(graph, unavailable, &CascadePolicy::default())
}

pub fn resolve_with_policy(
    graph:       &SupervisionGraph,
    unavailable: &BTreeSet<FacultyId>,
    policy:      &CascadePolicy,
) -> BTreeMap<TraineeId, ResolvedStatus> {
    let down = graph.unavailable_mask(unavailable);
    graph
        .trainee_nodes()
        .iter()
        .enumerate()
        .map(|(i, trainee)| {
            (trainee.id.clone(), resolve_chain(graph, graph.chain(i), &down, policy))
        })
        .collect()
}

/// Resolve a single trainee. None if the trainee is not in the graph.
pub fn resolve_trainee(
    graph:       &SupervisionGraph,
    trainee_id:  &str,
    unavailable: &BTreeSet<FacultyId>,
    policy:      &CascadePolicy,
) -> Option<ResolvedStatus> {
    let index = graph.trainee_position(trainee_id)?;
    let down = graph.unavailable_mask(unavailable);
    Some(resolve_chain(graph, graph.chain(index), &down, policy))
}

/// `down` is indexed by faculty arena position.
pub(crate) fn resolve_chain(
    graph:  &SupervisionGraph,
    chain:  &SupervisionChain,
    down:   &[bool],
    policy: &CascadePolicy,
) -> ResolvedStatus {
    if !down[chain.primary] {
        return ResolvedStatus::Nominal {
            covering_supervisor_id: graph.faculty_at(chain.primary).id.clone(),
        };
    }

    let Some(backup_index) = chain.backups.iter().position(|&f| !down[f]) else {
        return ResolvedStatus::Orphaned;
    };

    let covering_supervisor_id = graph.faculty_at(chain.backups[backup_index]).id.clone();
    let remaining = chain.backups.len() - backup_index - 1;
    if remaining <= policy.at_risk_remaining_backups {
        ResolvedStatus::AtRisk { covering_supervisor_id, backup_index }
    } else {
        ResolvedStatus::Rerouted { covering_supervisor_id, backup_index }
    }
}
