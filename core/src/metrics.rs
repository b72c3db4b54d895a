//! Metrics aggregator: summary numbers over one resolution.
//!
//! Fixed trainees are counted as `fixed` whatever the resolver said,
//! are excluded from every broken count, and count as covered.
//! With zero trainees the network is vacuously fully covered (100%).

use crate::{
    config::{MetricsConfig, MAX_COVERAGE_PRECISION},
    resolver::{ResolvedStatus, TraineeStatus},
    types::TraineeId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_trainees:      usize,
    pub nominal_count:       usize,
    pub rerouted_count:      usize,
    pub at_risk_count:       usize,
    pub orphaned_count:      usize,
    pub fixed_count:         usize,
    /// Non-orphaned trainees as a percentage of all trainees, in [0, 100].
    pub coverage_percentage: f64,
}

impl Metrics {
    /// Trainees needing attention: rerouted, at-risk or orphaned, not fixed.
    pub fn broken_count(&self) -> usize {
        self.rerouted_count + self.at_risk_count + self.orphaned_count
    }
}

pub fn aggregate(
    resolved: &BTreeMap<TraineeId, ResolvedStatus>,
    fixed:    &BTreeSet<TraineeId>,
) -> Metrics {
    aggregate_with_precision(resolved, fixed, MetricsConfig::default().coverage_precision)
}

pub fn aggregate_with_precision(
    resolved:  &BTreeMap<TraineeId, ResolvedStatus>,
    fixed:     &BTreeSet<TraineeId>,
    precision: u32,
) -> Metrics {
    let mut metrics = Metrics {
        total_trainees: resolved.len(),
        ..Metrics::default()
    };

    for (trainee_id, status) in resolved {
        match TraineeStatus::display(status, fixed.contains(trainee_id)) {
            TraineeStatus::Nominal  => metrics.nominal_count += 1,
            TraineeStatus::Rerouted => metrics.rerouted_count += 1,
            TraineeStatus::AtRisk   => metrics.at_risk_count += 1,
            TraineeStatus::Orphaned => metrics.orphaned_count += 1,
            TraineeStatus::Fixed    => metrics.fixed_count += 1,
        }
    }

    metrics.coverage_percentage = if metrics.total_trainees == 0 {
        100.0
    } else {
        let covered = metrics.total_trainees - metrics.orphaned_count;
        round_to(covered as f64 / metrics.total_trainees as f64 * 100.0, precision)
    };
    metrics
}

fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_COVERAGE_PRECISION) as i32);
    ((value * scale).round() / scale).clamp(0.0, 100.0)
}
