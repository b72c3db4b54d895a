//! The simulation session — one user's run over one supervision graph.
//!
//! EXECUTION ORDER per accepted command (fixed, never reordered):
//!   1. Validate the command's id against the graph.
//!   2. Apply the transition to SimulationState.
//!   3. Cascade resolver over the full graph.
//!   4. Metrics aggregator over the new resolution.
//!   5. Emit events and append them to the event log.
//!
//! RULES:
//!   - The graph is shared and immutable; the state is owned here.
//!   - State changes ONLY through apply() (or its three shorthands).
//!   - Everything runs synchronously, to completion, before returning.

use crate::{
    bottleneck::{rank_bottlenecks, FacultyImpact},
    command::SimCommand,
    config::SimConfig,
    error::{SimError, SimResult},
    event::{EventLogEntry, SimEvent},
    graph::SupervisionGraph,
    metrics::{aggregate_with_precision, Metrics},
    resolver::{resolve_with_policy, ResolvedStatus, TraineeStatus},
    roster::Roster,
    snapshot::SessionSnapshot,
    state::SimulationState,
    types::{FacultyId, SessionId, Step, TraineeId},
};
use std::{collections::BTreeMap, sync::Arc};

pub struct SimSession {
    pub session_id: SessionId,
    graph:          Arc<SupervisionGraph>,
    config:         SimConfig,
    state:          SimulationState,
    step:           Step,
    resolved:       BTreeMap<TraineeId, ResolvedStatus>,
    metrics:        Metrics,
    event_log:      Vec<EventLogEntry>,
}

impl SimSession {
    /// Start a session with a fresh random session id.
    pub fn new(graph: Arc<SupervisionGraph>, config: SimConfig) -> SimResult<Self> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), graph, config)
    }

    /// Build the graph from a roster and start a session over it.
    /// The first integrity problem in the roster aborts with `SimError::Build`.
    pub fn from_roster(roster: &Roster, config: SimConfig) -> SimResult<Self> {
        let graph = SupervisionGraph::from_roster(roster)?;
        Self::new(Arc::new(graph), config)
    }

    /// Load `{data_dir}/policy.json` (if present) and the roster files in
    /// `roster_dir`, then start a session. Unreadable files surface as
    /// `SimError::Other`.
    pub fn load(data_dir: &str, roster_dir: &str) -> SimResult<Self> {
        let config = SimConfig::load_or_default(data_dir)?;
        let roster = Roster::load(roster_dir)?;
        Self::from_roster(&roster, config)
    }

    /// Start a session with a caller-chosen id. Used for reproducible logs.
    pub fn with_id(
        session_id: impl Into<SessionId>,
        graph:      Arc<SupervisionGraph>,
        config:     SimConfig,
    ) -> SimResult<Self> {
        let mut session = Self {
            session_id: session_id.into(),
            graph,
            config,
            state:      SimulationState::new(),
            step:       0,
            resolved:   BTreeMap::new(),
            metrics:    Metrics::default(),
            event_log:  Vec::new(),
        };
        session.recompute();

        let started = SimEvent::SessionStarted {
            session_id:    session.session_id.clone(),
            faculty_count: session.graph.faculty_count(),
            trainee_count: session.graph.trainee_count(),
        };
        session.record(&[started])?;
        log::info!(
            "Session {} started: {} faculty, {} trainees, coverage {:.1}%",
            session.session_id,
            session.graph.faculty_count(),
            session.graph.trainee_count(),
            session.metrics.coverage_percentage,
        );
        Ok(session)
    }

    /// Apply one command, recompute, and return the events it produced.
    /// Unknown ids are rejected and leave the session untouched.
    pub fn apply(&mut self, command: SimCommand) -> SimResult<Vec<SimEvent>> {
        match &command {
            SimCommand::ToggleFaculty { faculty_id } if !self.graph.contains_faculty(faculty_id) => {
                return Err(SimError::UnknownFaculty { faculty_id: faculty_id.clone() });
            }
            SimCommand::ToggleFixed { trainee_id } if !self.graph.contains_trainee(trainee_id) => {
                return Err(SimError::UnknownTrainee { trainee_id: trainee_id.clone() });
            }
            _ => {}
        }

        let before = self.views();
        self.step += 1;
        let step = self.step;
        let transition = match command {
            SimCommand::ToggleFaculty { faculty_id } => {
                let unavailable = self.state.toggle_faculty(&faculty_id);
                log::debug!("step {step}: faculty {faculty_id} unavailable={unavailable}");
                SimEvent::FacultyToggled { step, faculty_id, unavailable }
            }
            SimCommand::ToggleFixed { trainee_id } => {
                let fixed = self.state.toggle_fixed(&trainee_id);
                log::debug!("step {step}: trainee {trainee_id} fixed={fixed}");
                SimEvent::TraineeFixToggled { step, trainee_id, fixed }
            }
            SimCommand::Reset => {
                self.state.reset();
                log::debug!("step {step}: reset");
                SimEvent::SimulationReset { step }
            }
        };

        self.recompute();
        let after = self.views();

        // A reroute from one backup to another is a change even when the
        // displayed status stays the same.
        let mut events = vec![transition];
        for (trainee_id, (to, covering)) in after {
            let Some((from, was_covering)) = before.get(&trainee_id) else { continue };
            if *from == to && *was_covering == covering {
                continue;
            }
            let from = *from;
            events.push(SimEvent::TraineeStatusChanged {
                step,
                trainee_id,
                from,
                to,
                covering_supervisor_id: covering,
            });
        }
        events.push(SimEvent::MetricsUpdated { step, metrics: self.metrics.clone() });

        self.record(&events)?;
        log::info!(
            "step {step}: {} trainee changes, coverage {:.1}%, orphaned {}",
            events.len() - 2,
            self.metrics.coverage_percentage,
            self.metrics.orphaned_count,
        );
        Ok(events)
    }

    pub fn toggle_faculty(&mut self, faculty_id: &str) -> SimResult<Vec<SimEvent>> {
        self.apply(SimCommand::ToggleFaculty { faculty_id: faculty_id.to_string() })
    }

    pub fn toggle_fixed(&mut self, trainee_id: &str) -> SimResult<Vec<SimEvent>> {
        self.apply(SimCommand::ToggleFixed { trainee_id: trainee_id.to_string() })
    }

    pub fn reset(&mut self) -> SimResult<Vec<SimEvent>> {
        self.apply(SimCommand::Reset)
    }

    // ── Read access ────────────────────────────────

    pub fn graph(&self) -> &Arc<SupervisionGraph> { &self.graph }
    pub fn config(&self) -> &SimConfig { &self.config }
    pub fn state(&self) -> &SimulationState { &self.state }
    pub fn step(&self) -> Step { self.step }
    pub fn metrics(&self) -> &Metrics { &self.metrics }
    pub fn events(&self) -> &[EventLogEntry] { &self.event_log }

    /// The resolver's verdicts, before the fixed override.
    pub fn statuses(&self) -> &BTreeMap<TraineeId, ResolvedStatus> {
        &self.resolved
    }

    /// What the rendering layer shows for one trainee.
    pub fn display_status(&self, trainee_id: &str) -> Option<TraineeStatus> {
        self.resolved
            .get(trainee_id)
            .map(|s| TraineeStatus::display(s, self.state.is_fixed(trainee_id)))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.session_id,
            self.step,
            &self.graph,
            &self.state,
            &self.resolved,
            &self.metrics,
        )
    }

    pub fn bottlenecks(&self) -> Vec<FacultyImpact> {
        rank_bottlenecks(&self.graph, &self.state, &self.config.policy)
    }

    /// Displayed status and covering supervisor for every trainee.
    fn views(&self) -> BTreeMap<TraineeId, (TraineeStatus, Option<FacultyId>)> {
        self.resolved
            .iter()
            .map(|(id, s)| {
                let status = TraineeStatus::display(s, self.state.is_fixed(id));
                (id.clone(), (status, s.covering_supervisor_id().map(str::to_string)))
            })
            .collect()
    }

    fn recompute(&mut self) {
        self.resolved = resolve_with_policy(
            &self.graph,
            self.state.unavailable_faculty_ids(),
            &self.config.policy,
        );
        self.metrics = aggregate_with_precision(
            &self.resolved,
            self.state.fixed_trainee_ids(),
            self.config.metrics.coverage_precision,
        );
    }

    fn record(&mut self, events: &[SimEvent]) -> SimResult<()> {
        for event in events {
            let entry = EventLogEntry {
                id:         self.event_log.len() as u64,
                session_id: self.session_id.clone(),
                step:       self.step,
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            };
            self.event_log.push(entry);
        }
        Ok(())
    }
}
