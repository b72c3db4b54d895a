//! Supervision-cascade simulation engine.
//!
//! Models faculty-to-trainee supervision coverage and computes how it
//! degrades as faculty become unavailable.
//!
//! Data flows one way:
//!   roster -> graph (immutable) -> state transition -> resolver
//!   -> metrics -> snapshot for rendering.

pub mod bottleneck;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod graph;
pub mod metrics;
pub mod resolver;
pub mod rng;
pub mod roster;
pub mod roster_gen;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod types;

pub use error::{BuildError, SimError, SimResult};
pub use graph::SupervisionGraph;
pub use metrics::{aggregate, Metrics};
pub use resolver::{resolve, ResolvedStatus, TraineeStatus};
pub use session::SimSession;
pub use state::SimulationState;
