//! Shared primitive types used across the entire simulation.

/// Stable identifier of a faculty member, as supplied by the roster provider.
pub type FacultyId = String;

/// Stable identifier of a trainee, as supplied by the roster provider.
pub type TraineeId = String;

/// Monotonic position in a session's event log. One step = one accepted command.
pub type Step = u64;

/// The canonical session identifier.
pub type SessionId = String;
