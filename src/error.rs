use crate::core::state::Pid;
use thiserror::Error;

/// Configuration problems detected before any simulated tick executes.
///
/// A failed start leaves no partial run-state behind: table construction
/// and policy construction both fail wholesale.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("quantum must be greater than zero")]
    ZeroQuantum,

    #[error("quantum for feedback level {level} must be greater than zero")]
    ZeroLevelQuantum { level: usize },

    #[error("feedback quantum table must not be empty")]
    EmptyQuantumTable,

    #[error("priority direction not configured for priority scheduling")]
    MissingPriorityOrder,

    #[error("duplicate process id {0}")]
    DuplicatePid(Pid),

    #[error("process table capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
}
