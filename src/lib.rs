pub mod core;
pub mod error;
pub mod metrics;
pub mod report;
pub mod scheduler;

pub use crate::core::{
    simulate, Pid, ProcTable, ProcessSpec, Sim, SimEvent, SimResult, Ticks, Timeline,
};
pub use error::ConfigError;
pub use metrics::Metrics;
pub use scheduler::{Policy, PolicyConfig, PolicyKind, PriorityOrder};
