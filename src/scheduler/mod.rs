pub mod fcfs;
pub mod mlfq;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use crate::core::state::{Pid, ProcTable, Ticks};
use crate::error::ConfigError;

pub use fcfs::Fcfs;
pub use mlfq::Mlfq;
pub use priority::Priority;
pub use round_robin::RoundRobin;
pub use sjf::{Sjf, Srtf};

/// Quantum used by Round Robin when the caller configures nothing.
pub const DEFAULT_QUANTUM: Ticks = 3;

/// Per-level quanta used by MLFQ when the caller configures nothing.
pub const DEFAULT_MLFQ_QUANTA: [Ticks; 3] = [2, 4, 8];

/// Comparison direction for priority scheduling. This is a policy
/// configuration, not a process attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityOrder {
    /// Larger numeric priority wins.
    HighestFirst,
    /// Smaller numeric priority wins.
    LowestFirst,
}

/// A scheduling policy: the per-tick decision logic the driver consults.
///
/// Implementations own all of their bookkeeping (quantum counters,
/// feedback levels). One instance belongs to one simulation run; `reset`
/// must be called before the instance seeds another run.
pub trait Policy {
    /// Picks the process to run at `now`, or `None` when nothing is
    /// eligible and the driver must idle-advance time. Never fails.
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid>;

    /// Whether the running process must give up the CPU before its next
    /// tick. Non-preemptive policies always answer `false`.
    fn should_preempt(&mut self, current: Pid, table: &ProcTable, now: Ticks) -> bool;

    /// Called exactly once per executed time unit, for the running process.
    fn on_tick(&mut self, _pid: Pid) {}

    /// Called exactly once whenever an execution interval opens for `pid`.
    fn on_context_switch(&mut self, _pid: Pid) {}

    /// Clears all policy-private bookkeeping.
    fn reset(&mut self) {}
}

impl Policy for Box<dyn Policy> {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        (**self).select_next(table, now)
    }

    fn should_preempt(&mut self, current: Pid, table: &ProcTable, now: Ticks) -> bool {
        (**self).should_preempt(current, table, now)
    }

    fn on_tick(&mut self, pid: Pid) {
        (**self).on_tick(pid)
    }

    fn on_context_switch(&mut self, pid: Pid) {
        (**self).on_context_switch(pid)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// The six supported policies (priority counted in both variants).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fcfs,
    Sjf,
    Srtf,
    Priority,
    PriorityNonPreemptive,
    RoundRobin,
    Mlfq,
}

/// Knobs shared across the policy constructors. Each policy validates the
/// fields it cares about and ignores the rest.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub quantum: Ticks,
    pub priority_order: Option<PriorityOrder>,
    pub mlfq_quanta: Vec<Ticks>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            priority_order: Some(PriorityOrder::LowestFirst),
            mlfq_quanta: DEFAULT_MLFQ_QUANTA.to_vec(),
        }
    }
}

impl PolicyKind {
    /// Builds a fresh policy instance, validating `config` up front.
    pub fn build(self, config: &PolicyConfig) -> Result<Box<dyn Policy>, ConfigError> {
        Ok(match self {
            Self::Fcfs => Box::new(Fcfs),
            Self::Sjf => Box::new(Sjf),
            Self::Srtf => Box::new(Srtf),
            Self::Priority => {
                let order = config
                    .priority_order
                    .ok_or(ConfigError::MissingPriorityOrder)?;
                Box::new(Priority::preemptive(order))
            }
            Self::PriorityNonPreemptive => {
                let order = config
                    .priority_order
                    .ok_or(ConfigError::MissingPriorityOrder)?;
                Box::new(Priority::non_preemptive(order))
            }
            Self::RoundRobin => Box::new(RoundRobin::new(config.quantum)?),
            Self::Mlfq => Box::new(Mlfq::new(config.mlfq_quanta.clone())?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantum_is_rejected() {
        let config = PolicyConfig {
            quantum: 0,
            ..PolicyConfig::default()
        };
        assert_eq!(
            PolicyKind::RoundRobin.build(&config).err(),
            Some(ConfigError::ZeroQuantum)
        );
    }

    #[test]
    fn missing_priority_order_is_rejected() {
        let config = PolicyConfig {
            priority_order: None,
            ..PolicyConfig::default()
        };
        for kind in [PolicyKind::Priority, PolicyKind::PriorityNonPreemptive] {
            assert_eq!(
                kind.build(&config).err(),
                Some(ConfigError::MissingPriorityOrder)
            );
        }
    }

    #[test]
    fn bad_mlfq_quanta_are_rejected() {
        let empty = PolicyConfig {
            mlfq_quanta: vec![],
            ..PolicyConfig::default()
        };
        assert_eq!(
            PolicyKind::Mlfq.build(&empty).err(),
            Some(ConfigError::EmptyQuantumTable)
        );

        let zeroed = PolicyConfig {
            mlfq_quanta: vec![2, 0, 8],
            ..PolicyConfig::default()
        };
        assert_eq!(
            PolicyKind::Mlfq.build(&zeroed).err(),
            Some(ConfigError::ZeroLevelQuantum { level: 1 })
        );
    }

    #[test]
    fn defaults_build_every_policy() {
        let config = PolicyConfig::default();
        for kind in [
            PolicyKind::Fcfs,
            PolicyKind::Sjf,
            PolicyKind::Srtf,
            PolicyKind::Priority,
            PolicyKind::PriorityNonPreemptive,
            PolicyKind::RoundRobin,
            PolicyKind::Mlfq,
        ] {
            assert!(kind.build(&config).is_ok());
        }
    }
}
