use super::Policy;
use crate::core::state::{Pid, ProcTable, Ticks};
use crate::error::ConfigError;
use rustc_hash::FxHashMap;

/// Multi-Level Feedback Queue.
///
/// Processes enter at level 0 on first eligibility and are only ever
/// demoted (no aging). Each level carries its own quantum; selection scans
/// levels from 0 upward and runs the lowest occupied level FCFS. A running
/// process is preempted when its level quantum is exhausted or when an
/// eligible process sits at a strictly lower level.
///
/// Demotion is applied when the process is next switched in: the switch-in
/// hook inspects the usage left over from its previous interval and demotes
/// before resetting the counter.
pub struct Mlfq {
    quanta: Vec<Ticks>,
    level: FxHashMap<Pid, usize>,
    used: FxHashMap<Pid, Ticks>,
}

impl Mlfq {
    pub fn new(quanta: Vec<Ticks>) -> Result<Self, ConfigError> {
        if quanta.is_empty() {
            return Err(ConfigError::EmptyQuantumTable);
        }
        if let Some(level) = quanta.iter().position(|&q| q == 0) {
            return Err(ConfigError::ZeroLevelQuantum { level });
        }
        Ok(Self {
            quanta,
            level: FxHashMap::default(),
            used: FxHashMap::default(),
        })
    }

    pub fn num_levels(&self) -> usize {
        self.quanta.len()
    }

    /// Current feedback level of `pid`; unseen processes sit at level 0.
    pub fn level_of(&self, pid: Pid) -> usize {
        self.level.get(&pid).copied().unwrap_or(0)
    }

    fn quantum_at(&self, level: usize) -> Ticks {
        self.quanta[level.min(self.quanta.len() - 1)]
    }

    fn used(&self, pid: Pid) -> Ticks {
        self.used.get(&pid).copied().unwrap_or(0)
    }
}

impl Policy for Mlfq {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        // New eligibility pins a process to the top level.
        for p in table.eligible(now) {
            self.level.entry(p.pid).or_insert(0);
        }

        for level in 0..self.num_levels() {
            let mut best: Option<(Ticks, Pid)> = None;
            for p in table.eligible(now) {
                if self.level_of(p.pid) != level {
                    continue;
                }
                if best.map_or(true, |(arrival, _)| p.arrival < arrival) {
                    best = Some((p.arrival, p.pid));
                }
            }
            if let Some((_, pid)) = best {
                return Some(pid);
            }
        }
        None
    }

    fn should_preempt(&mut self, current: Pid, table: &ProcTable, now: Ticks) -> bool {
        let current_level = self.level_of(current);
        if self.used(current) >= self.quantum_at(current_level) {
            return true;
        }

        table
            .eligible(now)
            .any(|p| p.pid != current && self.level_of(p.pid) < current_level)
    }

    fn on_tick(&mut self, pid: Pid) {
        *self.used.entry(pid).or_insert(0) += 1;
        self.level.entry(pid).or_insert(0);
    }

    fn on_context_switch(&mut self, pid: Pid) {
        let level = self.level_of(pid);
        if self.used(pid) >= self.quantum_at(level) && level + 1 < self.num_levels() {
            self.level.insert(pid, level + 1);
        }
        self.used.insert(pid, 0);
    }

    fn reset(&mut self) {
        self.level.clear();
        self.used.clear();
    }
}
