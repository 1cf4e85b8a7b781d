use super::Policy;
use crate::core::state::{Pid, ProcTable, Ticks};
use crate::error::ConfigError;
use rustc_hash::FxHashMap;

/// Round Robin with a fixed quantum.
///
/// A process keeps the CPU while its quantum lasts; on expiry selection
/// advances circularly through the eligible set in table order, wrapping
/// past the last-run process. When the last-run process has left the
/// eligible set (it completed), selection restarts from the front.
pub struct RoundRobin {
    quantum: Ticks,
    used: FxHashMap<Pid, Ticks>,
    last: Option<Pid>,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Result<Self, ConfigError> {
        if quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(Self {
            quantum,
            used: FxHashMap::default(),
            last: None,
        })
    }

    fn used(&self, pid: Pid) -> Ticks {
        self.used.get(&pid).copied().unwrap_or(0)
    }
}

impl Policy for RoundRobin {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        let available: Vec<_> = table.eligible(now).collect();
        if available.is_empty() {
            return None;
        }

        if let Some(last) = self.last {
            // Keep the last-run process while it has quantum and work left.
            if let Some(p) = available.iter().find(|p| p.pid == last) {
                if self.used(last) < self.quantum && p.remaining > 0 {
                    return Some(last);
                }
            }

            if available.len() > 1 {
                if let Some(i) = available.iter().position(|p| p.pid == last) {
                    return Some(available[(i + 1) % available.len()].pid);
                }
            }
        }

        Some(available[0].pid)
    }

    fn should_preempt(&mut self, current: Pid, _table: &ProcTable, _now: Ticks) -> bool {
        self.used(current) >= self.quantum
    }

    fn on_tick(&mut self, pid: Pid) {
        *self.used.entry(pid).or_insert(0) += 1;
        self.last = Some(pid);
    }

    fn on_context_switch(&mut self, pid: Pid) {
        // Quantum usage resets when a process is switched in, not out.
        self.used.insert(pid, 0);
        self.last = Some(pid);
    }

    fn reset(&mut self) {
        self.used.clear();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{ProcState, ProcessSpec};

    fn ready_table(specs: &[(Pid, Ticks)]) -> ProcTable {
        let mut table = ProcTable::from_specs(
            specs
                .iter()
                .map(|&(pid, bt)| ProcessSpec::new(pid, 0, bt, 0)),
        )
        .unwrap();
        let pids: Vec<Pid> = table.iter().map(|p| p.pid).collect();
        for pid in pids {
            table.get_mut(pid).unwrap().state = ProcState::Ready;
        }
        table
    }

    #[test]
    fn continues_within_quantum() {
        let table = ready_table(&[(1, 5), (2, 5)]);
        let mut rr = RoundRobin::new(2).unwrap();

        assert_eq!(rr.select_next(&table, 0), Some(1));
        rr.on_context_switch(1);
        rr.on_tick(1);
        assert!(!rr.should_preempt(1, &table, 1));
        assert_eq!(rr.select_next(&table, 1), Some(1));
    }

    #[test]
    fn rotates_on_quantum_expiry() {
        let table = ready_table(&[(1, 5), (2, 5), (3, 5)]);
        let mut rr = RoundRobin::new(2).unwrap();

        rr.on_context_switch(1);
        rr.on_tick(1);
        rr.on_tick(1);
        assert!(rr.should_preempt(1, &table, 2));
        assert_eq!(rr.select_next(&table, 2), Some(2));
    }

    #[test]
    fn wraps_past_the_end() {
        let table = ready_table(&[(1, 5), (2, 5)]);
        let mut rr = RoundRobin::new(1).unwrap();

        rr.on_context_switch(2);
        rr.on_tick(2);
        assert_eq!(rr.select_next(&table, 1), Some(1));
    }

    #[test]
    fn restarts_from_front_after_completion() {
        let mut table = ready_table(&[(1, 5), (2, 5), (3, 5)]);
        let mut rr = RoundRobin::new(2).unwrap();

        rr.on_context_switch(2);
        rr.on_tick(2);
        table.get_mut(2).unwrap().state = ProcState::Completed;
        table.get_mut(2).unwrap().remaining = 0;

        assert_eq!(rr.select_next(&table, 3), Some(1));
    }

    #[test]
    fn switch_in_resets_usage() {
        let table = ready_table(&[(1, 5)]);
        let mut rr = RoundRobin::new(2).unwrap();

        rr.on_context_switch(1);
        rr.on_tick(1);
        rr.on_tick(1);
        assert!(rr.should_preempt(1, &table, 2));
        rr.on_context_switch(1);
        assert!(!rr.should_preempt(1, &table, 2));
    }
}
