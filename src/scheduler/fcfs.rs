use super::Policy;
use crate::core::state::{Pid, ProcTable, Ticks};

/// First-Come-First-Served: earliest arrival wins, ties fall back to
/// table order. Non-preemptive.
pub struct Fcfs;

impl Policy for Fcfs {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        let mut best: Option<(Ticks, Pid)> = None;
        for p in table.eligible(now) {
            // Strict comparison keeps the earliest-inserted record on ties.
            if best.map_or(true, |(arrival, _)| p.arrival < arrival) {
                best = Some((p.arrival, p.pid));
            }
        }
        best.map(|(_, pid)| pid)
    }

    fn should_preempt(&mut self, _current: Pid, _table: &ProcTable, _now: Ticks) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ProcessSpec;

    #[test]
    fn picks_earliest_arrival() {
        let mut table = ProcTable::from_specs([
            ProcessSpec::new(1, 3, 5, 0),
            ProcessSpec::new(2, 1, 5, 0),
            ProcessSpec::new(3, 2, 5, 0),
        ])
        .unwrap();
        for p in [1, 2, 3] {
            table.get_mut(p).unwrap().state = crate::core::state::ProcState::Ready;
        }

        let mut fcfs = Fcfs;
        assert_eq!(fcfs.select_next(&table, 10), Some(2));
        // Nothing has arrived yet at t=0.
        assert_eq!(fcfs.select_next(&table, 0), None);
    }

    #[test]
    fn arrival_ties_resolve_to_input_order() {
        let mut table = ProcTable::from_specs([
            ProcessSpec::new(9, 0, 5, 0),
            ProcessSpec::new(4, 0, 5, 0),
        ])
        .unwrap();
        for p in [9, 4] {
            table.get_mut(p).unwrap().state = crate::core::state::ProcState::Ready;
        }

        let mut fcfs = Fcfs;
        assert_eq!(fcfs.select_next(&table, 0), Some(9));
    }
}
