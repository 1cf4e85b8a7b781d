use super::Policy;
use crate::core::state::{Pid, ProcTable, Ticks};

/// Picks the eligible process with the least remaining time; ties resolve
/// to the earliest arrival, then table order.
fn shortest_eligible(table: &ProcTable, now: Ticks) -> Option<Pid> {
    let mut best: Option<(Ticks, Ticks, Pid)> = None;
    for p in table.eligible(now) {
        let key = (p.remaining, p.arrival);
        if best.map_or(true, |(rem, arr, _)| key < (rem, arr)) {
            best = Some((p.remaining, p.arrival, p.pid));
        }
    }
    best.map(|(_, _, pid)| pid)
}

/// Shortest-Job-First: once a process starts it runs to completion.
pub struct Sjf;

impl Policy for Sjf {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        shortest_eligible(table, now)
    }

    fn should_preempt(&mut self, _current: Pid, _table: &ProcTable, _now: Ticks) -> bool {
        false
    }
}

/// Shortest-Remaining-Time-First: preempts whenever another eligible
/// process has strictly less remaining time than the running one.
pub struct Srtf;

impl Policy for Srtf {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        shortest_eligible(table, now)
    }

    fn should_preempt(&mut self, current: Pid, table: &ProcTable, now: Ticks) -> bool {
        let Some(running) = table.get(current) else {
            return false;
        };
        table
            .eligible(now)
            .any(|p| p.pid != current && p.remaining < running.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{ProcState, ProcessSpec};

    fn ready_table(specs: &[(Pid, Ticks, Ticks)]) -> ProcTable {
        let mut table = ProcTable::from_specs(
            specs
                .iter()
                .map(|&(pid, at, bt)| ProcessSpec::new(pid, at, bt, 0)),
        )
        .unwrap();
        let pids: Vec<Pid> = table.iter().map(|p| p.pid).collect();
        for pid in pids {
            table.get_mut(pid).unwrap().state = ProcState::Ready;
        }
        table
    }

    #[test]
    fn selects_shortest_remaining() {
        let table = ready_table(&[(1, 0, 10), (2, 0, 5), (3, 0, 8)]);
        assert_eq!(Sjf.select_next(&table, 0), Some(2));
    }

    #[test]
    fn remaining_ties_resolve_to_earliest_arrival() {
        let table = ready_table(&[(1, 4, 6), (2, 1, 6)]);
        assert_eq!(Sjf.select_next(&table, 5), Some(2));
    }

    #[test]
    fn srtf_preempts_on_strictly_shorter_arrival() {
        let mut table = ready_table(&[(1, 0, 10), (2, 2, 3)]);
        table.get_mut(1).unwrap().state = ProcState::Running;
        table.get_mut(1).unwrap().remaining = 8;

        let mut srtf = Srtf;
        assert!(srtf.should_preempt(1, &table, 2));
        // Equal remaining time does not preempt.
        table.get_mut(2).unwrap().remaining = 8;
        assert!(!srtf.should_preempt(1, &table, 2));
    }

    #[test]
    fn sjf_never_preempts() {
        let mut table = ready_table(&[(1, 0, 10), (2, 0, 1)]);
        table.get_mut(1).unwrap().state = ProcState::Running;
        assert!(!Sjf.should_preempt(1, &table, 0));
    }
}
