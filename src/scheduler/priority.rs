use super::{Policy, PriorityOrder};
use crate::core::state::{Pid, ProcTable, Ticks};

/// Priority scheduling in preemptive and non-preemptive flavors.
///
/// The comparison direction comes from [`PriorityOrder`]; ties resolve to
/// the earliest arrival, then table order.
pub struct Priority {
    order: PriorityOrder,
    preemptive: bool,
}

impl Priority {
    pub fn preemptive(order: PriorityOrder) -> Self {
        Self {
            order,
            preemptive: true,
        }
    }

    pub fn non_preemptive(order: PriorityOrder) -> Self {
        Self {
            order,
            preemptive: false,
        }
    }

    fn beats(&self, a: i32, b: i32) -> bool {
        match self.order {
            PriorityOrder::HighestFirst => a > b,
            PriorityOrder::LowestFirst => a < b,
        }
    }

    fn best_eligible(&self, table: &ProcTable, now: Ticks, skip: Option<Pid>) -> Option<Pid> {
        let mut best: Option<(i32, Ticks, Pid)> = None;
        for p in table.eligible(now) {
            if Some(p.pid) == skip {
                continue;
            }
            let better = match best {
                None => true,
                Some((prio, arrival, _)) => {
                    self.beats(p.priority, prio) || (p.priority == prio && p.arrival < arrival)
                }
            };
            if better {
                best = Some((p.priority, p.arrival, p.pid));
            }
        }
        best.map(|(_, _, pid)| pid)
    }
}

impl Policy for Priority {
    fn select_next(&mut self, table: &ProcTable, now: Ticks) -> Option<Pid> {
        self.best_eligible(table, now, None)
    }

    fn should_preempt(&mut self, current: Pid, table: &ProcTable, now: Ticks) -> bool {
        if !self.preemptive {
            return false;
        }
        let Some(running) = table.get(current) else {
            return false;
        };
        let Some(best) = self.best_eligible(table, now, Some(current)) else {
            return false;
        };
        let challenger = table.get(best).map(|p| p.priority);
        challenger.map_or(false, |prio| self.beats(prio, running.priority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{ProcState, ProcessSpec};

    fn ready_table(specs: &[(Pid, Ticks, i32)]) -> ProcTable {
        let mut table = ProcTable::from_specs(
            specs
                .iter()
                .map(|&(pid, at, prio)| ProcessSpec::new(pid, at, 5, prio)),
        )
        .unwrap();
        let pids: Vec<Pid> = table.iter().map(|p| p.pid).collect();
        for pid in pids {
            table.get_mut(pid).unwrap().state = ProcState::Ready;
        }
        table
    }

    #[test]
    fn direction_flag_flips_the_winner() {
        let table = ready_table(&[(1, 0, 2), (2, 0, 8)]);
        let mut high = Priority::preemptive(PriorityOrder::HighestFirst);
        let mut low = Priority::preemptive(PriorityOrder::LowestFirst);
        assert_eq!(high.select_next(&table, 0), Some(2));
        assert_eq!(low.select_next(&table, 0), Some(1));
    }

    #[test]
    fn priority_ties_resolve_to_earliest_arrival() {
        let table = ready_table(&[(1, 4, 3), (2, 2, 3)]);
        let mut low = Priority::preemptive(PriorityOrder::LowestFirst);
        assert_eq!(low.select_next(&table, 5), Some(2));
    }

    #[test]
    fn preemptive_variant_preempts_on_better_priority() {
        let mut table = ready_table(&[(1, 0, 5), (2, 1, 1)]);
        table.get_mut(1).unwrap().state = ProcState::Running;
        let mut low = Priority::preemptive(PriorityOrder::LowestFirst);
        assert!(low.should_preempt(1, &table, 1));
        // Equal priority never preempts.
        let mut table2 = ready_table(&[(1, 0, 5), (2, 1, 5)]);
        table2.get_mut(1).unwrap().state = ProcState::Running;
        assert!(!low.should_preempt(1, &table2, 1));
    }

    #[test]
    fn non_preemptive_variant_never_preempts() {
        let mut table = ready_table(&[(1, 0, 5), (2, 1, 1)]);
        table.get_mut(1).unwrap().state = ProcState::Running;
        let mut low = Priority::non_preemptive(PriorityOrder::LowestFirst);
        assert!(!low.should_preempt(1, &table, 1));
    }
}
