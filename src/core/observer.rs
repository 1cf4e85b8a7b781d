use super::state::{ProcState, ProcTable, Ticks, Timeline};

/// Structural invariant checks run after every step; the assertions
/// compile away in release builds.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, table: &ProcTable, timeline: &Timeline, now: Ticks) {
        self.step += 1;

        let mut running = 0usize;
        for p in table.iter() {
            debug_assert_eq!(
                p.remaining == 0,
                p.state == ProcState::Completed,
                "P{} remaining/state mismatch",
                p.pid
            );
            match p.state {
                ProcState::Running => {
                    running += 1;
                    debug_assert!(p.arrival <= now, "P{} ran before arriving", p.pid);
                }
                ProcState::Ready => {
                    debug_assert!(p.arrival <= now, "P{} ready before arriving", p.pid);
                }
                ProcState::Completed => {
                    debug_assert!(
                        p.completion_time.is_some(),
                        "P{} completed without a completion time",
                        p.pid
                    );
                    debug_assert_eq!(
                        timeline.service_time(p.pid),
                        p.burst,
                        "P{} Gantt intervals do not sum to its burst",
                        p.pid
                    );
                    debug_assert_eq!(
                        p.wait + p.burst,
                        p.turnaround,
                        "P{} wait/turnaround identity broken",
                        p.pid
                    );
                }
                ProcState::Waiting => {}
            }
        }
        debug_assert!(running <= 1, "more than one process marked Running");
    }
}
