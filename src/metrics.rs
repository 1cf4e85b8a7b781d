use crate::core::state::{ProcTable, Ticks};
use average::{Estimate, Mean};

/// Aggregate statistics over one completed run.
///
/// Always recomputed wholesale from the final process set; never updated
/// incrementally. Means are taken over the true per-process wait,
/// turnaround, and response values. (The reference implementation averaged
/// burst time in place of turnaround and never accumulated wait at all;
/// that accumulation bug is corrected here so the identities
/// `wait + burst = turnaround` and `turnaround = completion - arrival`
/// carry through to the averages.)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub avg_wait: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    /// Percentage of total simulated time the CPU was busy.
    pub cpu_utilization: f64,
    pub context_switches: u64,
    /// Completed processes per time unit.
    pub throughput: f64,
}

impl Metrics {
    pub const ZERO: Metrics = Metrics {
        avg_wait: 0.0,
        avg_turnaround: 0.0,
        avg_response: 0.0,
        cpu_utilization: 0.0,
        context_switches: 0,
        throughput: 0.0,
    };
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mean: Mean = values.collect();
    if mean.len() == 0 {
        0.0
    } else {
        mean.estimate()
    }
}

/// Reduces a completed run to its aggregate statistics.
///
/// Zero completed processes is a normal outcome, not an error: every field
/// is zero, matching the reference behavior.
pub fn compute(
    table: &ProcTable,
    total_ticks: Ticks,
    busy_ticks: Ticks,
    context_switches: u64,
) -> Metrics {
    let completed: Vec<_> = table.iter().filter(|p| p.is_completed()).collect();
    if completed.is_empty() {
        return Metrics::ZERO;
    }

    let avg_wait = mean(completed.iter().map(|p| p.wait as f64));
    let avg_turnaround = mean(completed.iter().map(|p| p.turnaround as f64));
    let avg_response = mean(completed.iter().filter_map(|p| {
        p.start_time
            .map(|start| (start - p.arrival) as f64)
    }));

    let (cpu_utilization, throughput) = if total_ticks > 0 {
        (
            100.0 * busy_ticks as f64 / total_ticks as f64,
            completed.len() as f64 / total_ticks as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Metrics {
        avg_wait,
        avg_turnaround,
        avg_response,
        cpu_utilization,
        context_switches,
        throughput,
    }
}
