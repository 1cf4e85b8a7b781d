//! Human-readable report rendering.
//!
//! The table and Gantt strings are a textual contract consumed by external
//! drivers: `PID\tAT\tBT\tCT\tTAT\tWT` rows and `| P<pid> (<start>-<end>) `
//! tokens, reproducible bit-for-bit against reference output.

use crate::core::state::{ProcTable, Timeline};
use std::fmt::Write as _;
use std::io;
use std::path::Path;

/// Tab-separated results table, one row per process in table order.
pub fn render_table(table: &ProcTable) -> String {
    let mut out = String::from("PID\tAT\tBT\tCT\tTAT\tWT\n");
    for p in table.iter() {
        let ct = p.completion_time.unwrap_or(0);
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            p.pid, p.arrival, p.burst, ct, p.turnaround, p.wait
        );
    }
    out
}

/// Gantt chart token sequence with closing bar.
pub fn render_gantt(timeline: &Timeline) -> String {
    let mut out = String::new();
    for entry in timeline.iter() {
        let _ = write!(out, "| P{} ({}-{}) ", entry.pid, entry.start, entry.end);
    }
    out.push('|');
    out
}

/// Full report: results table followed by the Gantt chart.
pub fn render_report(table: &ProcTable, timeline: &Timeline) -> String {
    format!(
        "{}\nGantt Chart:\n{}\n",
        render_table(table),
        render_gantt(timeline)
    )
}

/// Writes the report to an external sink. No format is defined beyond the
/// table and Gantt strings above.
pub fn write_output(path: &Path, table: &ProcTable, timeline: &Timeline) -> io::Result<()> {
    std::fs::write(path, render_report(table, timeline))
}
