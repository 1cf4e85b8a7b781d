use schedsim::{report, simulate, PolicyConfig, PolicyKind, ProcTable, ProcessSpec};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "fcfs".into());
    let Some(kind) = parse_policy(&name) else {
        eprintln!("unknown policy '{name}'");
        eprintln!("expected one of: fcfs, sjf, srtf, priority, priority-np, rr, mlfq");
        return ExitCode::FAILURE;
    };

    // Reference process table: pid, arrival, burst, priority.
    let specs = [
        ProcessSpec::new(1, 0, 10, 1),
        ProcessSpec::new(2, 0, 5, 2),
        ProcessSpec::new(3, 0, 8, 3),
    ];

    let table = match ProcTable::from_specs(specs) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("invalid process table: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Processes initialized:");
    println!("PID\tAT\tBT");
    for spec in &specs {
        println!("{}\t{}\t{}", spec.pid, spec.arrival, spec.burst);
    }

    println!("\nRunning {name}...");
    let result = match simulate(table, kind, &PolicyConfig::default()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("\n--- Results ---");
    print!("{}", report::render_table(&result.table));

    println!("\nGantt Chart:");
    println!("{}", report::render_gantt(&result.timeline));

    let metrics = result.metrics();
    println!("\nAverage wait time: {:.2} ticks", metrics.avg_wait);
    println!("Average turnaround time: {:.2} ticks", metrics.avg_turnaround);
    println!("Average response time: {:.2} ticks", metrics.avg_response);
    println!("CPU utilization: {:.2}%", metrics.cpu_utilization);
    println!("Context switches: {}", metrics.context_switches);
    println!("Throughput: {:.4} processes/tick", metrics.throughput);

    ExitCode::SUCCESS
}

fn parse_policy(name: &str) -> Option<PolicyKind> {
    Some(match name {
        "fcfs" => PolicyKind::Fcfs,
        "sjf" => PolicyKind::Sjf,
        "srtf" => PolicyKind::Srtf,
        "priority" => PolicyKind::Priority,
        "priority-np" => PolicyKind::PriorityNonPreemptive,
        "rr" => PolicyKind::RoundRobin,
        "mlfq" => PolicyKind::Mlfq,
        _ => return None,
    })
}
