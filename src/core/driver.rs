use super::event::SimEvent;
use super::observer::Observer;
use super::state::{Pid, ProcState, ProcTable, Ticks, Timeline};
use crate::error::ConfigError;
use crate::metrics::{self, Metrics};
use crate::scheduler::{Policy, PolicyConfig, PolicyKind};
use log::debug;

/// One tick-driven simulation run.
///
/// The driver owns the process table, the policy instance, and the Gantt
/// log for the duration of the run; dropping it abandons the run. Policy
/// bookkeeping and process run-state are wiped on construction, so reusing
/// a table or a policy across runs cannot leak state between them.
pub struct Sim<P: Policy> {
    table: ProcTable,
    policy: P,
    timeline: Timeline,
    now: Ticks,
    current: Option<Pid>,
    interval_start: Ticks,
    busy_ticks: Ticks,
    context_switches: u64,
    last_dispatched: Option<Pid>,
    observer: Observer,
}

/// Final state of a completed run, ready for metrics and reporting.
#[derive(Debug, Clone)]
pub struct SimResult {
    pub table: ProcTable,
    pub timeline: Timeline,
    pub total_ticks: Ticks,
    pub busy_ticks: Ticks,
    pub context_switches: u64,
}

impl SimResult {
    pub fn metrics(&self) -> Metrics {
        metrics::compute(
            &self.table,
            self.total_ticks,
            self.busy_ticks,
            self.context_switches,
        )
    }
}

impl<P: Policy> Sim<P> {
    pub fn new(mut table: ProcTable, mut policy: P) -> Self {
        table.reset_run_state();
        policy.reset();
        Self {
            table,
            policy,
            timeline: Timeline::default(),
            now: 0,
            current: None,
            interval_start: 0,
            busy_ticks: 0,
            context_switches: 0,
            last_dispatched: None,
            observer: Observer::new(),
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn table(&self) -> &ProcTable {
        &self.table
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn all_completed(&self) -> bool {
        self.table.all_completed()
    }

    /// Advances the simulation by one time unit and reports what happened.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.table.all_completed() {
            return events;
        }

        self.admit_arrivals();

        if let Some(pid) = self.current {
            if self.policy.should_preempt(pid, &self.table, self.now) {
                self.close_interval(pid);
                self.proc_mut(pid).state = ProcState::Ready;
                self.current = None;
                debug!("t={} preempt P{}", self.now, pid);
                events.push(SimEvent::Preempted { pid });
            }
        }

        if self.current.is_none() {
            match self.policy.select_next(&self.table, self.now) {
                None => {
                    debug_assert!(
                        self.table.eligible(self.now).next().is_none(),
                        "policy idled while processes were eligible"
                    );
                    self.now += 1;
                    events.push(SimEvent::Idle);
                    self.observer.observe(&self.table, &self.timeline, self.now);
                    return events;
                }
                Some(pid) => {
                    self.dispatch(pid);
                    events.push(SimEvent::Dispatched { pid });
                }
            }
        }

        let pid = self.current.expect("a process must be running past dispatch");
        self.execute_tick(pid);

        if self.proc(pid).remaining == 0 {
            self.complete(pid);
            events.push(SimEvent::Completed { pid });
        }

        self.observer.observe(&self.table, &self.timeline, self.now);
        events
    }

    /// Steps to completion and hands back the final table and Gantt log.
    pub fn run(mut self) -> SimResult {
        while !self.table.all_completed() {
            self.step();
        }
        SimResult {
            table: self.table,
            timeline: self.timeline,
            total_ticks: self.now,
            busy_ticks: self.busy_ticks,
            context_switches: self.context_switches,
        }
    }

    fn admit_arrivals(&mut self) {
        let now = self.now;
        for p in self.table.iter_mut() {
            if p.state == ProcState::Waiting && p.arrival <= now {
                p.state = ProcState::Ready;
            }
        }
    }

    fn dispatch(&mut self, pid: Pid) {
        if self.last_dispatched.map_or(false, |prev| prev != pid) {
            self.context_switches += 1;
        }
        self.policy.on_context_switch(pid);

        let now = self.now;
        let proc = self.proc_mut(pid);
        proc.state = ProcState::Running;
        if proc.start_time.is_none() {
            proc.start_time = Some(now);
        }

        self.interval_start = now;
        self.current = Some(pid);
        self.last_dispatched = Some(pid);
        debug!("t={} dispatch P{}", now, pid);
    }

    fn execute_tick(&mut self, pid: Pid) {
        let proc = self.proc_mut(pid);
        debug_assert!(proc.remaining > 0, "running process has no work left");
        proc.remaining -= 1;

        self.busy_ticks += 1;
        self.policy.on_tick(pid);
        self.now += 1;
    }

    fn complete(&mut self, pid: Pid) {
        self.close_interval(pid);
        let now = self.now;
        let proc = self.proc_mut(pid);
        proc.state = ProcState::Completed;
        proc.completion_time = Some(now);
        proc.turnaround = now - proc.arrival;
        proc.wait = proc.turnaround - proc.burst;
        self.current = None;
        debug!("t={} complete P{}", now, pid);
    }

    fn close_interval(&mut self, pid: Pid) {
        self.timeline.push(pid, self.interval_start, self.now);
    }

    fn proc(&self, pid: Pid) -> &super::state::ProcessRecord {
        self.table
            .get(pid)
            .expect("running pid missing from process table")
    }

    fn proc_mut(&mut self, pid: Pid) -> &mut super::state::ProcessRecord {
        self.table
            .get_mut(pid)
            .expect("running pid missing from process table")
    }
}

/// Builds and runs one simulation in a single call.
pub fn simulate(
    table: ProcTable,
    kind: PolicyKind,
    config: &PolicyConfig,
) -> Result<SimResult, ConfigError> {
    let policy = kind.build(config)?;
    Ok(Sim::new(table, policy).run())
}
