use crate::error::ConfigError;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

pub type Pid = u32;
pub type Ticks = u64;

/// Capacity of one process table, matching the reference bookkeeping tables.
pub const MAX_PROCESSES: usize = 256;

new_key_type! {
    pub struct ProcKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Waiting,
    Ready,
    Running,
    Completed,
}

/// Immutable seed attributes of one process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: i32,
}

impl ProcessSpec {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks, priority: i32) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority,
        }
    }
}

/// Seed attributes plus the run-state the driver mutates.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: i32,

    pub remaining: Ticks,
    pub state: ProcState,
    /// Tick of first execution; unset until the process first runs.
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,

    // Valid once state == Completed, zero before.
    pub turnaround: Ticks,
    pub wait: Ticks,
}

impl ProcessRecord {
    fn from_spec(spec: ProcessSpec) -> Self {
        Self {
            pid: spec.pid,
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
            remaining: spec.burst,
            state: ProcState::Waiting,
            start_time: None,
            completion_time: None,
            turnaround: 0,
            wait: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcState::Completed
    }

    /// Eligible for selection: arrived and sitting in the ready set.
    pub fn is_eligible(&self, now: Ticks) -> bool {
        self.arrival <= now && self.state == ProcState::Ready
    }
}

/// The process table one simulation run operates on.
///
/// Records live in a slotmap; pids map to slots through an explicit table
/// validated at construction, so two pids can never alias the same slot.
/// Iteration order is insertion order, which doubles as the stable
/// tie-break order for the policies.
#[derive(Debug, Clone, Default)]
pub struct ProcTable {
    procs: SlotMap<ProcKey, ProcessRecord>,
    by_pid: FxHashMap<Pid, ProcKey>,
    order: Vec<ProcKey>,
}

impl ProcTable {
    pub fn from_specs(specs: impl IntoIterator<Item = ProcessSpec>) -> Result<Self, ConfigError> {
        let mut table = Self::default();
        for spec in specs {
            table.insert(spec)?;
        }
        Ok(table)
    }

    fn insert(&mut self, spec: ProcessSpec) -> Result<(), ConfigError> {
        if self.procs.len() >= MAX_PROCESSES {
            return Err(ConfigError::CapacityExceeded {
                capacity: MAX_PROCESSES,
            });
        }
        if self.by_pid.contains_key(&spec.pid) {
            return Err(ConfigError::DuplicatePid(spec.pid));
        }

        let pid = spec.pid;
        let key = self.procs.insert(ProcessRecord::from_spec(spec));
        self.by_pid.insert(pid, key);
        self.order.push(key);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.by_pid.get(&pid).map(|&key| &self.procs[key])
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut ProcessRecord> {
        let key = *self.by_pid.get(&pid)?;
        Some(&mut self.procs[key])
    }

    /// All records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.order.iter().map(|&key| &self.procs[key])
    }

    /// All records, mutably. Insertion order is preserved because the
    /// table never removes entries.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProcessRecord> {
        self.procs.values_mut()
    }

    /// Records eligible for selection at `now`, in insertion order.
    pub fn eligible(&self, now: Ticks) -> impl Iterator<Item = &ProcessRecord> {
        self.iter().filter(move |p| p.is_eligible(now))
    }

    pub fn all_completed(&self) -> bool {
        self.iter().all(ProcessRecord::is_completed)
    }

    /// Clears all run-state so the same table can seed another run.
    pub fn reset_run_state(&mut self) {
        for proc in self.procs.values_mut() {
            proc.remaining = proc.burst;
            proc.state = ProcState::Waiting;
            proc.start_time = None;
            proc.completion_time = None;
            proc.turnaround = 0;
            proc.wait = 0;
        }
    }
}

/// One closed execution interval: `pid` occupied the CPU over [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GanttEntry {
    pub pid: Pid,
    pub start: Ticks,
    pub end: Ticks,
}

/// Append-only execution log, ordered by interval start.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<GanttEntry>,
}

impl Timeline {
    pub fn push(&mut self, pid: Pid, start: Ticks, end: Ticks) {
        debug_assert!(start < end, "Gantt interval must be non-empty");
        debug_assert!(
            self.entries.last().map_or(true, |last| last.end <= start),
            "Gantt intervals must be appended in start order"
        );
        self.entries.push(GanttEntry { pid, start, end });
    }

    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &GanttEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total CPU time the log attributes to `pid`.
    pub fn service_time(&self, pid: Pid) -> Ticks {
        self.entries
            .iter()
            .filter(|e| e.pid == pid)
            .map(|e| e.end - e.start)
            .sum()
    }
}
