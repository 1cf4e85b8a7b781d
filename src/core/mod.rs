pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{simulate, Sim, SimResult};
pub use event::SimEvent;
pub use state::{
    GanttEntry, Pid, ProcState, ProcTable, ProcessRecord, ProcessSpec, Ticks, Timeline,
    MAX_PROCESSES,
};
