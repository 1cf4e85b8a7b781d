use crate::core::state::Pid;

/// What one simulated time unit did with the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// An execution interval opened for `pid`.
    Dispatched { pid: Pid },
    /// The running process gave up the CPU with work remaining.
    Preempted { pid: Pid },
    /// The running process finished its burst.
    Completed { pid: Pid },
    /// Nothing was eligible; the clock advanced over an idle unit.
    Idle,
}
