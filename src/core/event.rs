use crate::{core::Ticks, sim::Pid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Admitted {
        pid: Pid,
    },
    Dispatched {
        pid: Pid,
        run_time: Ticks,
        first_dispatch: bool,
    },
    // Slice used up, job goes to the back of the ready queue
    Preempted {
        pid: Pid,
        remaining_time: Ticks,
    },
    Completed {
        pid: Pid,
        waiting_time: Ticks,
        response_time: Ticks,
    },
    // Ready queue empty; clock jumped to the next arrival
    Idle {
        from: Ticks,
        until: Ticks,
    },
}
