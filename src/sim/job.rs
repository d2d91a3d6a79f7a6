use crate::core::state::{JobState, Ticks};

pub type Pid = u32;

/// One process as described by the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Job {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
        }
    }
}

/// A job plus the state the engine mutates while running it.
#[derive(Debug, Clone)]
pub struct JobInstance {
    pub job: Job,
    pub state: JobState,
    pub remaining_time: Ticks,
    pub first_start_time: Option<Ticks>,
    pub end_time: Option<Ticks>,
}

impl JobInstance {
    pub fn new(job: Job) -> Self {
        Self {
            job,
            state: JobState::Pending,
            remaining_time: job.burst_time,
            first_start_time: None,
            end_time: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.job.pid
    }

    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.first_start_time
            .map(|start| start - self.job.arrival_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.end_time
            .map(|end| end - self.job.arrival_time - self.job.burst_time)
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.end_time.map(|end| end - self.job.arrival_time)
    }
}
