use super::state::Ticks;

/// Running totals accumulated by the engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub total_waiting_time: Ticks,
    pub total_response_time: Ticks,
    pub total_turnaround_time: Ticks,
    pub dispatches: u64,
    // Ticks skipped while the ready queue was empty; never charged to a job
    pub idle_time: Ticks,
}

impl Metrics {
    pub fn record_dispatch(&mut self) {
        self.dispatches += 1;
    }

    pub fn record_response(&mut self, response_time: Ticks) {
        self.total_response_time += response_time;
    }

    pub fn record_completion(&mut self, waiting_time: Ticks, turnaround_time: Ticks) {
        self.total_waiting_time += waiting_time;
        self.total_turnaround_time += turnaround_time;
    }

    pub fn record_idle(&mut self, skipped: Ticks) {
        self.idle_time += skipped;
    }

    pub fn summarize(&self, count: usize, makespan: Ticks) -> Summary {
        Summary {
            count,
            total_waiting_time: self.total_waiting_time,
            total_response_time: self.total_response_time,
            total_turnaround_time: self.total_turnaround_time,
            dispatches: self.dispatches,
            idle_time: self.idle_time,
            makespan,
        }
    }
}

/// Final result of one simulation run.
///
/// Averages are totals divided by `count`; they are `None` for an empty
/// batch so callers never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total_waiting_time: Ticks,
    pub total_response_time: Ticks,
    pub total_turnaround_time: Ticks,
    pub dispatches: u64,
    pub idle_time: Ticks,
    pub makespan: Ticks,
}

impl Summary {
    fn average(&self, total: Ticks) -> Option<f64> {
        (self.count > 0).then(|| total as f64 / self.count as f64)
    }

    pub fn average_waiting_time(&self) -> Option<f64> {
        self.average(self.total_waiting_time)
    }

    pub fn average_response_time(&self) -> Option<f64> {
        self.average(self.total_response_time)
    }

    pub fn average_turnaround_time(&self) -> Option<f64> {
        self.average(self.total_turnaround_time)
    }
}
