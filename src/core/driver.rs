use tracing::{debug, trace};

use super::{
    event::SimEvent,
    metrics::Metrics,
    observer::Observer,
    state::{JobIdx, JobState, SimState, Ticks},
};
use crate::sim::job::Job;

/// A job holding the CPU for one slice, between `run_slice` and `finish_slice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub job: JobIdx,
    pub run_time: Ticks,
}

/// Single-CPU Round-Robin dispatcher.
///
/// Owns the clock, the job table and the ready queue. Arrivals are fed in
/// by the caller through [`RrCore::admit`]; a dispatch is split in two so
/// the caller can admit jobs that arrived during the slice before the
/// preempted job is put back at the tail.
pub struct RrCore {
    pub ctx: SimState,
    quantum: Ticks,
    metrics: Metrics,
    observer: Observer,
}

impl RrCore {
    pub fn new(jobs: Vec<Job>, quantum: Ticks) -> Self {
        Self {
            ctx: SimState::new(jobs),
            quantum,
            metrics: Metrics::default(),
            observer: Observer::new(),
        }
    }

    pub fn admit(&mut self, idx: JobIdx, events: &mut Vec<SimEvent>) {
        let job = self.ctx.job(idx);
        debug_assert_eq!(job.state, JobState::Pending, "Job {} admitted twice", job.pid());
        debug_assert!(job.job.arrival_time <= self.ctx.now);

        let pid = job.pid();
        trace!(pid, now = self.ctx.now, "admitted");
        self.ctx.ready_push_back(idx);
        events.push(SimEvent::Admitted { pid });
    }

    /// Pops the head of the ready queue and runs it for at most one quantum.
    pub fn run_slice(&mut self, events: &mut Vec<SimEvent>) -> Option<Slice> {
        let idx = self.ctx.ready_pop_front()?;
        self.ctx.set_running(idx);
        self.metrics.record_dispatch();

        let now = self.ctx.now;
        let quantum = self.quantum;
        let job = self.ctx.job_mut(idx);

        let first_dispatch = job.first_start_time.is_none();
        if first_dispatch {
            job.first_start_time = Some(now);
            let response_time = now - job.job.arrival_time;
            self.metrics.record_response(response_time);
        }

        let run_time = job.remaining_time.min(quantum);
        job.remaining_time -= run_time;
        let pid = job.pid();

        trace!(pid, now, run_time, first_dispatch, "dispatched");
        events.push(SimEvent::Dispatched {
            pid,
            run_time,
            first_dispatch,
        });

        self.ctx.advance_time(run_time);
        Some(Slice { job: idx, run_time })
    }

    /// Completes or re-queues the job that ran during `slice`.
    pub fn finish_slice(&mut self, slice: Slice, events: &mut Vec<SimEvent>) {
        let running = self.ctx.clear_running();
        debug_assert_eq!(running, Some(slice.job), "Finished slice does not own the CPU");

        let idx = slice.job;
        let now = self.ctx.now;
        let remaining_time = self.ctx.job(idx).remaining_time;

        if remaining_time == 0 {
            self.ctx.mark_completed(idx, now);
            let job = self.ctx.job(idx);
            let pid = job.pid();
            let waiting_time = job.waiting_time().unwrap_or_default();
            let response_time = job.response_time().unwrap_or_default();
            let turnaround_time = job.turnaround_time().unwrap_or_default();
            self.metrics.record_completion(waiting_time, turnaround_time);

            debug!(pid, now, waiting_time, response_time, "completed");
            events.push(SimEvent::Completed {
                pid,
                waiting_time,
                response_time,
            });
        } else {
            // Mark as not running so that it can be re-queued
            self.ctx.job_mut(idx).state = JobState::Ready;
            self.ctx.ready_push_back(idx);
            events.push(SimEvent::Preempted {
                pid: self.ctx.job(idx).pid(),
                remaining_time,
            });
        }
    }

    /// Jumps the clock to `until` while the CPU has nothing to run.
    pub fn fast_forward(&mut self, until: Ticks, events: &mut Vec<SimEvent>) {
        debug_assert!(self.ctx.ready.is_empty(), "Idling with a non-empty ready queue");
        let from = self.ctx.now;
        let skipped = self.ctx.fast_forward(until);
        self.metrics.record_idle(skipped);

        debug!(from, until, "cpu idle, fast-forwarding");
        events.push(SimEvent::Idle { from, until });
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
