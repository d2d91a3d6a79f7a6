use super::job::{Job, JobInstance};
use crate::core::{
    driver::RrCore,
    event::SimEvent,
    metrics::{Metrics, Summary},
    state::Ticks,
};
use tracing::{debug, info};

/// Round-Robin simulation over a fixed batch of jobs.
pub struct Sim {
    pub core: RrCore,
    // Next job in the table to admit; contiguous since the table is sorted by arrival
    job_cursor: usize,
    // Admissions made before the first step
    pending_events: Vec<SimEvent>,
}

impl Sim {
    /// Sorts the batch and admits everything arriving at time 0.
    ///
    /// A quantum of 0 disables scheduling entirely: the simulation is
    /// finished from the start and every total stays 0.
    pub fn new(jobs: Vec<Job>, quantum: Ticks) -> Self {
        let mut sim = Self {
            core: RrCore::new(jobs, quantum),
            job_cursor: 0,
            pending_events: Vec::new(),
        };

        if sim.scheduling_enabled() {
            let mut events = Vec::new();
            sim.handle_arrivals(&mut events);
            sim.pending_events = events;
        } else {
            debug!(jobs = sim.core.ctx.jobs.len(), "quantum is 0, no scheduling performed");
        }

        sim
    }

    pub fn scheduling_enabled(&self) -> bool {
        self.core.quantum() > 0
    }

    /// Runs one iteration of the scheduling loop: either one dispatch, or an
    /// idle jump to the next arrival.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        if self.is_finished() {
            return events;
        }

        if let Some(slice) = self.core.run_slice(&mut events) {
            // Jobs arriving during the slice queue up ahead of the preempted one
            self.handle_arrivals(&mut events);
            self.core.finish_slice(slice, &mut events);
        } else if let Some(next) = self.next_arrival_time() {
            self.core.fast_forward(next, &mut events);
            self.handle_arrivals(&mut events);
        }

        self.core.observe();
        events
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SimEvent>) {
        let now = self.core.now();
        while let Some(job) = self.core.ctx.jobs.get(self.job_cursor) {
            if job.job.arrival_time > now {
                break;
            }
            self.core.admit(self.job_cursor, events);
            self.job_cursor += 1;
        }
    }

    fn next_arrival_time(&self) -> Option<Ticks> {
        self.core
            .ctx
            .jobs
            .get(self.job_cursor)
            .map(|job| job.job.arrival_time)
    }

    pub fn is_finished(&self) -> bool {
        !self.scheduling_enabled() || self.all_jobs_completed()
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    /// Steps to completion, handing every event to `on_event` together with
    /// the clock value at the start of the step that produced it.
    pub fn run_with<F>(&mut self, mut on_event: F) -> Summary
    where
        F: FnMut(Ticks, &SimEvent),
    {
        while !self.is_finished() {
            let now = self.now();
            for event in self.step() {
                on_event(now, &event);
            }
        }

        let summary = self.summary();
        info!(
            jobs = summary.count,
            quantum = self.core.quantum(),
            total_waiting_time = summary.total_waiting_time,
            total_response_time = summary.total_response_time,
            makespan = summary.makespan,
            "simulation finished"
        );
        summary
    }

    pub fn run(&mut self) -> Summary {
        self.run_with(|_, _| {})
    }

    pub fn summary(&self) -> Summary {
        self.core
            .metrics()
            .summarize(self.core.ctx.jobs.len(), self.now())
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn metrics(&self) -> &Metrics {
        self.core.metrics()
    }

    /// The job table in scheduling order `(arrival_time, pid)`.
    pub fn jobs(&self) -> &[JobInstance] {
        &self.core.ctx.jobs
    }

    pub fn jobs_map<'a, T, F>(&'a self, f: F) -> impl Iterator<Item = T> + 'a
    where
        F: Fn(&JobInstance) -> T + 'a,
    {
        self.jobs().iter().map(f)
    }
}
