use std::collections::VecDeque;

use crate::sim::job::{Job, JobInstance};

// Index into the job table
pub type JobIdx = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    // Not yet arrived
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug)]
pub struct SimState {
    pub now: Ticks,
    pub jobs: Vec<JobInstance>,
    pub ready: VecDeque<JobIdx>,
    pub running: Option<JobIdx>,
    pub completed: usize,
}

impl SimState {
    /// Builds the job table in `(arrival_time, pid)` order.
    pub fn new(mut jobs: Vec<Job>) -> Self {
        jobs.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.pid.cmp(&b.pid))
        });
        let jobs: Vec<JobInstance> = jobs.into_iter().map(JobInstance::new).collect();

        Self {
            now: 0,
            ready: VecDeque::with_capacity(jobs.len()),
            jobs,
            running: None,
            completed: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn fast_forward(&mut self, to: Ticks) -> Ticks {
        debug_assert!(to >= self.now, "Clock cannot move backwards ({} -> {to})", self.now);
        let skipped = to.saturating_sub(self.now);
        self.now = self.now.max(to);
        skipped
    }

    pub fn job(&self, idx: JobIdx) -> &JobInstance {
        &self.jobs[idx]
    }

    pub fn job_mut(&mut self, idx: JobIdx) -> &mut JobInstance {
        &mut self.jobs[idx]
    }

    pub fn ready_push_back(&mut self, idx: JobIdx) {
        debug_assert!(
            !self.ready.contains(&idx),
            "Job {idx} already present in the ready queue"
        );

        let job = self.job_mut(idx);
        debug_assert!(
            job.state != JobState::Completed && job.state != JobState::Running,
            "Job {} must not be Running or Completed when enqueued",
            job.pid()
        );
        debug_assert!(
            job.remaining_time > 0 || job.first_start_time.is_none(),
            "Job {} has no time left but is being re-queued",
            job.pid()
        );

        job.state = JobState::Ready;
        self.ready.push_back(idx);
    }

    pub fn ready_pop_front(&mut self) -> Option<JobIdx> {
        self.ready.pop_front()
    }

    // Return previous state
    pub fn set_running(&mut self, idx: JobIdx) -> JobState {
        debug_assert!(
            self.running.is_none(),
            "CPU already running job {:?}",
            self.running
        );
        debug_assert!(
            !self.ready.contains(&idx),
            "Running job {idx} must not be enqueued"
        );

        self.running = Some(idx);
        let job = self.job_mut(idx);
        let prev_state = job.state;
        job.state = JobState::Running;
        prev_state
    }

    pub fn clear_running(&mut self) -> Option<JobIdx> {
        self.running.take()
    }

    pub fn mark_completed(&mut self, idx: JobIdx, end_time: Ticks) {
        debug_assert!(
            self.running != Some(idx),
            "Completing job {idx} that still holds the CPU"
        );

        let job = &mut self.jobs[idx];
        debug_assert!(
            job.state == JobState::Running,
            "Job {} must have been running before marked complete",
            job.pid()
        );
        debug_assert!(
            job.end_time.is_none(),
            "Job {} completed twice",
            job.pid()
        );

        job.state = JobState::Completed;
        job.remaining_time = 0;
        job.end_time = Some(end_time);
        self.completed += 1;
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.jobs.len()
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.running.is_none()
    }
}
