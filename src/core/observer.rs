use super::state::{JobState, SimState};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, state: &SimState) {
        self.step += 1;

        debug_assert!(
            state.cpu_is_idle(),
            "Job {:?} still holds the CPU between steps",
            state.running
        );

        for &idx in &state.ready {
            let job = state.job(idx);
            debug_assert_eq!(
                job.state,
                JobState::Ready,
                "Job {} in ready queue must be Ready",
                job.pid()
            );
            debug_assert!(
                job.job.arrival_time <= state.now,
                "Job {} enqueued before its arrival at {}",
                job.pid(),
                job.job.arrival_time
            );
        }

        let mut ready = 0;
        let mut completed = 0;
        for job in &state.jobs {
            if job.state == JobState::Ready {
                ready += 1;
            }

            if let Some(start) = job.first_start_time {
                debug_assert!(
                    start >= job.job.arrival_time,
                    "Job {} dispatched at {start} before arriving at {}",
                    job.pid(),
                    job.job.arrival_time
                );
            }

            if let Some(end) = job.end_time {
                completed += 1;
                debug_assert_eq!(job.state, JobState::Completed);
                debug_assert_eq!(job.remaining_time, 0);
                debug_assert!(
                    job.first_start_time.is_some_and(|start| end >= start),
                    "Job {} ended at {end} before it started",
                    job.pid()
                );
                debug_assert!(
                    end - job.job.arrival_time >= job.job.burst_time,
                    "Job {} finished faster than its burst",
                    job.pid()
                );
            }
        }

        // Every queued job is Ready and pushes reject duplicates, so equal
        // counts mean no Ready job is missing from the queue
        debug_assert_eq!(
            ready,
            state.ready.len(),
            "Ready jobs and ready queue disagree"
        );
        debug_assert_eq!(
            completed, state.completed,
            "Completion counter disagrees with the job table"
        );
    }
}
