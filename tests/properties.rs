use rr_model::{Job, Pid, Sim, SimEvent, Summary, sim::bernoulli_jobs};
use rustc_hash::FxHashMap;

const SEEDS: [u64; 6] = [0, 1, 7, 42, 1234, 98765];

fn workload(seed: u64) -> Vec<Job> {
    bernoulli_jobs(400, 0.3, 0.3, 2, 6, seed)
}

fn run(jobs: Vec<Job>, quantum: u64) -> (Sim, Summary, Vec<SimEvent>) {
    let mut sim = Sim::new(jobs, quantum);
    let mut events = Vec::new();
    let summary = sim.run_with(|_, event| events.push(event.clone()));
    (sim, summary, events)
}

#[test]
fn test_deterministic() {
    for seed in SEEDS {
        for quantum in [1, 3, 5] {
            let (_, a, events_a) = run(workload(seed), quantum);
            let (_, b, events_b) = run(workload(seed), quantum);
            assert_eq!(a, b, "seed {seed} quantum {quantum}");
            assert_eq!(events_a, events_b);
        }
    }
}

#[test]
fn test_time_conservation() {
    for seed in SEEDS {
        let (sim, summary, _) = run(workload(seed), 3);

        let mut waiting = 0;
        let mut response = 0;
        for job in sim.jobs() {
            let start = job.first_start_time.unwrap();
            let end = job.end_time.unwrap();
            assert!(start >= job.job.arrival_time);
            assert!(end >= start);
            assert!(end - job.job.arrival_time >= job.job.burst_time);
            waiting += job.waiting_time().unwrap();
            response += job.response_time().unwrap();
        }

        assert_eq!(summary.total_waiting_time, waiting);
        assert_eq!(summary.total_response_time, response);

        // One CPU: the clock only moves by running bursts or by idling
        let total_burst: u64 = sim.jobs().iter().map(|j| j.job.burst_time).sum();
        assert_eq!(summary.makespan, total_burst + summary.idle_time);
    }
}

#[test]
fn test_every_job_completes_once_with_its_full_burst() {
    for seed in SEEDS {
        let jobs = workload(seed);
        let bursts: FxHashMap<Pid, u64> = jobs.iter().map(|j| (j.pid, j.burst_time)).collect();
        let (sim, summary, events) = run(jobs, 4);

        let mut ran: FxHashMap<Pid, u64> = FxHashMap::default();
        let mut completions: FxHashMap<Pid, u32> = FxHashMap::default();
        for event in &events {
            match event {
                SimEvent::Dispatched { pid, run_time, .. } => {
                    assert!(*run_time <= 4);
                    *ran.entry(*pid).or_default() += run_time;
                }
                SimEvent::Completed { pid, .. } => *completions.entry(*pid).or_default() += 1,
                _ => {}
            }
        }

        assert_eq!(ran, bursts);
        assert_eq!(completions.len(), bursts.len());
        assert!(completions.values().all(|&n| n == 1));
        assert!(sim.all_jobs_completed());
        assert_eq!(summary.count, bursts.len());
    }
}

#[test]
fn test_first_dispatch_follows_arrival_then_pid() {
    for seed in SEEDS {
        // Squash arrivals into buckets and reverse pids so ties are common
        let jobs: Vec<Job> = workload(seed)
            .into_iter()
            .map(|j| Job::new(10_000 - j.pid, j.arrival_time / 8, j.burst_time))
            .collect();

        let mut expected = jobs.clone();
        expected.sort_by_key(|j| (j.arrival_time, j.pid));
        let expected: Vec<Pid> = expected.iter().map(|j| j.pid).collect();

        let (_, _, events) = run(jobs, 2);
        let first_dispatches: Vec<Pid> = events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Dispatched {
                    pid,
                    first_dispatch: true,
                    ..
                } => Some(*pid),
                _ => None,
            })
            .collect();

        assert_eq!(first_dispatches, expected);
    }
}

#[test]
fn test_large_quantum_degenerates_to_fcfs() {
    for seed in SEEDS {
        let jobs = workload(seed);
        let max_burst = jobs.iter().map(|j| j.burst_time).max().unwrap();
        let (sim, summary, _) = run(jobs, max_burst);

        assert_eq!(summary.dispatches, sim.jobs().len() as u64);

        let mut clock = 0;
        for job in sim.jobs() {
            let start = clock.max(job.job.arrival_time);
            assert_eq!(job.first_start_time, Some(start));
            assert_eq!(job.waiting_time(), job.response_time());
            clock = start + job.job.burst_time;
            assert_eq!(job.end_time, Some(clock));
        }
    }
}

#[test]
fn test_fcfs_waiting_is_sum_of_earlier_bursts() {
    let jobs = vec![
        Job::new(3, 0, 4),
        Job::new(1, 0, 2),
        Job::new(2, 0, 7),
        Job::new(4, 0, 1),
    ];
    let (sim, summary, _) = run(jobs, 7);

    let waits: Vec<_> = sim.jobs().iter().map(|j| j.waiting_time().unwrap()).collect();
    // dispatch order by pid: bursts 2, 7, 4, 1
    assert_eq!(waits, vec![0, 2, 9, 13]);
    assert_eq!(summary.total_waiting_time, 24);
}

#[test]
fn test_zero_quantum_ignores_workload() {
    for seed in SEEDS {
        let (_, summary, events) = run(workload(seed), 0);
        assert!(events.is_empty());
        assert_eq!(summary.total_waiting_time, 0);
        assert_eq!(summary.total_response_time, 0);
    }
}
