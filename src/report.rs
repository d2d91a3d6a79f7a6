use average::{Estimate, Max, Mean};
use tabled::{Table, Tabled};

use crate::{
    core::{metrics::Summary, state::Ticks},
    sim::job::{JobInstance, Pid},
};

/// The two summary lines printed after a run. An empty batch prints `0.00`.
pub fn format_averages(summary: &Summary) -> String {
    format!(
        "Average waiting time: {:.2}\nAverage response time: {:.2}\n",
        summary.average_waiting_time().unwrap_or(0.0),
        summary.average_response_time().unwrap_or(0.0),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ProcessRow {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    #[tabled(rename = "first start")]
    pub first_start: String,
    pub end: String,
    pub waiting: String,
    pub response: String,
    pub turnaround: String,
}

fn or_dash(value: Option<Ticks>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

pub fn rows(jobs: &[JobInstance]) -> Vec<ProcessRow> {
    jobs.iter()
        .map(|job| ProcessRow {
            pid: job.pid(),
            arrival: job.job.arrival_time,
            burst: job.job.burst_time,
            first_start: or_dash(job.first_start_time),
            end: or_dash(job.end_time),
            waiting: or_dash(job.waiting_time()),
            response: or_dash(job.response_time()),
            turnaround: or_dash(job.turnaround_time()),
        })
        .collect()
}

pub fn table(jobs: &[JobInstance]) -> String {
    Table::new(rows(jobs)).to_string()
}

/// Spread of per-job outcomes over completed jobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionStats {
    pub mean_turnaround_time: f64,
    pub max_turnaround_time: f64,
    // Longest time any single job spent ready but not running
    pub max_waiting_time: f64,
}

pub fn completion_stats(jobs: &[JobInstance]) -> Option<CompletionStats> {
    if !jobs.iter().any(JobInstance::is_completed) {
        return None;
    }

    let turnarounds = || {
        jobs.iter()
            .filter_map(JobInstance::turnaround_time)
            .map(|t| t as f64)
    };

    let mean: Mean = turnarounds().collect();
    let max_turnaround: Max = turnarounds().collect();
    let max_waiting: Max = jobs
        .iter()
        .filter_map(JobInstance::waiting_time)
        .map(|t| t as f64)
        .collect();

    Some(CompletionStats {
        mean_turnaround_time: mean.estimate(),
        max_turnaround_time: max_turnaround.max(),
        max_waiting_time: max_waiting.max(),
    })
}
