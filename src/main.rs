use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use rr_model::{LoadError, Sim, load_processes, parse_quantum, report};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Round-Robin CPU scheduling simulator
#[derive(Parser)]
#[command(name = "rr_model", about, long_about = None)]
struct Cli {
    /// Process table: a count N followed by N `pid arrival_time burst_time` triples
    input: PathBuf,

    /// Time slice length in ticks; 0 performs no scheduling
    quantum: String,

    /// Print every scheduling event as it happens
    #[arg(long)]
    events: bool,

    /// Print a per-process table after the averages
    #[arg(long)]
    table: bool,
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
}

fn run(cli: &Cli) -> Result<(), LoadError> {
    let jobs = load_processes(&cli.input)?;
    let quantum = parse_quantum(&cli.quantum)?;

    let mut sim = Sim::new(jobs, quantum);
    let summary = if cli.events {
        sim.run_with(|now, event| println!("t={now} {event:?}"))
    } else {
        sim.run()
    };

    if summary.count == 0 {
        tracing::warn!("process table is empty, reporting zero averages");
    }
    print!("{}", report::format_averages(&summary));

    if cli.table {
        println!("{}", report::table(sim.jobs()));
        if let Some(stats) = report::completion_stats(sim.jobs()) {
            println!(
                "Average turnaround time: {:.2}",
                stats.mean_turnaround_time
            );
            println!("Longest wait: {} ticks", stats.max_waiting_time);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("failed to initialise logging: {e:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "simulation aborted");
            eprintln!("{e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
