pub mod core;
pub mod loader;
pub mod report;
pub mod sim;

pub use crate::core::{SimEvent, Summary, Ticks};
pub use loader::{LoadError, load_processes, parse_processes, parse_quantum};
pub use sim::{Job, JobInstance, Pid, Sim};
