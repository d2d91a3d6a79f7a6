pub mod driver;
pub mod job;
pub mod workload;

pub use driver::Sim;
pub use job::{Job, JobInstance, Pid};
pub use workload::bernoulli_jobs;
