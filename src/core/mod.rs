pub mod driver;
pub mod event;
pub mod metrics;
pub mod observer;
pub mod state;

pub use driver::{RrCore, Slice};
pub use event::SimEvent;
pub use metrics::{Metrics, Summary};
pub use state::{JobIdx, JobState, SimState, Ticks};
