//! Everything around the scheduling engine: command-line configuration,
//! workload acquisition, text/JSON reports and the terminal result viewer.

pub mod config;
mod display;
pub mod report;
mod runner;
pub mod workload;

pub use config::{OutputMode, SimulatorConfig, WorkloadSource, USAGE};
pub use runner::{ResultViewer, ViewerEvent};
pub use workload::SampleSet;
