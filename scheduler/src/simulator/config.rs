use super::workload::SampleSet;
use crate::scheduler::{Discipline, RoundRobinScheduler, Ticks};
use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: cpu-scheduling-simulator [OPTIONS]

Options:
  --quantum <N>            Round Robin time quantum (default 3)
  --sample <mixed|uniform> Use a built-in workload (default mixed)
  --workload <FILE>        Load processes from a JSON file
  --interactive            Enter processes at the prompt
  --discipline <NAME>      Run only FCFS, SJF, Priority or RoundRobin
  --report                 Print plain-text tables (default)
  --json                   Print results as JSON
  --tui                    Browse results in the terminal viewer
  -h, --help               Show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadSource {
    Sample(SampleSet),
    File(PathBuf),
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Report,
    Json,
    Tui,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub time_quantum: Ticks,
    pub workload: WorkloadSource,
    /// Runs every discipline when unset.
    pub discipline: Option<Discipline>,
    pub output: OutputMode,
    pub show_help: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            time_quantum: RoundRobinScheduler::DEFAULT_TIME_QUANTUM,
            workload: WorkloadSource::Sample(SampleSet::Mixed),
            discipline: None,
            output: OutputMode::Report,
            show_help: false,
        }
    }
}

impl SimulatorConfig {
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = SimulatorConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quantum" | "-q" => {
                    let value = expect_value(&mut args, &arg)?;
                    config.time_quantum = value
                        .parse()
                        .with_context(|| format!("invalid time quantum \"{value}\""))?;
                }
                "--sample" => {
                    let value = expect_value(&mut args, &arg)?;
                    config.workload = WorkloadSource::Sample(value.parse()?);
                }
                "--workload" | "-w" => {
                    let value = expect_value(&mut args, &arg)?;
                    config.workload = WorkloadSource::File(PathBuf::from(value));
                }
                "--interactive" | "-i" => config.workload = WorkloadSource::Interactive,
                "--discipline" | "-d" => {
                    let value = expect_value(&mut args, &arg)?;
                    config.discipline = Some(value.parse()?);
                }
                "--report" => config.output = OutputMode::Report,
                "--json" => config.output = OutputMode::Json,
                "--tui" => config.output = OutputMode::Tui,
                "--help" | "-h" => config.show_help = true,
                other => bail!("unrecognized argument \"{other}\"\n\n{USAGE}"),
            }
        }

        Ok(config)
    }
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("{flag} requires a value\n\n{USAGE}"))
}
