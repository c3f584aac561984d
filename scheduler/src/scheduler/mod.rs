mod error;
mod fcfs;
mod gantt;
mod metrics;
mod non_preemptive;
mod priority;
mod process;
mod round_robin;
mod shortest_job;

use log::info;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub use error::{InputError, SchedulerError};
pub use fcfs::FcfsScheduler;
pub use gantt::{GanttChart, GanttInterval};
pub use metrics::{Comparison, Metric, RunResult};
pub use priority::PriorityScheduler;
pub use process::{validate, Process, ProcessMetrics, ProcessState, ProcessStatus, ProcessTable};
pub use round_robin::RoundRobinScheduler;
pub use shortest_job::SjfScheduler;

pub type Pid = u32;
pub type Ticks = i64;

pub trait Scheduler {
    const NAME: &'static str;

    /// Drives every process in `table` to completion and returns the timeline.
    fn schedule(&self, table: &mut ProcessTable) -> GanttChart;

    fn run(&self, processes: &[Process]) -> Result<RunResult, SchedulerError> {
        validate(processes)?;

        let mut table = ProcessTable::new(processes);
        let gantt = self.schedule(&mut table);
        let result = RunResult::new(Self::NAME, table, gantt);

        info!(
            "{} finished {} processes: avg waiting {:.2}, avg turnaround {:.2}",
            Self::NAME,
            result.processes.len(),
            result.average_waiting_time,
            result.average_turnaround_time
        );
        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
}

impl Discipline {
    pub const ALL: [Discipline; 4] = [
        Discipline::Fcfs,
        Discipline::Sjf,
        Discipline::Priority,
        Discipline::RoundRobin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Discipline::Fcfs => FcfsScheduler::NAME,
            Discipline::Sjf => SjfScheduler::NAME,
            Discipline::Priority => PriorityScheduler::NAME,
            Discipline::RoundRobin => RoundRobinScheduler::NAME,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDiscipline(pub String);

impl fmt::Display for UnknownDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown discipline \"{}\" (expected FCFS, SJF, Priority or RoundRobin)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDiscipline {}

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "fcfs" | "firstcomefirstserved" | "firstcomefirstserve" => Ok(Discipline::Fcfs),
            "sjf" | "shortestjobfirst" => Ok(Discipline::Sjf),
            "priority" => Ok(Discipline::Priority),
            "rr" | "roundrobin" => Ok(Discipline::RoundRobin),
            _ => Err(UnknownDiscipline(name.to_owned())),
        }
    }
}

/// Runs one discipline on its own copy of `processes`.
///
/// `time_quantum` is required for Round Robin and ignored otherwise.
pub fn run_discipline(
    discipline: Discipline,
    processes: &[Process],
    time_quantum: Option<Ticks>,
) -> Result<RunResult, SchedulerError> {
    match discipline {
        Discipline::Fcfs => FcfsScheduler.run(processes),
        Discipline::Sjf => SjfScheduler.run(processes),
        Discipline::Priority => PriorityScheduler.run(processes),
        Discipline::RoundRobin => {
            let quantum = time_quantum.ok_or(SchedulerError::InvalidParameter { quantum: None })?;
            RoundRobinScheduler::new(quantum)?.run(processes)
        }
    }
}

/// Runs every discipline against the same workload and ranks them.
pub fn compare_all(processes: &[Process], time_quantum: Ticks) -> Result<Comparison, SchedulerError> {
    // Reject the quantum up front so no discipline runs on a doomed comparison
    let round_robin = RoundRobinScheduler::new(time_quantum)?;
    validate(processes)?;

    let results = vec![
        FcfsScheduler.run(processes)?,
        SjfScheduler.run(processes)?,
        PriorityScheduler.run(processes)?,
        round_robin.run(processes)?,
    ];

    let comparison = Comparison::new(results);
    info!(
        "best waiting time: {}, best turnaround time: {}",
        comparison.best(Metric::WaitingTime).discipline,
        comparison.best(Metric::TurnaroundTime).discipline
    );
    Ok(comparison)
}
