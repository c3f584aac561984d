use super::{error::InputError, Pid, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    id: Pid,
    arrival_time: Ticks,
    burst_time: Ticks,
    #[serde(default)]
    priority: i32,
}

impl Process {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(id: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Process::with_priority(id, arrival_time, burst_time, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(id: Pid, arrival_time: Ticks, burst_time: Ticks, priority: i32) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
        }
    }

    pub fn id(&self) -> Pid {
        self.id
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    /// Lower values are scheduled first.
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// Checks a workload before any discipline touches it.
pub fn validate(processes: &[Process]) -> Result<(), InputError> {
    if processes.is_empty() {
        return Err(InputError::EmptyWorkload);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        if process.id == 0 {
            return Err(InputError::NonPositivePid(process.id));
        }
        if !seen.insert(process.id) {
            return Err(InputError::DuplicatePid(process.id));
        }
        if process.arrival_time < 0 {
            return Err(InputError::NegativeArrival {
                pid: process.id,
                arrival_time: process.arrival_time,
            });
        }
        if process.burst_time <= 0 {
            return Err(InputError::NonPositiveBurst {
                pid: process.id,
                burst_time: process.burst_time,
            });
        }
    }

    // The clock never passes the last arrival plus all of the work
    let latest_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |end, p| end.checked_add(p.burst_time))
        .ok_or(InputError::TimelineOverflow)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// Not yet admitted to a ready queue.
    New,
    Ready,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    #[serde(flatten)]
    process: Process,
    status: ProcessStatus,
    remaining_time: Ticks,
    metrics: Option<ProcessMetrics>,
}

impl ProcessState {
    pub fn new(process: Process) -> Self {
        Self {
            remaining_time: process.burst_time,
            process,
            status: ProcessStatus::New,
            metrics: None,
        }
    }

    pub fn process(&self) -> &Process {
        &self.process
    }

    pub fn id(&self) -> Pid {
        self.process.id
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn metrics(&self) -> Option<ProcessMetrics> {
        self.metrics
    }

    pub fn completion_time(&self) -> Option<Ticks> {
        self.metrics.map(|metrics| metrics.completion_time)
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.metrics.map(|metrics| metrics.turnaround_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.metrics.map(|metrics| metrics.waiting_time)
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProcessStatus::Completed
    }

    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.process.arrival_time <= now
    }

    pub(super) fn admit(&mut self) {
        debug_assert_eq!(self.status, ProcessStatus::New, "P{} admitted twice", self.id());
        self.status = ProcessStatus::Ready;
    }

    /// Runs the process for at most `slice` ticks and returns how long it actually ran.
    pub(super) fn execute(&mut self, slice: Ticks) -> Ticks {
        let executed = slice.min(self.remaining_time);
        self.remaining_time -= executed;
        executed
    }

    pub(super) fn complete(&mut self, completion_time: Ticks) {
        debug_assert!(
            !self.is_completed(),
            "P{} must not complete twice",
            self.id()
        );

        let turnaround_time = completion_time - self.process.arrival_time;
        self.remaining_time = 0;
        self.status = ProcessStatus::Completed;
        self.metrics = Some(ProcessMetrics {
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - self.process.burst_time,
        });
    }
}

/// The working set of one discipline run, kept in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTable {
    states: Vec<ProcessState>,
}

impl ProcessTable {
    pub fn new(processes: &[Process]) -> Self {
        Self {
            states: processes.iter().cloned().map(ProcessState::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[ProcessState] {
        &self.states
    }

    pub fn get(&self, index: usize) -> &ProcessState {
        &self.states[index]
    }

    pub(super) fn get_mut(&mut self, index: usize) -> &mut ProcessState {
        &mut self.states[index]
    }

    pub fn all_completed(&self) -> bool {
        self.states.iter().all(ProcessState::is_completed)
    }

    /// Indices of processes that have arrived by `now` and still need the CPU.
    pub fn arrived_pending(&self, now: Ticks) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(move |(_, state)| state.has_arrived(now) && !state.is_completed())
            .map(|(index, _)| index)
    }

    /// Earliest arrival strictly after `now` among unfinished processes.
    pub fn next_arrival(&self, now: Ticks) -> Option<Ticks> {
        self.states
            .iter()
            .filter(|state| !state.is_completed() && !state.has_arrived(now))
            .map(|state| state.process.arrival_time)
            .min()
    }

    pub fn into_states(self) -> Vec<ProcessState> {
        self.states
    }
}
