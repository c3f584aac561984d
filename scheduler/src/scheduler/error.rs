use super::{Pid, Ticks};
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    EmptyWorkload,
    NonPositivePid(Pid),
    DuplicatePid(Pid),
    NegativeArrival { pid: Pid, arrival_time: Ticks },
    NonPositiveBurst { pid: Pid, burst_time: Ticks },
    /// The latest arrival plus the total burst time does not fit in `Ticks`.
    TimelineOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    InvalidInput(InputError),
    /// The time quantum was missing or not positive.
    InvalidParameter { quantum: Option<Ticks> },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyWorkload => write!(f, "no processes were supplied"),
            InputError::NonPositivePid(pid) => {
                write!(f, "process id {pid} is not a positive integer")
            }
            InputError::DuplicatePid(pid) => write!(f, "process id {pid} appears more than once"),
            InputError::NegativeArrival { pid, arrival_time } => {
                write!(f, "P{pid} has a negative arrival time ({arrival_time})")
            }
            InputError::NonPositiveBurst { pid, burst_time } => {
                write!(f, "P{pid} has a non-positive burst time ({burst_time})")
            }
            InputError::TimelineOverflow => {
                write!(f, "the workload runs past the largest representable time")
            }
        }
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidInput(error) => write!(f, "invalid input: {error}"),
            SchedulerError::InvalidParameter { quantum: Some(quantum) } => {
                write!(f, "invalid parameter: time quantum must be positive, got {quantum}")
            }
            SchedulerError::InvalidParameter { quantum: None } => {
                write!(f, "invalid parameter: round robin requires a time quantum")
            }
        }
    }
}

impl Error for InputError {}

impl Error for SchedulerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SchedulerError::InvalidInput(error) => Some(error),
            SchedulerError::InvalidParameter { .. } => None,
        }
    }
}

impl From<InputError> for SchedulerError {
    fn from(error: InputError) -> Self {
        SchedulerError::InvalidInput(error)
    }
}
