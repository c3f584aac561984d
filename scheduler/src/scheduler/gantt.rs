use super::{Pid, Ticks};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttInterval {
    pub pid: Pid,
    pub start: Ticks,
    pub end: Ticks,
}

impl GanttInterval {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Execution timeline of a single processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttChart {
    intervals: Vec<GanttInterval>,
}

impl GanttChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, pid: Pid, start: Ticks, end: Ticks) {
        debug_assert!(end > start, "empty interval for P{pid} at {start}");
        if let Some(last) = self.intervals.last() {
            debug_assert!(
                start >= last.end,
                "P{pid} starts at {start} while P{} runs until {}",
                last.pid,
                last.end
            );
        }

        self.intervals.push(GanttInterval { pid, start, end });
    }

    pub fn intervals(&self) -> &[GanttInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total CPU time handed to `pid`.
    pub fn service_time(&self, pid: Pid) -> Ticks {
        self.intervals
            .iter()
            .filter(|interval| interval.pid == pid)
            .map(GanttInterval::duration)
            .sum()
    }

    /// Time at which the last interval ends.
    pub fn makespan(&self) -> Ticks {
        self.intervals.last().map_or(0, |interval| interval.end)
    }

    pub fn idle_time(&self) -> Ticks {
        let busy: Ticks = self.intervals.iter().map(GanttInterval::duration).sum();
        self.makespan() - busy
    }

    /// Number of times the processor switched from one process to another.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|pair| pair[0].pid != pair[1].pid)
            .count()
    }

    /// Renders a label row above a time axis, e.g. ` P1  P2 ` over `0---8---12`.
    pub fn render(&self) -> String {
        let mut labels = String::new();
        let mut axis = String::from("0");
        let mut clock = 0;

        for interval in &self.intervals {
            if interval.start > clock {
                push_segment(&mut labels, &mut axis, "idle", interval.start);
            }
            push_segment(&mut labels, &mut axis, &format!("P{}", interval.pid), interval.end);
            clock = interval.end;
        }

        format!("{}\n{}", labels.trim_end(), axis)
    }
}

fn push_segment(labels: &mut String, axis: &mut String, label: &str, end: Ticks) {
    let mark = format!("---{end}");
    let width = (label.len() + 2).max(mark.len());
    // Labels are padded so that every segment lines up with its axis mark.
    let _ = write!(labels, " {:<width$}", label, width = width - 1);
    let _ = write!(axis, "{:->width$}", end, width = width);
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
