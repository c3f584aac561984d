use super::{GanttChart, ProcessState, ProcessTable, Ticks};
use average::Mean;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub discipline: String,
    pub processes: Vec<ProcessState>,
    pub gantt: GanttChart,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl RunResult {
    pub fn new(discipline: &str, table: ProcessTable, gantt: GanttChart) -> Self {
        let processes = table.into_states();
        let average_waiting_time = mean(processes.iter().filter_map(ProcessState::waiting_time));
        let average_turnaround_time =
            mean(processes.iter().filter_map(ProcessState::turnaround_time));

        Self {
            discipline: discipline.to_owned(),
            processes,
            gantt,
            average_waiting_time,
            average_turnaround_time,
        }
    }

    pub fn average(&self, metric: Metric) -> f64 {
        match metric {
            Metric::WaitingTime => self.average_waiting_time,
            Metric::TurnaroundTime => self.average_turnaround_time,
        }
    }

    /// Processes in the order they finished.
    pub fn completion_order(&self) -> Vec<&ProcessState> {
        let mut order: Vec<_> = self.processes.iter().collect();
        order.sort_by_key(|state| state.completion_time());
        order
    }

    /// Fraction of the makespan the processor spent running processes.
    pub fn cpu_utilization(&self) -> f64 {
        let makespan = self.gantt.makespan();
        if makespan == 0 {
            return 0.0;
        }
        (makespan - self.gantt.idle_time()) as f64 / makespan as f64
    }
}

// An empty workload averages to zero.
fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    let mean: Mean = values.map(|value| value as f64).collect();
    if mean.is_empty() {
        0.0
    } else {
        mean.mean()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    WaitingTime,
    TurnaroundTime,
}

/// Every discipline run against the same workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub results: Vec<RunResult>,
    pub best_waiting: usize,
    pub best_turnaround: usize,
}

impl Comparison {
    pub fn new(results: Vec<RunResult>) -> Self {
        let best_waiting = best_index(&results, Metric::WaitingTime);
        let best_turnaround = best_index(&results, Metric::TurnaroundTime);

        Self {
            results,
            best_waiting,
            best_turnaround,
        }
    }

    pub fn best(&self, metric: Metric) -> &RunResult {
        match metric {
            Metric::WaitingTime => &self.results[self.best_waiting],
            Metric::TurnaroundTime => &self.results[self.best_turnaround],
        }
    }

    /// Results ordered from best to worst; ties keep run order.
    pub fn ranking(&self, metric: Metric) -> Vec<&RunResult> {
        let mut ranking: Vec<_> = self.results.iter().collect();
        ranking.sort_by(|a, b| a.average(metric).total_cmp(&b.average(metric)));
        ranking
    }
}

fn best_index(results: &[RunResult], metric: Metric) -> usize {
    results
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.average(metric).total_cmp(&b.average(metric)))
        .map_or(0, |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Process;

    fn finished(discipline: &str, completions: &[(Process, Ticks)]) -> RunResult {
        let processes: Vec<_> = completions.iter().map(|(p, _)| p.clone()).collect();
        let mut table = ProcessTable::new(&processes);
        for (index, (_, completion)) in completions.iter().enumerate() {
            table.get_mut(index).complete(*completion);
        }
        RunResult::new(discipline, table, GanttChart::new())
    }

    #[test]
    fn averages_over_all_processes() {
        let result = finished(
            "FCFS",
            &[
                (Process::new(1, 0, 8), 8),
                (Process::new(2, 1, 4), 12),
                (Process::new(3, 2, 9), 21),
                (Process::new(4, 3, 5), 26),
            ],
        );
        // Waiting: 0, 7, 10, 18. Turnaround: 8, 11, 19, 23.
        assert!((result.average_waiting_time - 8.75).abs() < 1e-9);
        assert!((result.average_turnaround_time - 15.25).abs() < 1e-9);
    }

    #[test]
    fn empty_table_averages_to_zero() {
        let result = RunResult::new("FCFS", ProcessTable::new(&[]), GanttChart::new());
        assert_eq!(result.average_waiting_time, 0.0);
        assert_eq!(result.average_turnaround_time, 0.0);
        assert_eq!(result.cpu_utilization(), 0.0);
        assert!(!result.average_waiting_time.is_nan());
    }

    #[test]
    fn mean_of_no_samples_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
        assert_eq!(mean([4, 6].into_iter()), 5.0);
    }

    #[test]
    fn ranking_keeps_run_order_on_ties() {
        let slow_start = finished("A", &[(Process::new(1, 0, 2), 6), (Process::new(2, 0, 2), 6)]);
        let balanced = finished("B", &[(Process::new(1, 0, 2), 2), (Process::new(2, 0, 2), 9)]);
        let tied = finished("C", &[(Process::new(1, 0, 2), 2), (Process::new(2, 0, 2), 9)]);

        let comparison = Comparison::new(vec![slow_start, balanced, tied]);
        // A: waiting 4.0, turnaround 6.0. B and C: waiting 3.5, turnaround 5.5.
        assert_eq!(comparison.best(Metric::WaitingTime).discipline, "B");
        assert_eq!(comparison.best(Metric::TurnaroundTime).discipline, "B");

        let ranking: Vec<_> = comparison
            .ranking(Metric::WaitingTime)
            .iter()
            .map(|result| result.discipline.as_str())
            .collect();
        assert_eq!(ranking, vec!["B", "C", "A"]);
    }
}
