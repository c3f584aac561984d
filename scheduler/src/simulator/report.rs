use crate::scheduler::{Comparison, Metric, Process, RunResult};
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

fn cell(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

pub fn workload(processes: &[Process]) -> String {
    let mut out = String::new();
    for process in processes {
        let _ = writeln!(
            out,
            "P{}: AT={}, BT={}, Priority={}",
            process.id(),
            process.arrival_time(),
            process.burst_time(),
            process.priority()
        );
    }
    out
}

pub fn run(result: &RunResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", result.discipline.to_uppercase());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    let _ = writeln!(out, "PID\tArrival\tBurst\tPriority\tCompletion\tWaiting\tTurnaround");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for state in &result.processes {
        let process = state.process();
        let _ = writeln!(
            out,
            "P{}\t{}\t{}\t{}\t\t{}\t\t{}\t{}",
            process.id(),
            process.arrival_time(),
            process.burst_time(),
            process.priority(),
            cell(state.completion_time()),
            cell(state.waiting_time()),
            cell(state.turnaround_time())
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Average Waiting Time: {:.2}", result.average_waiting_time);
    let _ = writeln!(out, "Average Turnaround Time: {:.2}", result.average_turnaround_time);
    let _ = writeln!(out, "CPU Utilization: {:.1}%", result.cpu_utilization() * 100.0);

    let _ = writeln!(out, "\nGANTT CHART:");
    let _ = writeln!(out, "{}", "-".repeat(50));
    let _ = writeln!(out, "{}", result.gantt);
    out
}

pub fn comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    for result in &comparison.results {
        let _ = writeln!(out, "{}", run(result));
    }

    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "SUMMARY COMPARISON");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{:<20}{:<20}{:<20}", "Algorithm", "Avg Waiting Time", "Avg Turnaround Time");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for result in &comparison.results {
        let _ = writeln!(
            out,
            "{:<20}{:<20.2}{:<20.2}",
            result.discipline, result.average_waiting_time, result.average_turnaround_time
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let best_waiting = comparison.best(Metric::WaitingTime);
    let best_turnaround = comparison.best(Metric::TurnaroundTime);
    let _ = writeln!(
        out,
        "Best for Waiting Time: {} (Avg WT: {:.2})",
        best_waiting.discipline, best_waiting.average_waiting_time
    );
    let _ = writeln!(
        out,
        "Best for Turnaround Time: {} (Avg TAT: {:.2})",
        best_turnaround.discipline, best_turnaround.average_turnaround_time
    );
    let _ = writeln!(out, "Ranking by Waiting Time: {}", ranking(comparison, Metric::WaitingTime));
    let _ = writeln!(
        out,
        "Ranking by Turnaround Time: {}",
        ranking(comparison, Metric::TurnaroundTime)
    );
    out
}

/// Disciplines from best to worst, e.g. `SJF < Priority < FCFS`.
fn ranking(comparison: &Comparison, metric: Metric) -> String {
    comparison
        .ranking(metric)
        .iter()
        .map(|result| result.discipline.as_str())
        .collect::<Vec<_>>()
        .join(" < ")
}
