use super::{non_preemptive, GanttChart, ProcessTable, Scheduler};

/// Non-preemptive shortest job first.
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "SJF";

    fn schedule(&self, table: &mut ProcessTable) -> GanttChart {
        non_preemptive::run_to_completion(table, |state| {
            (state.process().burst_time(), state.id())
        })
    }
}
