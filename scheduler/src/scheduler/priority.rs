use super::{non_preemptive, GanttChart, ProcessTable, Scheduler};

/// Non-preemptive static priority; lower values win.
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority";

    fn schedule(&self, table: &mut ProcessTable) -> GanttChart {
        non_preemptive::run_to_completion(table, |state| {
            (state.process().priority(), state.id())
        })
    }
}
