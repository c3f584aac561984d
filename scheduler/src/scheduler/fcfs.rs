use super::{GanttChart, ProcessTable, Scheduler};
use log::debug;

pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    fn schedule(&self, table: &mut ProcessTable) -> GanttChart {
        let mut gantt = GanttChart::new();

        // Stable, so processes arriving together keep input order
        let mut order: Vec<usize> = (0..table.len()).collect();
        order.sort_by_key(|&index| table.get(index).process().arrival_time());

        let mut current_time = 0;
        for index in order {
            let state = table.get_mut(index);
            let arrival_time = state.process().arrival_time();
            if current_time < arrival_time {
                debug!("cpu idle from {current_time} to {arrival_time}");
                current_time = arrival_time;
            }

            let start = current_time;
            current_time += state.execute(state.remaining_time());
            state.complete(current_time);

            debug!("dispatch P{} at {start} until {current_time}", state.id());
            gantt.push(state.id(), start, current_time);
        }

        gantt
    }
}
