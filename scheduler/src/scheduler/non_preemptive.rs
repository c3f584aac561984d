use super::{GanttChart, ProcessState, ProcessTable};
use log::debug;

/// Repeatedly runs the arrived process with the smallest `key` until it finishes.
///
/// When nothing has arrived the clock jumps to the next arrival, which is
/// indistinguishable from ticking forward one unit at a time.
pub fn run_to_completion<K, F>(table: &mut ProcessTable, key: F) -> GanttChart
where
    K: Ord,
    F: Fn(&ProcessState) -> K,
{
    let mut gantt = GanttChart::new();
    let mut current_time = 0;

    while !table.all_completed() {
        let selected = table
            .arrived_pending(current_time)
            .min_by_key(|&index| key(table.get(index)));

        let index = match selected {
            Some(index) => index,
            None => match table.next_arrival(current_time) {
                Some(arrival) => {
                    debug!("cpu idle from {current_time} to {arrival}");
                    current_time = arrival;
                    continue;
                }
                None => break,
            },
        };

        let state = table.get_mut(index);
        let start = current_time;
        current_time += state.execute(state.remaining_time());
        state.complete(current_time);

        debug!("dispatch P{} at {start} until {current_time}", state.id());
        gantt.push(state.id(), start, current_time);
    }

    gantt
}
