use super::{GanttChart, ProcessStatus, ProcessTable, Scheduler, SchedulerError, Ticks};
use log::{debug, trace};
use std::collections::VecDeque;

pub struct RoundRobinScheduler {
    time_quantum: Ticks,
}

impl RoundRobinScheduler {
    pub const DEFAULT_TIME_QUANTUM: Ticks = 3;

    pub fn new(time_quantum: Ticks) -> Result<Self, SchedulerError> {
        if time_quantum <= 0 {
            return Err(SchedulerError::InvalidParameter {
                quantum: Some(time_quantum),
            });
        }
        Ok(Self { time_quantum })
    }

    pub fn time_quantum(&self) -> Ticks {
        self.time_quantum
    }

    /// Appends every process that has arrived by `now` and was never queued, in table order.
    fn admit_arrivals(table: &mut ProcessTable, ready: &mut VecDeque<usize>, now: Ticks) {
        for index in 0..table.len() {
            let state = table.get(index);
            if state.status() == ProcessStatus::New
                && state.has_arrived(now)
                && state.remaining_time() > 0
            {
                trace!("P{} joins the ready queue at {now}", state.id());
                table.get_mut(index).admit();
                ready.push_back(index);
            }
        }
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self {
            time_quantum: Self::DEFAULT_TIME_QUANTUM,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn schedule(&self, table: &mut ProcessTable) -> GanttChart {
        let mut gantt = GanttChart::new();
        let mut ready = VecDeque::with_capacity(table.len());
        let mut current_time = 0;

        while !table.all_completed() {
            Self::admit_arrivals(table, &mut ready, current_time);

            let Some(index) = ready.pop_front() else {
                match table.next_arrival(current_time) {
                    Some(arrival) => {
                        debug!("cpu idle from {current_time} to {arrival}");
                        current_time = arrival;
                        continue;
                    }
                    None => break,
                }
            };

            let state = table.get_mut(index);
            let start = current_time;
            current_time += state.execute(self.time_quantum);
            let pid = state.id();
            debug!("dispatch P{pid} at {start} until {current_time}");
            gantt.push(pid, start, current_time);

            // Arrivals during the slice queue ahead of the preempted process
            Self::admit_arrivals(table, &mut ready, current_time);

            let state = table.get_mut(index);
            if state.remaining_time() > 0 {
                ready.push_back(index);
            } else {
                state.complete(current_time);
            }
        }

        gantt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{GanttInterval, Process};

    fn intervals(result: &[GanttInterval]) -> Vec<(u32, Ticks, Ticks)> {
        result.iter().map(|i| (i.pid, i.start, i.end)).collect()
    }

    #[test]
    fn rejects_non_positive_quantum() {
        assert_eq!(
            RoundRobinScheduler::new(0).err(),
            Some(SchedulerError::InvalidParameter { quantum: Some(0) })
        );
        assert!(RoundRobinScheduler::new(-3).is_err());
        assert_eq!(RoundRobinScheduler::new(1).unwrap().time_quantum(), 1);
    }

    #[test]
    fn rotates_simultaneous_arrivals() {
        let result = RoundRobinScheduler::new(3)
            .unwrap()
            .run(&[
                Process::new(1, 0, 10),
                Process::new(2, 0, 5),
                Process::new(3, 0, 8),
            ])
            .unwrap();

        assert_eq!(
            intervals(result.gantt.intervals()),
            vec![
                (1, 0, 3),
                (2, 3, 6),
                (3, 6, 9),
                (1, 9, 12),
                (2, 12, 14),
                (3, 14, 17),
                (1, 17, 20),
                (3, 20, 22),
                (1, 22, 23),
            ]
        );
        assert_eq!(result.gantt.makespan(), 23);

        let completions: Vec<_> = result
            .processes
            .iter()
            .map(|state| state.completion_time().unwrap())
            .collect();
        assert_eq!(completions, vec![23, 14, 22]);
    }

    #[test]
    fn arrivals_during_slice_queue_before_preempted_process() {
        // P2 arrives while P1 runs its first slice, so it must run before P1 resumes
        let result = RoundRobinScheduler::new(2)
            .unwrap()
            .run(&[Process::new(1, 0, 4), Process::new(2, 1, 2)])
            .unwrap();

        assert_eq!(
            intervals(result.gantt.intervals()),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6)]
        );
    }

    #[test]
    fn arrival_at_slice_end_queues_first() {
        let result = RoundRobinScheduler::new(2)
            .unwrap()
            .run(&[Process::new(1, 0, 4), Process::new(2, 2, 1)])
            .unwrap();

        assert_eq!(
            intervals(result.gantt.intervals()),
            vec![(1, 0, 2), (2, 2, 3), (1, 3, 5)]
        );
    }

    #[test]
    fn sample_workload_with_staggered_arrivals() {
        let result = RoundRobinScheduler::new(3)
            .unwrap()
            .run(&[
                Process::new(1, 0, 8),
                Process::new(2, 1, 4),
                Process::new(3, 2, 9),
                Process::new(4, 3, 5),
            ])
            .unwrap();

        assert_eq!(
            intervals(result.gantt.intervals()),
            vec![
                (1, 0, 3),
                (2, 3, 6),
                (3, 6, 9),
                (4, 9, 12),
                (1, 12, 15),
                (2, 15, 16),
                (3, 16, 19),
                (4, 19, 21),
                (1, 21, 23),
                (3, 23, 26),
            ]
        );
    }

    #[test]
    fn idles_until_first_arrival() {
        let result = RoundRobinScheduler::default()
            .run(&[Process::new(1, 3, 2)])
            .unwrap();

        assert_eq!(intervals(result.gantt.intervals()), vec![(1, 3, 5)]);
        assert_eq!(result.processes[0].waiting_time(), Some(0));
    }
}
