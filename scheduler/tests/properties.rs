use cpu_scheduling_simulator::scheduler::{
    compare_all, run_discipline, Discipline, InputError, Process, RunResult, SchedulerError, Ticks,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_workload(rng: &mut StdRng) -> Vec<Process> {
    let count = rng.random_range(1..=12);
    (1..=count)
        .map(|pid| {
            Process::with_priority(
                pid,
                rng.random_range(0..30),
                rng.random_range(1..=15),
                rng.random_range(-3..=5),
            )
        })
        .collect()
}

fn check_run(result: &RunResult, processes: &[Process]) {
    let intervals = result.gantt.intervals();

    for pair in intervals.windows(2) {
        assert!(pair[0].start <= pair[1].start, "{}: unsorted chart", result.discipline);
        assert!(pair[0].end <= pair[1].start, "{}: overlapping chart", result.discipline);
    }
    for interval in intervals {
        assert!(interval.end > interval.start);
    }

    assert_eq!(result.processes.len(), processes.len());
    for (state, process) in result.processes.iter().zip(processes) {
        assert_eq!(state.process(), process);
        assert_eq!(result.gantt.service_time(process.id()), process.burst_time());

        let metrics = state.metrics().expect("every process completes");
        assert_eq!(metrics.turnaround_time, metrics.completion_time - process.arrival_time());
        assert_eq!(metrics.waiting_time, metrics.turnaround_time - process.burst_time());
        assert!(metrics.waiting_time >= 0);
        assert!(metrics.completion_time >= process.arrival_time() + process.burst_time());

        // Nothing runs before it arrives, and the last slice ends at completion
        let slices: Vec<_> = intervals.iter().filter(|i| i.pid == process.id()).collect();
        assert!(slices.iter().all(|i| i.start >= process.arrival_time()));
        assert_eq!(slices.last().map(|i| i.end), Some(metrics.completion_time));
    }

    let busy: Ticks = processes.iter().map(Process::burst_time).sum();
    assert_eq!(result.gantt.makespan() - result.gantt.idle_time(), busy);
}

#[test]
fn every_discipline_conserves_burst_time() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let processes = random_workload(&mut rng);
        let quantum = rng.random_range(1..=6);
        for discipline in Discipline::ALL {
            let result = run_discipline(discipline, &processes, Some(quantum)).unwrap();
            check_run(&result, &processes);
        }
    }
}

#[test]
fn non_preemptive_disciplines_emit_one_interval_per_process() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let processes = random_workload(&mut rng);
        for discipline in [Discipline::Fcfs, Discipline::Sjf, Discipline::Priority] {
            let result = run_discipline(discipline, &processes, None).unwrap();
            assert_eq!(result.gantt.len(), processes.len());
        }
    }
}

#[test]
fn round_robin_slices_never_exceed_quantum() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let processes = random_workload(&mut rng);
        let quantum = rng.random_range(1..=4);
        let result = run_discipline(Discipline::RoundRobin, &processes, Some(quantum)).unwrap();
        assert!(result.gantt.intervals().iter().all(|i| i.duration() <= quantum));
    }
}

#[test]
fn huge_quantum_round_robin_matches_fcfs_on_distinct_arrivals() {
    let processes: Vec<_> = (1..=6)
        .map(|pid| Process::new(pid, i64::from(pid) * 4, 3 + i64::from(pid % 3)))
        .collect();

    let fcfs = run_discipline(Discipline::Fcfs, &processes, None).unwrap();
    let round_robin = run_discipline(Discipline::RoundRobin, &processes, Some(1_000)).unwrap();
    assert_eq!(fcfs.gantt, round_robin.gantt);
    assert_eq!(fcfs.processes, round_robin.processes);
}

#[test]
fn comparison_is_repeatable() {
    let mut rng = StdRng::seed_from_u64(99);
    let processes = random_workload(&mut rng);
    let first = compare_all(&processes, 2).unwrap();
    let second = compare_all(&processes, 2).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.results.len(), Discipline::ALL.len());
}

#[test]
fn rejects_bad_input_without_scheduling() {
    assert_eq!(
        compare_all(&[], 3),
        Err(SchedulerError::InvalidInput(InputError::EmptyWorkload))
    );
    assert_eq!(
        compare_all(&[Process::new(1, 0, 4)], 0),
        Err(SchedulerError::InvalidParameter { quantum: Some(0) })
    );
    assert_eq!(
        run_discipline(Discipline::Fcfs, &[Process::new(1, 0, 4), Process::new(1, 1, 2)], None),
        Err(SchedulerError::InvalidInput(InputError::DuplicatePid(1)))
    );
}
