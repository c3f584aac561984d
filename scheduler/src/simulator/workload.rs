use super::config::WorkloadSource;
use crate::scheduler::{Pid, Process};
use anyhow::{bail, Context, Result};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSet {
    /// Staggered arrivals with distinct bursts and priorities.
    Mixed,
    /// Everything arrives at time zero.
    Uniform,
}

impl SampleSet {
    pub fn processes(&self) -> Vec<Process> {
        match self {
            SampleSet::Mixed => vec![
                Process::with_priority(1, 0, 8, 3),
                Process::with_priority(2, 1, 4, 1),
                Process::with_priority(3, 2, 9, 4),
                Process::with_priority(4, 3, 5, 2),
            ],
            SampleSet::Uniform => vec![
                Process::with_priority(1, 0, 10, 3),
                Process::with_priority(2, 0, 5, 1),
                Process::with_priority(3, 0, 8, 2),
            ],
        }
    }
}

impl FromStr for SampleSet {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mixed" => Ok(SampleSet::Mixed),
            "uniform" => Ok(SampleSet::Uniform),
            _ => bail!("unknown sample set \"{name}\" (expected mixed or uniform)"),
        }
    }
}

pub fn load(source: &WorkloadSource) -> Result<Vec<Process>> {
    match source {
        WorkloadSource::Sample(sample) => Ok(sample.processes()),
        WorkloadSource::File(path) => from_file(path),
        WorkloadSource::Interactive => {
            let stdin = io::stdin();
            prompt(&mut stdin.lock(), &mut io::stdout())
        }
    }
}

pub fn from_file(path: &Path) -> Result<Vec<Process>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read workload {}", path.display()))?;
    from_json(&contents).with_context(|| format!("failed to parse workload {}", path.display()))
}

pub fn from_json(contents: &str) -> Result<Vec<Process>> {
    Ok(serde_json::from_str(contents)?)
}

/// Asks for the process count and then each process's arrival, burst and priority.
///
/// Processes are numbered from 1 in the order they are entered.
pub fn prompt<R, W>(input: &mut R, output: &mut W) -> Result<Vec<Process>>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Enter process details:")?;
    let count: usize = read_number(input, output, "Enter number of processes: ")?;

    let mut processes = Vec::with_capacity(count);
    for index in 1..=count {
        writeln!(output, "\nProcess {index}:")?;
        let arrival_time = read_number(input, output, "Enter arrival time: ")?;
        let burst_time = read_number(input, output, "Enter burst time: ")?;
        let priority = read_number(
            input,
            output,
            "Enter priority (lower number = higher priority): ",
        )?;

        let pid = Pid::try_from(index).context("too many processes")?;
        processes.push(Process::with_priority(pid, arrival_time, burst_time, priority));
    }

    Ok(processes)
}

fn read_number<T, R, W>(input: &mut R, output: &mut W, label: &str) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{label}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended before the workload was complete");
        }

        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "\"{}\" is not a valid number, try again.", line.trim())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_json_workloads() {
        let processes = from_json(
            r#"[
                {"id": 1, "arrival_time": 0, "burst_time": 8, "priority": 3},
                {"id": 2, "arrival_time": 1, "burst_time": 4}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            processes,
            vec![Process::with_priority(1, 0, 8, 3), Process::new(2, 1, 4)]
        );
        assert!(from_json(r#"[{"id": 1}]"#).is_err());
    }

    #[test]
    fn prompts_for_each_process() {
        let mut input = Cursor::new("2\n0\n5\n1\n3\nsoon\n2\n-4\n");
        let mut output = Vec::new();

        let processes = prompt(&mut input, &mut output).unwrap();
        assert_eq!(
            processes,
            vec![Process::with_priority(1, 0, 5, 1), Process::with_priority(2, 3, 2, -4)]
        );

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Process 2:"));
        assert!(transcript.contains("\"soon\" is not a valid number"));
    }

    #[test]
    fn prompt_fails_on_truncated_input() {
        let mut input = Cursor::new("3\n0\n");
        assert!(prompt(&mut input, &mut Vec::new()).is_err());
    }

    #[test]
    fn samples_are_valid_workloads() {
        for sample in [SampleSet::Mixed, SampleSet::Uniform] {
            assert!(crate::scheduler::validate(&sample.processes()).is_ok());
        }
        assert_eq!("MIXED".parse::<SampleSet>().unwrap(), SampleSet::Mixed);
    }
}
