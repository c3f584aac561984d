use anyhow::{Context, Result};
use cpu_scheduling_simulator::{
    scheduler::{compare_all, run_discipline},
    simulator::{report, workload, OutputMode, ResultViewer, SimulatorConfig, USAGE},
};
use env_logger::Env;
use std::env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = SimulatorConfig::from_args(env::args().skip(1))?;
    if config.show_help {
        println!("{USAGE}");
        return Ok(());
    }

    let processes = workload::load(&config.workload)?;

    if let Some(discipline) = config.discipline {
        let result = run_discipline(discipline, &processes, Some(config.time_quantum))
            .with_context(|| format!("{discipline} scheduling failed"))?;

        match config.output {
            OutputMode::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            // The viewer browses a full comparison; a single run is printed instead
            OutputMode::Report | OutputMode::Tui => {
                print!("{}", report::workload(&processes));
                println!("\n{}", report::run(&result));
            }
        }
        return Ok(());
    }

    let comparison =
        compare_all(&processes, config.time_quantum).context("scheduling comparison failed")?;

    match config.output {
        OutputMode::Report => {
            print!("{}", report::workload(&processes));
            println!("Time Quantum: {}\n", config.time_quantum);
            print!("{}", report::comparison(&comparison));
        }
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputMode::Tui => {
            let mut viewer = ResultViewer::new(comparison)?;
            while viewer.run()? {}
        }
    }

    Ok(())
}
