use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::produce::generator::CircleGenerator;

mod network;
mod produce;
mod scenario;
mod vehicles;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: String,
}

fn main() -> ExitCode {
    let config_file: String = CliArgs::parse().config;
    let start = std::time::Instant::now();
    let generator = match CircleGenerator::new(&config_file) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = generator.initialize_logger() {
        eprintln!("Error while configuring the logger: {}", e);
        return ExitCode::FAILURE;
    }

    match generator.generate() {
        Ok(summary) => {
            println!("Network compiled to {}", summary.context.net_path().display());
            println!(
                "Run configuration written to {}",
                summary.scenario.run_config.display()
            );
            println!(
                "Placed {} vehicles of {} types in {}",
                summary.placements.len(),
                summary.vehicle_types.len(),
                summary.route_file.display()
            );
            for (output, file) in &summary.scenario.manifest {
                println!("  {} -> {}", output.option_name(), file);
            }
            let elapsed = start.elapsed();
            info!("Scenario generation finished in {} ms.", elapsed.as_millis());
            println!("Scenario generation finished in {} ms.", elapsed.as_millis());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scenario generation failed: {}", e);
            eprintln!("Scenario generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
