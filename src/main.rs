use clap::Parser;

use rover_nav::config::Config;
use rover_nav::simulation::Simulation;
use rover_nav::statistics::NavigationSummary;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    status: rover_nav::RoverStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation: Option<&'a NavigationSummary>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let mut simulation = Simulation::from_config(&config);

    if !config.json {
        println!("Rover at ({}, {}) facing {}", config.x, config.y, config.heading);
        println!(
            "Obstacles: {} | Planner: {}",
            simulation.rover().obstacles().len(),
            simulation.planner_name()
        );
        println!();
    }

    if let Some(commands) = &config.commands {
        if let Err(e) = simulation.run_commands(commands) {
            eprintln!("Command batch failed: {}", e);
            std::process::exit(1);
        }
    }

    let summary = match config.target {
        Some(target) => match simulation.navigate(target) {
            Ok(summary) => Some(summary),
            Err(e) => {
                eprintln!("Navigation failed: {}", e);
                if !config.no_visualization && !config.json {
                    println!("{}", simulation.render(Some(target), config.area));
                }
                std::process::exit(1);
            }
        },
        None => None,
    };

    if config.json {
        let report = Report {
            status: simulation.status(),
            navigation: summary.as_ref(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if !config.no_visualization {
        println!("{}", simulation.render(config.target, config.area));
    }

    if let Some(summary) = &summary {
        println!("=== NAVIGATION ===");
        println!("{}", summary);
    }

    println!("=== STATUS ===");
    println!("{}", simulation.status());
}
