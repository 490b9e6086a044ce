// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scenario runner for the interrupt controller and multiplier models

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use rvic::core::config::Config;
use rvic::core::device::{ClockedDevice, Direction};
use rvic::core::error::Result;
use rvic::core::scenario::{self, Scenario, ScenarioReport};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Vectored interrupt controller simulator
#[derive(Parser)]
#[command(name = "rvic")]
#[command(about = "Cycle-accurate interrupt controller simulator", long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults to $RVIC_CONFIG)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one or more scenario files
    Run {
        /// Scenario files (.toml)
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Write every edge's port values to this JSON file
        #[arg(short = 's', long)]
        sample_log: Option<PathBuf>,

        /// Stop each scenario at its first failing step
        #[arg(long)]
        stop_on_failure: bool,
    },
    /// List the ports of a device
    Signals {
        /// Device name (interrupt_controller, multiplier)
        device: String,
    },
}

fn main() -> ExitCode {
    // Optional .env for local RVIC_* / RUST_LOG settings
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match execute(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<bool> {
    let mut config = Config::resolve(args.config.as_deref())?;

    match args.command {
        Command::Run {
            scenarios,
            sample_log,
            stop_on_failure,
        } => {
            if sample_log.is_some() {
                config.sample_log = sample_log;
            }
            config.stop_on_failure |= stop_on_failure;
            run_scenarios(&scenarios, &config)
        }
        Command::Signals { device } => {
            print_signals(&device)?;
            Ok(true)
        }
    }
}

fn run_scenarios(paths: &[PathBuf], config: &Config) -> Result<bool> {
    info!("rvic v{}", env!("CARGO_PKG_VERSION"));

    let mut reports: Vec<ScenarioReport> = Vec::with_capacity(paths.len());

    for path in paths {
        let scenario = Scenario::load(path)?;
        let report = scenario.run(config)?;

        let passed = report.checks.iter().filter(|c| c.passed).count();
        if report.passed() {
            info!(
                "PASS {} ({} checks, {} cycles)",
                report.name,
                passed,
                report.cycles
            );
        } else {
            for failure in report.failures() {
                warn!(
                    "  {} at cycle {}: expected {}, got {} ({})",
                    failure.signal, failure.cycle, failure.expected, failure.actual, failure.message
                );
            }
            error!(
                "FAIL {} ({}/{} checks passed)",
                report.name,
                passed,
                report.checks.len()
            );
        }

        reports.push(report);
    }

    if let Some(path) = &config.sample_log {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &reports)?;
        info!("Sample log written to {}", path.display());
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    info!(
        "{} scenario(s): {} passed, {} failed",
        reports.len(),
        reports.len() - failed,
        failed
    );

    Ok(failed == 0)
}

fn print_signals(device: &str) -> Result<()> {
    let device = scenario::create_device(device)?;

    println!("{}", device.name());
    for spec in device.signals() {
        println!(
            "  {:<18} {:<6} {:>2}",
            spec.name,
            match spec.direction {
                Direction::Input => "in",
                Direction::Output => "out",
            },
            spec.width
        );
    }

    Ok(())
}
