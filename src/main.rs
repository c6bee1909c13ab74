//! Differential harness driving two version-control tools in lockstep.
//!
//! Applies canned command sequences to two working trees, one per configured
//! tool, and fails on the first byte-level divergence between them.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use lockstep::config::load_config;
use lockstep::driver::run_scenario;
use lockstep::exit_codes;
use lockstep::logging;
use lockstep::scenario;

#[derive(Parser)]
#[command(
    name = "lockstep",
    version,
    about = "Differential harness driving two version-control tools in lockstep"
)]
struct Cli {
    /// Path to the harness TOML config (defaults apply when missing).
    #[arg(long, global = true, default_value = "lockstep.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a built-in scenario against both configured tools.
    Run {
        scenario: String,
        /// Keep applying commands after a failure instead of stopping.
        #[arg(long)]
        keep_going: bool,
    },
    /// List the built-in scenarios.
    List,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILED);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::List => {
            for scenario in scenario::builtin() {
                println!("{:<14} {}", scenario.name, scenario.summary);
            }
            Ok(exit_codes::OK)
        }
        Command::Run {
            scenario: name,
            keep_going,
        } => {
            let mut config = load_config(&cli.config)
                .with_context(|| format!("load config {}", cli.config.display()))?;
            if keep_going {
                config.fail_fast = false;
            }
            let Some(scenario) = scenario::find(&name) else {
                bail!("unknown scenario '{name}' (see `lockstep list`)");
            };

            let report = run_scenario(&config, &scenario)?;
            if report.succeeded() {
                println!(
                    "{}: {} steps, working trees identical throughout",
                    report.name, report.steps_completed
                );
                return Ok(exit_codes::OK);
            }
            for failure in &report.failures {
                eprintln!("step {} ({}): {:#}", failure.step, failure.command, failure.error);
            }
            Ok(exit_codes::FAILED)
        }
    }
}
