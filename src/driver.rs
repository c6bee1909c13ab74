//! Scenario driver: reset both roots, initialize both tools, apply the
//! sequence in order, and collect per-step failures.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::command::Command;
use crate::config::HarnessConfig;
use crate::scenario::Scenario;
use crate::target::TargetPair;

/// One failed step in a run.
#[derive(Debug)]
pub struct StepFailure {
    /// Zero-based index into the command sequence.
    pub step: usize,
    /// Human-readable rendering of the failed command.
    pub command: String,
    pub error: anyhow::Error,
}

/// What happened across a whole run.
#[derive(Debug)]
pub struct RunReport {
    pub name: String,
    pub steps_completed: usize,
    pub failures: Vec<StepFailure>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a built-in scenario against both configured targets.
pub fn run_scenario(config: &HarnessConfig, scenario: &Scenario) -> Result<RunReport> {
    let commands = scenario.commands(&config.trunk_branch);
    run_commands(config, scenario.name, &commands)
}

/// Run an arbitrary command sequence against both configured targets.
///
/// Both roots are destroyed and recreated first, then both tools are
/// initialized. With `fail_fast` the run stops at the first failed step;
/// otherwise every failure is recorded and the remaining commands still run.
/// Failed or not, the roots are left as the last applied step produced them,
/// for post-mortem inspection.
pub fn run_commands(
    config: &HarnessConfig,
    name: &str,
    commands: &[Command],
) -> Result<RunReport> {
    let targets = TargetPair::from_config(config);
    targets.reset().context("reset target roots")?;
    Command::Init
        .apply(&targets)
        .context("initialize both tools")?;

    info!(scenario = name, steps = commands.len(), "run started");
    let mut report = RunReport {
        name: name.to_string(),
        steps_completed: 0,
        failures: Vec::new(),
    };

    for (step, command) in commands.iter().enumerate() {
        info!(step, command = %command, "applying");
        match command.apply(&targets) {
            Ok(()) => report.steps_completed += 1,
            Err(error) => {
                error!(step, command = %command, "step failed: {error:#}");
                report.failures.push(StepFailure {
                    step,
                    command: command.to_string(),
                    error,
                });
                if config.fail_fast {
                    break;
                }
            }
        }
    }

    info!(
        scenario = name,
        completed = report.steps_completed,
        failures = report.failures.len(),
        "run finished"
    );
    Ok(report)
}
