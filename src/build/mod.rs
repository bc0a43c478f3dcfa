//! Build driver: install dependencies, build and bundle both workspaces.
//!
//! Steps run strictly in order: the simulation workspace first, then the
//! robot workspace. The first failing step stops the driver.

use crate::console;
use crate::core::eventlog::{EventLog, RunEvent};
use crate::core::host::Host;
use crate::transport::{CommandRunner, Invocation};
use std::path::{Path, PathBuf};

/// Workspace directories, relative to the setup root, in build order.
pub const WORKSPACES: [&str; 2] = ["simulation_ws", "robot_ws"];

/// One build step applied to every workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStep {
    pub description: &'static str,
    pub command: &'static str,
    pub failure_reason: &'static str,
}

pub const STEPS: [BuildStep; 3] = [
    BuildStep {
        description: "install dependencies",
        command: "rosdep install --from-paths src --ignore-src -r -y",
        failure_reason: "Failed to install dependencies of the sample program!",
    },
    BuildStep {
        description: "build",
        command: "colcon build",
        failure_reason: "Failed to build the sample program!",
    },
    BuildStep {
        description: "bundle",
        command: "colcon bundle",
        failure_reason: "Failed to bundle the sample program!",
    },
];

/// Where and how builds run.
pub struct BuildDriver<'a> {
    pub root: PathBuf,
    pub runner: &'a dyn CommandRunner,
    pub host: &'a dyn Host,
    pub events: &'a EventLog,
}

impl BuildDriver<'_> {
    /// Run all steps for all workspaces. Returns the failure reason of the
    /// first step that fails to spawn or exits non-zero.
    pub fn run(&self) -> Result<(), String> {
        console::info("Perform the build and bundles...");
        let mut number = 0;
        for workspace in WORKSPACES {
            let dir = self.root.join(workspace);
            for step in &STEPS {
                number += 1;
                console::info(&format!("Step {}. {} {}...", number, workspace, step.description));
                self.run_step(workspace, &dir, step)?;
                console::info(" =>OK");
            }
        }
        Ok(())
    }

    fn run_step(&self, workspace: &str, dir: &Path, step: &BuildStep) -> Result<(), String> {
        let invocation = Invocation::parse(step.command)
            .ok_or_else(|| format!("empty build command for {}", step.description))?
            .in_dir(dir);

        let outcome = self.runner.run(&invocation);
        self.events.record(
            self.host,
            RunEvent::BuildStep {
                workspace: workspace.to_string(),
                step: step.description.to_string(),
                exit_code: outcome.as_ref().ok().copied(),
            },
        );

        match outcome {
            Ok(0) => Ok(()),
            Ok(code) => Err(report_failure(step, &format!("`{}` exited with {}", invocation, code))),
            Err(e) => Err(report_failure(step, &e)),
        }
    }
}

fn report_failure(step: &BuildStep, detail: &str) -> String {
    console::error("Setup failed!");
    console::error(&format!("Reason: {}", step.failure_reason));
    format!("{} ({})", step.failure_reason, detail)
}
