//! CLI subcommands: run, status, render, build.

use crate::build::BuildDriver;
use crate::cloud::aws_cli::AwsCli;
use crate::cloud::CloudProvider;
use crate::core::eventlog::{self, EventLog};
use crate::core::executor::{self, RunConfig, RunOutcome};
use crate::core::host::{Host, SystemHost};
use crate::core::registry::{self, ResolveContext, TemplatePaths};
use crate::core::types::{EmptyListPolicy, SettingName, Settings};
use crate::core::{state, template};
use crate::transport::{CommandRunner, LocalRunner};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve all settings, render the settings file, build and bundle
    Run {
        /// Checkpoint file
        #[arg(long, default_value = state::DEFAULT_SETTINGS_FILE)]
        settings_file: PathBuf,

        /// Settings template
        #[arg(long, default_value = registry::DEFAULT_TEMPLATE)]
        template: PathBuf,

        /// Rendered settings file
        #[arg(long, default_value = registry::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// JSONL event log
        #[arg(long, default_value = eventlog::DEFAULT_EVENT_LOG)]
        event_log: PathBuf,

        /// Do not write the event log
        #[arg(long)]
        no_event_log: bool,

        /// Treat empty lists (security groups, subnets) as resolved
        #[arg(long)]
        empty_list_resolved: bool,

        /// Stop after the settings file is rendered
        #[arg(long)]
        skip_build: bool,

        /// Directory containing simulation_ws and robot_ws
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Show which settings the checkpoint already holds
    Status {
        /// Checkpoint file
        #[arg(long, default_value = state::DEFAULT_SETTINGS_FILE)]
        settings_file: PathBuf,

        /// Treat empty lists as resolved
        #[arg(long)]
        empty_list_resolved: bool,
    },

    /// Re-render the settings file from the checkpoint
    Render {
        /// Checkpoint file
        #[arg(long, default_value = state::DEFAULT_SETTINGS_FILE)]
        settings_file: PathBuf,

        /// Settings template
        #[arg(long, default_value = registry::DEFAULT_TEMPLATE)]
        template: PathBuf,

        /// Rendered settings file
        #[arg(long, default_value = registry::DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Build and bundle both workspaces
    Build {
        /// Directory containing simulation_ws and robot_ws
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Run {
            settings_file,
            template,
            output,
            event_log,
            no_event_log,
            empty_list_resolved,
            skip_build,
            root,
        } => {
            let cfg = RunConfig {
                settings_file,
                paths: TemplatePaths { template, output },
                root,
                empty_lists: policy(empty_list_resolved),
                skip_build,
                events: if no_event_log {
                    EventLog::disabled()
                } else {
                    EventLog::new(event_log)
                },
            };
            cmd_run(&cfg, &AwsCli::default(), &SystemHost, &LocalRunner)
        }
        Commands::Status {
            settings_file,
            empty_list_resolved,
        } => cmd_status(&settings_file, policy(empty_list_resolved)),
        Commands::Render {
            settings_file,
            template,
            output,
        } => cmd_render(&settings_file, &template, &output),
        Commands::Build { root } => cmd_build(&root, &SystemHost, &LocalRunner),
    }
}

fn policy(empty_list_resolved: bool) -> EmptyListPolicy {
    if empty_list_resolved {
        EmptyListPolicy::Resolved
    } else {
        EmptyListPolicy::Unresolved
    }
}

fn cmd_run(
    cfg: &RunConfig,
    cloud: &dyn CloudProvider,
    host: &dyn Host,
    runner: &dyn CommandRunner,
) -> Result<(), String> {
    let ctx = ResolveContext {
        cloud,
        host,
        paths: &cfg.paths,
    };
    match executor::run(cfg, &ctx, runner)? {
        RunOutcome::Completed { .. } => Ok(()),
        RunOutcome::Failed(failure) => Err(format!(
            "setup stopped at {}; progress saved to {}",
            failure.setting,
            cfg.settings_file.display()
        )),
    }
}

fn cmd_status(settings_file: &Path, policy: EmptyListPolicy) -> Result<(), String> {
    let Some(settings) = state::load_settings(settings_file)? else {
        println!("No settings found. Run `ws-setup run` first.");
        return Ok(());
    };
    print!("{}", status_report(&settings, policy));
    Ok(())
}

fn status_report(settings: &Settings, policy: EmptyListPolicy) -> String {
    let mut out = String::new();
    let mut resolved = 0;
    for name in SettingName::ALL {
        let line = match settings.get(name) {
            Some(value) if settings.is_resolved(name, policy) => {
                resolved += 1;
                format!("  {}: {}\n", name, value)
            }
            _ => format!("  {}: (unresolved)\n", name),
        };
        out.push_str(&line);
    }
    out.push_str(&format!("{}/{} settings resolved\n", resolved, SettingName::ALL.len()));
    out
}

fn cmd_render(settings_file: &Path, template_path: &Path, output: &Path) -> Result<(), String> {
    let settings = state::load_settings(settings_file)?
        .ok_or_else(|| format!("no settings at {}; run `ws-setup run` first", settings_file.display()))?;
    template::render_file(template_path, output, &settings)?;
    println!("Rendered {} -> {}", template_path.display(), output.display());
    Ok(())
}

fn cmd_build(root: &Path, host: &dyn Host, runner: &dyn CommandRunner) -> Result<(), String> {
    let events = EventLog::disabled();
    BuildDriver {
        root: root.to_path_buf(),
        runner,
        host,
        events: &events,
    }
    .run()
}
