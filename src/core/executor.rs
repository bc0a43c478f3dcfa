//! Executor: the resolve-and-checkpoint loop.
//!
//! load checkpoint → for each setting in registry order: skip if resolved,
//! else resolve → on failure save a partial checkpoint and stop →
//! save the final checkpoint → build both workspaces

use super::eventlog::{EventLog, RunEvent};
use super::registry::{self, ResolveContext, ResolveFn, TemplatePaths};
use super::state;
use super::types::{EmptyListPolicy, SettingName, Settings};
use crate::build::BuildDriver;
use crate::console;
use crate::transport::CommandRunner;
use std::path::PathBuf;

/// Configuration for a setup run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub settings_file: PathBuf,
    pub paths: TemplatePaths,
    /// Directory holding the two workspaces.
    pub root: PathBuf,
    pub empty_lists: EmptyListPolicy,
    pub skip_build: bool,
    pub events: EventLog,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settings_file: PathBuf::from(state::DEFAULT_SETTINGS_FILE),
            paths: TemplatePaths::default(),
            root: PathBuf::from("."),
            empty_lists: EmptyListPolicy::default(),
            skip_build: false,
            events: EventLog::disabled(),
        }
    }
}

/// A setting that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveFailure {
    pub setting: SettingName,
    pub reason: String,
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// All settings resolved (and the build ran unless skipped).
    Completed { settings: Settings },
    /// A resolver failed; the partial checkpoint is on disk.
    Failed(ResolveFailure),
}

/// Resolve every unresolved setting in `table` order, mutating `settings`.
/// Stops at the first failure; earlier values stay in `settings`.
pub fn resolve_settings(
    settings: &mut Settings,
    table: &[(SettingName, ResolveFn)],
    ctx: &ResolveContext,
    policy: EmptyListPolicy,
    events: &EventLog,
) -> Result<(), ResolveFailure> {
    for &(name, resolve) in table {
        console::plain(&format!("Check {}", name));

        if let Some(existing) = settings.get(name).filter(|v| v.is_truthy(policy)) {
            events.record(
                ctx.host,
                RunEvent::SettingSkipped {
                    setting: name.to_string(),
                    value: existing.to_string(),
                },
            );
        } else {
            let reason = match resolve(settings, ctx) {
                Ok(value) if value.is_truthy(policy) => {
                    events.record(
                        ctx.host,
                        RunEvent::SettingResolved {
                            setting: name.to_string(),
                            value: value.to_string(),
                        },
                    );
                    settings.set(name, value);
                    None
                }
                Ok(value) => Some(format!("resolved to an empty value: {}", value)),
                Err(e) => Some(e),
            };

            if let Some(reason) = reason {
                console::error(&format!("Exception : {}", reason));
                console::error(&format!("Failed to setup {}\nFinishing...\n", name));
                events.record(
                    ctx.host,
                    RunEvent::SettingFailed {
                        setting: name.to_string(),
                        error: reason.clone(),
                    },
                );
                return Err(ResolveFailure { setting: name, reason });
            }
        }

        if let Some(value) = settings.get(name) {
            console::plain("   => Ok");
            console::plain(&format!("   Using {} for {}", value, name));
        }
    }
    Ok(())
}

/// Execute a full setup run.
///
/// `Err` is reserved for fatal conditions: an unreadable checkpoint, a
/// checkpoint that cannot be saved, or a failed build.
pub fn run(
    cfg: &RunConfig,
    ctx: &ResolveContext,
    runner: &dyn CommandRunner,
) -> Result<RunOutcome, String> {
    let mut settings = state::load_settings(&cfg.settings_file)?.unwrap_or_default();
    cfg.events.record(
        ctx.host,
        RunEvent::RunStarted {
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    );

    let table = registry::registry();
    if let Err(failure) = resolve_settings(&mut settings, &table, ctx, cfg.empty_lists, &cfg.events) {
        state::save_settings(&cfg.settings_file, &settings)?;
        return Ok(RunOutcome::Failed(failure));
    }

    console::plain("Setup finished successfully!");
    state::save_settings(&cfg.settings_file, &settings)?;
    cfg.events.record(
        ctx.host,
        RunEvent::RunFinished {
            resolved: settings.resolved().count(),
        },
    );

    if !cfg.skip_build {
        console::plain("Execute the post process..");
        let driver = BuildDriver {
            root: cfg.root.clone(),
            runner,
            host: ctx.host,
            events: &cfg.events,
        };
        driver.run()?;
    }

    Ok(RunOutcome::Completed { settings })
}
