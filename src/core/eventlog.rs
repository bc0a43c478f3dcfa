//! Append-only JSONL run log.

use super::host::{Host, UtcTime};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default event log location, relative to the working directory.
pub const DEFAULT_EVENT_LOG: &str = "ws_events.jsonl";

/// One step of a setup run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted {
        version: String,
    },
    SettingSkipped {
        setting: String,
        value: String,
    },
    SettingResolved {
        setting: String,
        value: String,
    },
    SettingFailed {
        setting: String,
        error: String,
    },
    RunFinished {
        resolved: usize,
    },
    BuildStep {
        workspace: String,
        step: String,
        exit_code: Option<i32>,
    },
}

#[derive(Serialize)]
struct TimestampedEvent<'a> {
    ts: String,
    #[serde(flatten)]
    event: &'a RunEvent,
}

/// Where run events go. `None` path disables logging.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Best-effort append; a broken log never aborts setup.
    pub fn record(&self, host: &dyn Host, event: RunEvent) {
        if let Some(ref path) = self.path {
            let ts = UtcTime::from_epoch_secs(host.now_epoch_secs()).iso8601();
            let _ = append_event(path, &ts, &event);
        }
    }
}

/// Append an event to the log file.
pub fn append_event(path: &Path, ts: &str, event: &RunEvent) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create log dir: {}", e))?;
        }
    }

    let te = TimestampedEvent {
        ts: ts.to_string(),
        event,
    };
    let json = serde_json::to_string(&te).map_err(|e| format!("JSON serialize error: {}", e))?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open event log {}: {}", path.display(), e))?;

    writeln!(file, "{}", json).map_err(|e| format!("write error: {}", e))?;

    Ok(())
}
