//! Core setup logic: settings, checkpointing, resolution order, execution.

pub mod eventlog;
pub mod executor;
pub mod host;
pub mod registry;
pub mod state;
pub mod template;
pub mod types;
