//! ws-setup: RoboMaker workshop environment setup.
//!
//! Discovers the AWS account, region and default network, creates the
//! workshop bucket, policy and role, renders the IDE settings file, then
//! builds and bundles the simulation and robot workspaces. Progress is
//! checkpointed to YAML so an interrupted run resumes where it stopped.

pub mod build;
pub mod cli;
pub mod cloud;
pub mod console;
pub mod core;
pub mod resources;
pub mod transport;

#[cfg(test)]
mod testing;
