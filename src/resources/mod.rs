//! Setting resolvers: one function per workshop setting.
//!
//! Each resolver:
//! 1. Reads the settings resolved before it
//! 2. Queries or creates exactly one cloud resource (or derives a local value)
//! 3. Returns the value, or an error message the executor reports

pub mod bucket;
pub mod iam;
pub mod identity;
pub mod network;
pub mod settings_file;
pub mod workspace;
