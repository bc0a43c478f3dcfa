//! Settings derived from the local workspace: project directory and ROS/Gazebo versions.

use crate::core::registry::ResolveContext;
use crate::core::types::{SettingValue, Settings};

/// Environment variable selecting the ROS distribution.
pub const ROS_DISTRO_VAR: &str = "ROS_DISTRO";

/// Distribution that selects the older toolchain.
const KINETIC: &str = "kinetic";

/// Final path segment of the working directory.
pub fn resolve_project_dir(_settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    let cwd = ctx.host.current_dir()?;
    let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| format!("working directory {} has no final component", cwd.display()))?;
    Ok(SettingValue::Text(name))
}

/// `Kinetic` for `ROS_DISTRO=kinetic`, otherwise `Melodic` (also when unset).
pub fn resolve_ros_version(_settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    let label = if is_kinetic(ctx) { "Kinetic" } else { "Melodic" };
    Ok(SettingValue::Text(label.to_string()))
}

/// Gazebo 7 pairs with Kinetic, 9 with Melodic.
pub fn resolve_gazebo_version(_settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    let version = if is_kinetic(ctx) { 7 } else { 9 };
    Ok(SettingValue::Int(version))
}

fn is_kinetic(ctx: &ResolveContext) -> bool {
    ctx.host.var(ROS_DISTRO_VAR).as_deref() == Some(KINETIC)
}
