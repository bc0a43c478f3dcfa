//! The rendered RoboMaker settings file consumed by the workshop IDE.

use crate::console;
use crate::core::registry::ResolveContext;
use crate::core::template;
use crate::core::types::{SettingValue, Settings};

/// Render the template with everything resolved so far. The setting records
/// only that rendering happened.
pub fn resolve_robomaker_settings(settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    console::info("setup roboMakerSettings.json..");
    template::render_file(&ctx.paths.template, &ctx.paths.output, settings)?;
    Ok(SettingValue::Bool(true))
}
