//! Workshop settings template rendering.
//!
//! Placeholders are `<setting_name>`. Each resolved setting replaces every
//! occurrence of its placeholder with its template string form; placeholders
//! of unresolved settings and any other `<...>` text are left as written.

use super::types::Settings;
use std::path::Path;

/// Substitute resolved settings into template text.
pub fn render_template(template: &str, settings: &Settings) -> String {
    let mut result = template.to_string();
    for (name, value) in settings.resolved() {
        let placeholder = format!("<{}>", name);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, &value.to_template_string());
        }
    }
    result
}

/// Read `template_path`, render, write `output_path` (replacing it).
pub fn render_file(template_path: &Path, output_path: &Path, settings: &Settings) -> Result<(), String> {
    let template = std::fs::read_to_string(template_path)
        .map_err(|e| format!("cannot read template {}: {}", template_path.display(), e))?;
    let rendered = render_template(&template, settings);
    std::fs::write(output_path, rendered)
        .map_err(|e| format!("cannot write {}: {}", output_path.display(), e))
}
