//! Settings derived from the AWS session: region and per-user application names.

use crate::core::registry::ResolveContext;
use crate::core::types::{SettingValue, Settings};
use regex::Regex;
use std::sync::LazyLock;

/// Prefix of every application name.
pub const APP_NAME_BASE: &str = "meiro_runner_";

/// RoboMaker's limit on application names.
pub const MAX_APP_NAME_LEN: usize = 255;

/// Region configured for the active session.
pub fn resolve_aws_region(_settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    match ctx.cloud.configured_region()? {
        Some(region) if !region.is_empty() => Ok(SettingValue::Text(region)),
        _ => Err("no AWS region configured".to_string()),
    }
}

pub fn resolve_simulation_app_name(
    _settings: &Settings,
    ctx: &ResolveContext,
) -> Result<SettingValue, String> {
    // sic
    resolve_app_name(ctx, "sumulation")
}

pub fn resolve_robot_app_name(_settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    resolve_app_name(ctx, "robot")
}

fn resolve_app_name(ctx: &ResolveContext, role: &str) -> Result<SettingValue, String> {
    let identity = ctx.cloud.caller_identity()?;
    Ok(SettingValue::Text(app_name(&identity.arn, role)))
}

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_\-]").expect("static pattern"));

/// Replace every character outside `[A-Za-z0-9_-]` with `-`.
pub fn sanitize(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "-").into_owned()
}

/// `meiro_runner_<role>_<user>` from a caller ARN, capped at 255 bytes.
/// An ARN without a `/` past its first character yields `meiro_runner_<role>`.
pub fn app_name(arn: &str, role: &str) -> String {
    match arn.rfind('/') {
        Some(i) if i > 0 => {
            let mut name = format!("{}{}_{}", APP_NAME_BASE, role, sanitize(&arn[i + 1..]));
            // sanitized output is ASCII, so any byte index is a char boundary
            name.truncate(MAX_APP_NAME_LEN);
            name
        }
        _ => format!("{}{}", APP_NAME_BASE, role),
    }
}
