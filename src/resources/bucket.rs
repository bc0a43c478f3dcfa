//! Workshop S3 bucket: create under a fresh timestamped name, retrying on failure.

use crate::console;
use crate::core::host::{self, Host};
use crate::core::registry::ResolveContext;
use crate::core::types::{SettingName, SettingValue, Settings};
use std::time::Duration;

/// Retries after the first failed creation.
pub const MAX_RETRIES: u32 = 5;

/// Backoff bounds in seconds, inclusive.
const BACKOFF_MIN_SECS: u64 = 1;
const BACKOFF_MAX_SECS: u64 = 3;

/// `robomaker-ws-<region>-<account>-<yymmdd-HHMMSS>`.
pub fn bucket_name(region: &str, account: &str, stamp: &str) -> String {
    format!("robomaker-ws-{}-{}-{}", region, account, stamp)
}

/// Create the bucket. Each attempt takes a new name from the clock, so a
/// half-created bucket from a failed attempt is never reused.
pub fn resolve_bucket_name(settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    let region = settings.require_text(SettingName::AwsRegion)?;
    let account = ctx.cloud.caller_identity()?.account;

    let mut retries_left = MAX_RETRIES;
    loop {
        let name = bucket_name(region, &account, &host::resource_stamp(ctx.host));
        console::info(&format!("Create S3 bucket: {}..", name));

        match ctx.cloud.create_bucket(&name, region) {
            Ok(()) => return Ok(SettingValue::Text(name)),
            Err(_) if retries_left > 0 => {
                retries_left -= 1;
                console::info(" => Failed.. retrying");
                backoff(ctx.host);
            }
            Err(e) => {
                console::error("Failed to create S3 bucket!");
                console::error(&format!("Error Message: {}", e));
                return Err(format!(
                    "bucket creation failed after {} retries: {}",
                    MAX_RETRIES, e
                ));
            }
        }
    }
}

fn backoff(host: &dyn Host) {
    let secs = host.backoff_secs(BACKOFF_MIN_SECS, BACKOFF_MAX_SECS);
    host.sleep(Duration::from_secs(secs));
}
