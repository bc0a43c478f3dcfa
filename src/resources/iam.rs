//! IAM policy and simulation execution role.
//!
//! The policy grants the simulation job access to the workshop bucket,
//! CloudWatch logs/metrics, and tagging/cancelling its own simulation jobs.
//! The role is assumable by RoboMaker and carries that policy.

use crate::console;
use crate::cloud::RoleRequest;
use crate::core::host;
use crate::core::registry::ResolveContext;
use crate::core::types::{SettingName, SettingValue, Settings};
use serde_json::{json, Value};

pub const POLICY_VERSION: &str = "2012-10-17";
pub const ROBOMAKER_PRINCIPAL: &str = "robomaker.amazonaws.com";
pub const ROLE_DESCRIPTION: &str = "Role for RoboMaker workshop";
pub const ROLE_PATH: &str = "/";
pub const MAX_SESSION_DURATION_SECS: u32 = 3600;

/// Permission document for the workshop bucket and account-scoped jobs.
pub fn workshop_policy(bucket: &str, account: &str) -> Value {
    let bucket_arn = format!("arn:aws:s3:::{}", bucket);
    let objects_arn = format!("arn:aws:s3:::{}/*", bucket);
    json!({
        "Version": POLICY_VERSION,
        "Statement": [
            {
                "Action": "s3:ListBucket",
                "Resource": [bucket_arn],
                "Effect": "Allow"
            },
            {
                "Action": ["s3:Get*", "s3:List*"],
                "Resource": [objects_arn],
                "Effect": "Allow"
            },
            {
                "Action": "s3:Put*",
                "Resource": [objects_arn],
                "Effect": "Allow"
            },
            {
                "Action": "s3:DeleteObject",
                "Resource": [objects_arn],
                "Effect": "Allow"
            },
            {
                "Action": [
                    "logs:CreateLogGroup",
                    "logs:CreateLogStream",
                    "logs:PutLogEvents",
                    "logs:DescribeLogStreams"
                ],
                "Resource": [
                    format!("arn:aws:logs:*:{}:log-group:/aws/robomaker/SimulationJobs*", account)
                ],
                "Effect": "Allow"
            },
            {
                "Action": ["cloudwatch:PutMetricData"],
                "Effect": "Allow",
                "Resource": "*"
            },
            {
                "Action": [
                    "robomaker:TagResource",
                    "robomaker:UntagResource",
                    "robomaker:ListTagsForResource",
                    "robomaker:CancelSimulationJob"
                ],
                "Resource": [format!("arn:aws:robomaker:*:{}:simulation-job*", account)],
                "Effect": "Allow"
            }
        ]
    })
}

/// Trust document letting RoboMaker assume the role.
pub fn trust_policy() -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [
            {
                "Sid": "",
                "Effect": "Allow",
                "Principal": { "Service": ROBOMAKER_PRINCIPAL },
                "Action": "sts:AssumeRole"
            }
        ]
    })
}

pub fn policy_name(stamp: &str) -> String {
    format!("robomaker-ws-policy-{}", stamp)
}

pub fn role_name(stamp: &str) -> String {
    format!("Cloud9-robomaker-ws-role-{}", stamp)
}

/// Create the workshop policy and return its ARN.
pub fn resolve_iam_policy(settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    console::info("create iam policy..");
    let bucket = settings.require_text(SettingName::BucketName)?;
    let account = ctx.cloud.caller_identity()?.account;

    let name = policy_name(&host::resource_stamp(ctx.host));
    console::info(&format!("policy name : {}", name));

    let document = workshop_policy(bucket, &account).to_string();
    let arn = ctx.cloud.create_policy(&name, &document)?;
    Ok(SettingValue::Text(arn))
}

/// Create the execution role, attach the workshop policy, return the role ARN.
/// A failed attachment leaves the role behind.
pub fn resolve_iam_role(settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    console::info("create iam role..");
    let policy_arn = settings.require_text(SettingName::IamPolicy)?;

    let name = role_name(&host::resource_stamp(ctx.host));
    console::info(&format!("role name : {}", name));

    let request = RoleRequest {
        path: ROLE_PATH.to_string(),
        role_name: name,
        assume_role_policy_document: trust_policy().to_string(),
        description: ROLE_DESCRIPTION.to_string(),
        max_session_duration: MAX_SESSION_DURATION_SECS,
    };
    let arn = ctx.cloud.create_role(&request)?;
    ctx.cloud.attach_role_policy(&request.role_name, policy_arn)?;
    Ok(SettingValue::Text(arn))
}
