//! [`CloudProvider`] backed by the `aws` command line.
//!
//! Every call runs `aws <service> <operation> ... --output json` and parses
//! the JSON document the CLI prints. Credentials, profiles and endpoints are
//! whatever the CLI resolves from its own configuration.

use super::{CallerIdentity, CloudProvider, RoleRequest, SecurityGroup, Subnet, Vpc};
use super::DEFAULT_BUCKET_REGION;
use crate::transport::{local, ExecOutput, Invocation};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Talks to AWS through the `aws` executable.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new("aws")
    }
}

impl AwsCli {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn exec(&self, args: &[&str]) -> Result<ExecOutput, String> {
        local::exec_captured(&Invocation::new(&self.program, args.iter().copied()))
    }

    /// Run an operation expecting a JSON response.
    fn call<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, String> {
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--output", "json"]);
        let out = self.exec(&full)?;
        if !out.success() {
            return Err(command_error(&self.program, args, &out));
        }
        parse_response(&out.stdout)
            .map_err(|e| format!("{} {}: {}", self.program, operation(args), e))
    }

    /// Run an operation whose output is ignored.
    fn call_unit(&self, args: &[&str]) -> Result<(), String> {
        let out = self.exec(args)?;
        if !out.success() {
            return Err(command_error(&self.program, args, &out));
        }
        Ok(())
    }
}

/// `service operation`, for messages.
fn operation(args: &[&str]) -> String {
    args.iter().take(2).copied().collect::<Vec<_>>().join(" ")
}

fn command_error(program: &str, args: &[&str], out: &ExecOutput) -> String {
    let op = operation(args);
    let detail = out.stderr.trim();
    if detail.is_empty() {
        format!("{} {} failed (exit {})", program, op, out.exit_code)
    } else {
        format!("{} {} failed (exit {}): {}", program, op, out.exit_code, detail)
    }
}

/// Parse a CLI JSON response.
pub fn parse_response<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("unexpected response: {}", e))
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CallerIdentityResponse {
    account: String,
    arn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpcsResponse {
    #[serde(default)]
    vpcs: Vec<VpcEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VpcEntry {
    vpc_id: String,
    #[serde(default)]
    is_default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSecurityGroupsResponse {
    #[serde(default)]
    security_groups: Vec<SecurityGroupEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SecurityGroupEntry {
    group_id: String,
    group_name: String,
    #[serde(default)]
    vpc_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSubnetsResponse {
    #[serde(default)]
    subnets: Vec<SubnetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SubnetEntry {
    subnet_id: String,
    vpc_id: String,
    #[serde(default)]
    default_for_az: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ArnEntry {
    arn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreatePolicyResponse {
    policy: ArnEntry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateRoleResponse {
    role: ArnEntry,
}

/// Arguments for `s3api create-bucket`. Outside the default region the
/// bucket needs an explicit location constraint.
pub fn create_bucket_args(bucket: &str, region: &str) -> Vec<String> {
    let mut args = vec![
        "s3api".to_string(),
        "create-bucket".to_string(),
        "--bucket".to_string(),
        bucket.to_string(),
        "--region".to_string(),
        region.to_string(),
    ];
    if region != DEFAULT_BUCKET_REGION {
        args.push("--create-bucket-configuration".to_string());
        args.push(format!("LocationConstraint={}", region));
    }
    args
}

/// First non-empty region among the environment overrides.
pub fn region_from_env(aws_region: Option<String>, aws_default_region: Option<String>) -> Option<String> {
    [aws_region, aws_default_region]
        .into_iter()
        .flatten()
        .map(|r| r.trim().to_string())
        .find(|r| !r.is_empty())
}

impl CloudProvider for AwsCli {
    fn configured_region(&self) -> Result<Option<String>, String> {
        if let Some(region) =
            region_from_env(std::env::var("AWS_REGION").ok(), std::env::var("AWS_DEFAULT_REGION").ok())
        {
            return Ok(Some(region));
        }
        // `configure get` exits 1 with no output when the key is unset.
        let out = self.exec(&["configure", "get", "region"])?;
        let region = out.stdout.trim();
        if out.success() && !region.is_empty() {
            Ok(Some(region.to_string()))
        } else {
            Ok(None)
        }
    }

    fn caller_identity(&self) -> Result<CallerIdentity, String> {
        let resp: CallerIdentityResponse = self.call(&["sts", "get-caller-identity"])?;
        Ok(CallerIdentity {
            account: resp.account,
            arn: resp.arn,
        })
    }

    fn describe_vpcs(&self) -> Result<Vec<Vpc>, String> {
        let resp: DescribeVpcsResponse = self.call(&["ec2", "describe-vpcs"])?;
        Ok(resp
            .vpcs
            .into_iter()
            .map(|v| Vpc {
                vpc_id: v.vpc_id,
                is_default: v.is_default,
            })
            .collect())
    }

    fn describe_security_groups(&self) -> Result<Vec<SecurityGroup>, String> {
        let resp: DescribeSecurityGroupsResponse =
            self.call(&["ec2", "describe-security-groups"])?;
        Ok(resp
            .security_groups
            .into_iter()
            .map(|g| SecurityGroup {
                group_id: g.group_id,
                group_name: g.group_name,
                vpc_id: g.vpc_id,
            })
            .collect())
    }

    fn describe_subnets(&self) -> Result<Vec<Subnet>, String> {
        let resp: DescribeSubnetsResponse = self.call(&["ec2", "describe-subnets"])?;
        Ok(resp
            .subnets
            .into_iter()
            .map(|s| Subnet {
                subnet_id: s.subnet_id,
                vpc_id: s.vpc_id,
                default_for_az: s.default_for_az,
            })
            .collect())
    }

    fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), String> {
        let args = create_bucket_args(bucket, region);
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.call_unit(&refs)
    }

    fn create_policy(&self, policy_name: &str, document: &str) -> Result<String, String> {
        let resp: CreatePolicyResponse = self.call(&[
            "iam",
            "create-policy",
            "--policy-name",
            policy_name,
            "--policy-document",
            document,
        ])?;
        Ok(resp.policy.arn)
    }

    fn create_role(&self, request: &RoleRequest) -> Result<String, String> {
        let max_session = request.max_session_duration.to_string();
        let resp: CreateRoleResponse = self.call(&[
            "iam",
            "create-role",
            "--path",
            &request.path,
            "--role-name",
            &request.role_name,
            "--assume-role-policy-document",
            &request.assume_role_policy_document,
            "--description",
            &request.description,
            "--max-session-duration",
            &max_session,
        ])?;
        Ok(resp.role.arn)
    }

    fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<(), String> {
        self.call_unit(&[
            "iam",
            "attach-role-policy",
            "--role-name",
            role_name,
            "--policy-arn",
            policy_arn,
        ])
    }
}
