//! Cloud provider boundary: the AWS calls setup depends on.
//!
//! Resolvers only see [`CloudProvider`]. The production implementation
//! drives the `aws` CLI ([`aws_cli::AwsCli`]); tests use a scripted fake.

pub mod aws_cli;

/// Result of an identity lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vpc {
    pub vpc_id: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
    /// EC2-Classic groups have no VPC.
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub subnet_id: String,
    pub vpc_id: String,
    pub default_for_az: bool,
}

/// Parameters of an IAM role creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRequest {
    pub path: String,
    pub role_name: String,
    pub assume_role_policy_document: String,
    pub description: String,
    pub max_session_duration: u32,
}

/// Region where S3 buckets are created without a location constraint.
pub const DEFAULT_BUCKET_REGION: &str = "us-east-1";

/// The AWS operations used by resolvers. All errors are human-readable.
pub trait CloudProvider {
    /// Region of the active session, None if nothing is configured.
    fn configured_region(&self) -> Result<Option<String>, String>;

    fn caller_identity(&self) -> Result<CallerIdentity, String>;

    fn describe_vpcs(&self) -> Result<Vec<Vpc>, String>;

    fn describe_security_groups(&self) -> Result<Vec<SecurityGroup>, String>;

    fn describe_subnets(&self) -> Result<Vec<Subnet>, String>;

    /// Create a bucket in `region`.
    fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), String>;

    /// Create a managed policy, returning its ARN.
    fn create_policy(&self, policy_name: &str, document: &str) -> Result<String, String>;

    /// Create a role, returning its ARN.
    fn create_role(&self, request: &RoleRequest) -> Result<String, String>;

    fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<(), String>;
}
