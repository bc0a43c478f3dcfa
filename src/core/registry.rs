//! Resolver registry: one resolver per setting, in resolution order.
//!
//! The table is an exhaustive `match` over [`SettingName`], so adding a
//! setting without a resolver does not compile.

use super::host::Host;
use super::types::{SettingName, SettingValue, Settings};
use crate::cloud::CloudProvider;
use crate::resources::{bucket, iam, identity, network, settings_file, workspace};
use std::path::PathBuf;

/// Default template, relative to the working directory.
pub const DEFAULT_TEMPLATE: &str = "roboMakerSettings.temp";

/// Default rendered output, one directory up.
pub const DEFAULT_OUTPUT: &str = "../roboMakerSettings.json";

/// Template input and rendered output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// External collaborators available to every resolver.
pub struct ResolveContext<'a> {
    pub cloud: &'a dyn CloudProvider,
    pub host: &'a dyn Host,
    pub paths: &'a TemplatePaths,
}

/// Produces the value of one setting from the settings resolved before it.
pub type ResolveFn = fn(&Settings, &ResolveContext) -> Result<SettingValue, String>;

/// The resolver for a setting.
pub fn resolver_for(name: SettingName) -> ResolveFn {
    match name {
        SettingName::AwsRegion => identity::resolve_aws_region,
        SettingName::RosVersion => workspace::resolve_ros_version,
        SettingName::GazeboVersion => workspace::resolve_gazebo_version,
        SettingName::BucketName => bucket::resolve_bucket_name,
        SettingName::SimulationAppName => identity::resolve_simulation_app_name,
        SettingName::RobotAppName => identity::resolve_robot_app_name,
        SettingName::ProjectDir => workspace::resolve_project_dir,
        SettingName::Vpc => network::resolve_vpc,
        SettingName::SecurityGroups => network::resolve_security_groups,
        SettingName::Subnets => network::resolve_subnets,
        SettingName::IamPolicy => iam::resolve_iam_policy,
        SettingName::IamRole => iam::resolve_iam_role,
        SettingName::RobomakerSettings => settings_file::resolve_robomaker_settings,
    }
}

/// The full registry in resolution order.
pub fn registry() -> Vec<(SettingName, ResolveFn)> {
    SettingName::ALL
        .iter()
        .map(|&name| (name, resolver_for(name)))
        .collect()
}
