//! Default VPC, its default security groups and default-for-AZ subnets.

use crate::core::registry::ResolveContext;
use crate::core::types::{SettingName, SettingValue, Settings};

/// Name EC2 gives the security group created with every VPC.
const DEFAULT_GROUP_NAME: &str = "default";

/// The account's default VPC in the session region.
pub fn resolve_vpc(_settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    ctx.cloud
        .describe_vpcs()?
        .into_iter()
        .find(|v| v.is_default)
        .map(|v| SettingValue::Text(v.vpc_id))
        .ok_or_else(|| "no default VPC found".to_string())
}

/// Groups named `default` inside the resolved VPC. May be empty.
pub fn resolve_security_groups(settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    let vpc = settings.require_text(SettingName::Vpc)?;
    let ids = ctx
        .cloud
        .describe_security_groups()?
        .into_iter()
        .filter(|g| g.group_name == DEFAULT_GROUP_NAME && g.vpc_id.as_deref() == Some(vpc))
        .map(|g| g.group_id)
        .collect();
    Ok(SettingValue::List(ids))
}

/// Default-for-AZ subnets inside the resolved VPC. May be empty.
pub fn resolve_subnets(settings: &Settings, ctx: &ResolveContext) -> Result<SettingValue, String> {
    let vpc = settings.require_text(SettingName::Vpc)?;
    let ids = ctx
        .cloud
        .describe_subnets()?
        .into_iter()
        .filter(|s| s.vpc_id == vpc && s.default_for_az)
        .map(|s| s.subnet_id)
        .collect();
    Ok(SettingValue::List(ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::Vpc;
    use crate::core::registry::TemplatePaths;
    use crate::testing::{FakeCloud, FakeHost};

    fn with_vpc(vpc: &str) -> Settings {
        let mut s = Settings::new();
        s.set(SettingName::Vpc, SettingValue::Text(vpc.to_string()));
        s
    }

    fn run(
        cloud: &FakeCloud,
        settings: &Settings,
        f: fn(&Settings, &ResolveContext) -> Result<SettingValue, String>,
    ) -> Result<SettingValue, String> {
        let host = FakeHost::new();
        let paths = TemplatePaths::default();
        let ctx = ResolveContext { cloud, host: &host, paths: &paths };
        f(settings, &ctx)
    }

    #[test]
    fn test_default_vpc() {
        let cloud = FakeCloud::new();
        assert_eq!(
            run(&cloud, &Settings::new(), resolve_vpc).unwrap(),
            SettingValue::Text("vpc-default".into())
        );
    }

    #[test]
    fn test_no_default_vpc() {
        let mut cloud = FakeCloud::new();
        cloud.vpcs = vec![Vpc { vpc_id: "vpc-1".into(), is_default: false }];
        let err = run(&cloud, &Settings::new(), resolve_vpc).unwrap_err();
        assert!(err.contains("no default VPC"));
    }

    #[test]
    fn test_security_groups_filtered_by_name_and_vpc() {
        let cloud = FakeCloud::new();
        assert_eq!(
            run(&cloud, &with_vpc("vpc-default"), resolve_security_groups).unwrap(),
            SettingValue::List(vec!["sg-default".into()])
        );
    }

    #[test]
    fn test_security_groups_may_be_empty() {
        let cloud = FakeCloud::new();
        assert_eq!(
            run(&cloud, &with_vpc("vpc-none"), resolve_security_groups).unwrap(),
            SettingValue::List(vec![])
        );
    }

    #[test]
    fn test_security_groups_need_vpc() {
        let cloud = FakeCloud::new();
        let err = run(&cloud, &Settings::new(), resolve_security_groups).unwrap_err();
        assert!(err.contains("vpc"));
        assert!(cloud.calls().is_empty());
    }

    #[test]
    fn test_subnets_default_for_az_only() {
        let cloud = FakeCloud::new();
        assert_eq!(
            run(&cloud, &with_vpc("vpc-default"), resolve_subnets).unwrap(),
            SettingValue::List(vec!["subnet-a".into(), "subnet-b".into()])
        );
        assert_eq!(
            run(&cloud, &with_vpc("vpc-other"), resolve_subnets).unwrap(),
            SettingValue::List(vec!["subnet-x".into()])
        );
    }
}
