//! Checkpoint file management: load, save (atomic).

use super::types::Settings;
use std::path::Path;

/// Default checkpoint location, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "ws_settings.yaml";

/// Load the checkpoint. Returns None if the file doesn't exist.
/// An empty or `null` document is an empty settings map.
pub fn load_settings(path: &Path) -> Result<Option<Settings>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    parse_settings(&content)
        .map(Some)
        .map_err(|e| format!("setting file {} exists but failed to load: {}", path.display(), e))
}

/// Parse checkpoint YAML.
pub fn parse_settings(yaml: &str) -> Result<Settings, String> {
    if yaml.trim().is_empty() {
        return Ok(Settings::new());
    }
    let parsed: Option<Settings> =
        serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
    Ok(parsed.unwrap_or_default())
}

/// Save the checkpoint atomically (write to temp, then rename).
/// Every setting is written; unresolved ones as `null`.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
        }
    }

    let yaml = serde_yaml_ng::to_string(&settings.completed())
        .map_err(|e| format!("serialize error: {}", e))?;

    let tmp_path = path.with_extension("yaml.tmp");
    std::fs::write(&tmp_path, &yaml)
        .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, path)
        .map_err(|e| format!("cannot rename {} → {}: {}", tmp_path.display(), path.display(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{SettingName, SettingValue};

    fn make_settings() -> Settings {
        let mut s = Settings::new();
        s.set(SettingName::AwsRegion, SettingValue::Text("us-west-2".into()));
        s.set(SettingName::GazeboVersion, SettingValue::Int(9));
        s.set(
            SettingName::Subnets,
            SettingValue::List(vec!["subnet-1".into(), "subnet-2".into()]),
        );
        s
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws_settings.yaml");
        save_settings(&path, &make_settings()).unwrap();

        let loaded = load_settings(&path).unwrap().unwrap();
        assert_eq!(
            loaded.get(SettingName::AwsRegion),
            Some(&SettingValue::Text("us-west-2".into()))
        );
        assert_eq!(loaded.get(SettingName::GazeboVersion), Some(&SettingValue::Int(9)));
        assert_eq!(loaded.len(), 13);
        assert!(loaded.get(SettingName::Vpc).is_none());
    }

    #[test]
    fn test_save_writes_nulls_for_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws_settings.yaml");
        save_settings(&path, &make_settings()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("aws_region: us-west-2"));
        assert!(content.contains("vpc: null"));
        assert!(content.contains("robomaker_settings: null"));
        assert!(content.contains("- subnet-1"));
    }

    #[test]
    fn test_load_nonexistent() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_settings(&dir.path().join("ghost.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws_settings.yaml");
        std::fs::write(&path, "").unwrap();
        assert!(load_settings(&path).unwrap().unwrap().is_empty());
        std::fs::write(&path, "null\n").unwrap();
        assert!(load_settings(&path).unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws_settings.yaml");
        std::fs::write(&path, "aws_region: [unclosed").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(err.contains("exists but failed to load"));
    }

    #[test]
    fn test_load_unknown_key() {
        let err = parse_settings("not_a_setting: 1\n").unwrap_err();
        assert!(err.contains("YAML parse error"));
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws_settings.yaml");
        save_settings(&path, &make_settings()).unwrap();

        let mut updated = make_settings();
        updated.set(SettingName::Vpc, SettingValue::Text("vpc-123".into()));
        save_settings(&path, &updated).unwrap();

        assert!(!dir.path().join("ws_settings.yaml.tmp").exists());
        let loaded = load_settings(&path).unwrap().unwrap();
        assert_eq!(loaded.require_text(SettingName::Vpc).unwrap(), "vpc-123");
    }

    #[test]
    fn test_parse_python_style_checkpoint() {
        let yaml = r#"
aws_region: us-east-1
bucket_name: robomaker-ws-us-east-1-123456789012-201015-101010
gazebo_version: 9
iam_policy: null
iam_role: null
project_dir: environment
robomaker_settings: null
robot_app_name: meiro_runner_robot_alice
ros_version: Melodic
security_groups: []
simulation_app_name: meiro_runner_sumulation_alice
subnets:
- subnet-1
vpc: vpc-1
"#;
        let s = parse_settings(yaml).unwrap();
        assert_eq!(s.require_text(SettingName::RosVersion).unwrap(), "Melodic");
        assert_eq!(s.get(SettingName::SecurityGroups), Some(&SettingValue::List(vec![])));
        assert!(s.get(SettingName::IamPolicy).is_none());
    }
}
