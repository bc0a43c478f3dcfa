//! Setting names, values, and the checkpointed settings map.
//!
//! The key set is closed: exactly thirteen settings, declared here in the
//! order they are resolved. Everything derives Serialize/Deserialize so the
//! map roundtrips through the YAML checkpoint file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Setting names
// ============================================================================

/// One of the fixed workshop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingName {
    AwsRegion,
    RosVersion,
    GazeboVersion,
    BucketName,
    SimulationAppName,
    RobotAppName,
    ProjectDir,
    Vpc,
    SecurityGroups,
    Subnets,
    IamPolicy,
    IamRole,
    RobomakerSettings,
}

impl SettingName {
    /// All settings in resolution order. Later entries may read earlier ones.
    pub const ALL: [SettingName; 13] = [
        Self::AwsRegion,
        Self::RosVersion,
        Self::GazeboVersion,
        Self::BucketName,
        Self::SimulationAppName,
        Self::RobotAppName,
        Self::ProjectDir,
        Self::Vpc,
        Self::SecurityGroups,
        Self::Subnets,
        Self::IamPolicy,
        Self::IamRole,
        Self::RobomakerSettings,
    ];

    /// Key as written in the checkpoint file and template placeholders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwsRegion => "aws_region",
            Self::RosVersion => "ros_version",
            Self::GazeboVersion => "gazebo_version",
            Self::BucketName => "bucket_name",
            Self::SimulationAppName => "simulation_app_name",
            Self::RobotAppName => "robot_app_name",
            Self::ProjectDir => "project_dir",
            Self::Vpc => "vpc",
            Self::SecurityGroups => "security_groups",
            Self::Subnets => "subnets",
            Self::IamPolicy => "iam_policy",
            Self::IamRole => "iam_role",
            Self::RobomakerSettings => "robomaker_settings",
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Setting values
// ============================================================================

/// A resolved value. Untagged so the checkpoint stays plain YAML scalars/lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

/// Whether an empty list counts as a resolved setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyListPolicy {
    /// Empty lists are falsy: a resolver returning one fails, and a
    /// checkpointed one is resolved again on the next run.
    #[default]
    Unresolved,
    /// Empty lists are stored and never re-resolved.
    Resolved,
}

impl SettingValue {
    /// Truthiness gate for skipping resolution.
    pub fn is_truthy(&self, policy: EmptyListPolicy) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty() || policy == EmptyListPolicy::Resolved,
        }
    }

    /// String form substituted into the workshop settings template.
    /// Lists render as `["a", "b"]`: single quotes are normalized to double.
    pub fn to_template_string(&self) -> String {
        let raw = match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => {
                let quoted: Vec<String> = items.iter().map(|i| format!("'{}'", i)).collect();
                format!("[{}]", quoted.join(", "))
            }
        };
        raw.replace('\'', "\"")
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

// ============================================================================
// Settings map
// ============================================================================

/// The checkpointed settings. Owned by the orchestrator, lent to resolvers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: IndexMap<SettingName, Option<SettingValue>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: SettingName) -> Option<&SettingValue> {
        self.values.get(&name).and_then(|v| v.as_ref())
    }

    pub fn set(&mut self, name: SettingName, value: SettingValue) {
        self.values.insert(name, Some(value));
    }

    /// True iff the setting is present, non-null and truthy.
    pub fn is_resolved(&self, name: SettingName, policy: EmptyListPolicy) -> bool {
        self.get(name).is_some_and(|v| v.is_truthy(policy))
    }

    /// Text value of a setting a resolver depends on.
    pub fn require_text(&self, name: SettingName) -> Result<&str, String> {
        match self.get(name) {
            Some(SettingValue::Text(s)) if !s.is_empty() => Ok(s),
            Some(other) => Err(format!("setting {} is not a string: {}", name, other)),
            None => Err(format!("setting {} is not resolved yet", name)),
        }
    }

    /// Resolved entries in registry order.
    pub fn resolved(&self) -> impl Iterator<Item = (SettingName, &SettingValue)> {
        SettingName::ALL
            .iter()
            .filter_map(move |&n| self.get(n).map(|v| (n, v)))
    }

    /// Copy with every key present, in registry order; unresolved keys are null.
    pub fn completed(&self) -> Settings {
        let values = SettingName::ALL
            .iter()
            .map(|&n| (n, self.get(n).cloned()))
            .collect();
        Settings { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
