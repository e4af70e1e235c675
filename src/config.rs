use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::classifier::RevertPolicy;
use crate::domain::TagPattern;
use crate::error::{RelverError, Result};
use crate::policy::BranchPolicy;

/// Represents the complete configuration for relver.
///
/// Contains the branch policy table, revert classification policy, and tag
/// formatting pattern.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub revert: RevertConfig,

    /// Phase name -> allowed commit types. `["*"]` means any type, an
    /// empty list means none. Phases not listed keep their defaults.
    #[serde(default = "default_policy_table")]
    pub policy: HashMap<String, Vec<String>>,
}

/// Tag formatting configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
        }
    }
}

/// Revert classification configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RevertConfig {
    #[serde(default)]
    pub policy: RevertPolicy,
}

/// Returns the default phase -> allowed-types table.
fn default_policy_table() -> HashMap<String, Vec<String>> {
    let mut table = HashMap::new();
    table.insert("feature".to_string(), vec!["*".to_string()]);
    table.insert(
        "bugfix".to_string(),
        vec!["fix".to_string(), "test".to_string(), "docs".to_string()],
    );
    table.insert(
        "release".to_string(),
        vec!["fix".to_string(), "docs".to_string(), "chore".to_string()],
    );
    table.insert("hotfix".to_string(), vec!["fix".to_string()]);
    table.insert("main".to_string(), vec![]);
    table
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag: TagConfig::default(),
            revert: RevertConfig::default(),
            policy: default_policy_table(),
        }
    }
}

impl Config {
    pub fn tag_pattern(&self) -> TagPattern {
        TagPattern::new(&self.tag.pattern)
    }

    /// Build the validated branch policy from the config table.
    pub fn branch_policy(&self) -> Result<BranchPolicy> {
        BranchPolicy::from_table(&self.policy)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relver.toml` in current directory
/// 3. `~/.config/.relver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./relver.toml").exists() {
        fs::read_to_string("./relver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".relver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| RelverError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommitType;
    use crate::policy::Phase;

    #[test]
    fn test_default_policy_matches_spec_table() {
        let policy = Config::default().branch_policy().unwrap();
        assert!(policy.allows(Phase::Feature, CommitType::Feat));
        assert!(!policy.allows(Phase::Release, CommitType::Feat));
        assert!(policy.allows(Phase::Release, CommitType::Chore));
        assert!(policy.allows(Phase::Hotfix, CommitType::Fix));
        assert!(!policy.allows(Phase::Main, CommitType::Fix));
    }

    #[test]
    fn test_default_tag_pattern() {
        let config = Config::default();
        assert_eq!(config.tag.pattern, "v{version}");
    }

    #[test]
    fn test_default_revert_policy() {
        let config = Config::default();
        assert_eq!(config.revert.policy, RevertPolicy::None);
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
[tag]
pattern = "release-{version}"

[revert]
policy = "inherit-subject"

[policy]
release = ["fix"]
"#,
        )
        .unwrap();

        assert_eq!(config.tag.pattern, "release-{version}");
        assert_eq!(config.revert.policy, RevertPolicy::InheritSubject);

        let policy = config.branch_policy().unwrap();
        assert!(!policy.allows(Phase::Release, CommitType::Docs));
        assert!(policy.allows(Phase::Release, CommitType::Fix));
    }
}
