//! Branch policy gate - which commit types a branch phase accepts.
//!
//! The phase table is data, not code: the defaults below can be overridden
//! from the configuration file without touching classification logic.

use crate::domain::{CommitRecord, CommitType};
use crate::error::{RelverError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of the branch a commit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Feature,
    Bugfix,
    Release,
    Hotfix,
    Main,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Feature,
        Phase::Bugfix,
        Phase::Release,
        Phase::Hotfix,
        Phase::Main,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Feature => "feature",
            Phase::Bugfix => "bugfix",
            Phase::Release => "release",
            Phase::Hotfix => "hotfix",
            Phase::Main => "main",
        }
    }
}

impl FromStr for Phase {
    type Err = RelverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "feature" => Ok(Phase::Feature),
            "bugfix" => Ok(Phase::Bugfix),
            "release" => Ok(Phase::Release),
            "hotfix" => Ok(Phase::Hotfix),
            "main" => Ok(Phase::Main),
            other => Err(RelverError::config(format!(
                "Unknown branch phase: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of commit types one phase accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRule {
    /// Every commit type is allowed.
    Any,
    /// No direct commits at all (main only receives merges).
    None,
    /// Only the listed types.
    Only(Vec<CommitType>),
}

impl TypeRule {
    fn allows(&self, commit_type: CommitType) -> bool {
        match self {
            TypeRule::Any => true,
            TypeRule::None => false,
            TypeRule::Only(types) => types.contains(&commit_type),
        }
    }
}

/// Outcome of gating one commit against a branch phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResult {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl GateResult {
    fn allow() -> Self {
        GateResult {
            allowed: true,
            reason: None,
        }
    }

    fn reject(reason: String) -> Self {
        GateResult {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// A rejected commit paired with the reason, for batch reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateViolation {
    pub raw: String,
    pub reason: String,
}

impl GateViolation {
    pub fn new(record: &CommitRecord, result: &GateResult) -> Self {
        GateViolation {
            raw: record.raw.clone(),
            reason: result
                .reason
                .clone()
                .unwrap_or_else(|| "commit rejected by branch policy".to_string()),
        }
    }
}

/// Phase -> allowed-types table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPolicy {
    rules: HashMap<Phase, TypeRule>,
}

impl Default for BranchPolicy {
    fn default() -> Self {
        let mut rules = HashMap::new();
        rules.insert(Phase::Feature, TypeRule::Any);
        rules.insert(
            Phase::Bugfix,
            TypeRule::Only(vec![CommitType::Fix, CommitType::Test, CommitType::Docs]),
        );
        rules.insert(
            Phase::Release,
            TypeRule::Only(vec![CommitType::Fix, CommitType::Docs, CommitType::Chore]),
        );
        rules.insert(Phase::Hotfix, TypeRule::Only(vec![CommitType::Fix]));
        rules.insert(Phase::Main, TypeRule::None);
        BranchPolicy { rules }
    }
}

impl BranchPolicy {
    /// Build a policy from a config table mapping phase names to type-name
    /// lists. `["*"]` means any type, an empty list means none. Phases not
    /// named keep their defaults.
    pub fn from_table(table: &HashMap<String, Vec<String>>) -> Result<Self> {
        let mut policy = BranchPolicy::default();
        for (phase_name, type_names) in table {
            let phase: Phase = phase_name.parse()?;
            let rule = if type_names.iter().any(|t| t == "*") {
                TypeRule::Any
            } else if type_names.is_empty() {
                TypeRule::None
            } else {
                let mut types = Vec::with_capacity(type_names.len());
                for name in type_names {
                    let commit_type = CommitType::from_token(name).ok_or_else(|| {
                        RelverError::config(format!(
                            "Unknown commit type '{}' in policy for phase '{}'",
                            name, phase_name
                        ))
                    })?;
                    types.push(commit_type);
                }
                TypeRule::Only(types)
            };
            policy.rules.insert(phase, rule);
        }
        Ok(policy)
    }

    pub fn allows(&self, phase: Phase, commit_type: CommitType) -> bool {
        self.rules
            .get(&phase)
            .map(|rule| rule.allows(commit_type))
            .unwrap_or(false)
    }

    /// Gate one commit. Rejections are non-fatal: the caller collects them
    /// and excludes the commit from the rest of the run.
    pub fn check(&self, record: &CommitRecord, phase: Phase) -> GateResult {
        if self.allows(phase, record.commit_type) {
            return GateResult::allow();
        }
        let reason = match phase {
            Phase::Main => {
                "direct commits to main are not allowed; main only receives merges".to_string()
            }
            _ => format!(
                "commit type '{}' is not allowed on a {} branch",
                record.commit_type, phase
            ),
        };
        GateResult::reject(reason)
    }
}
