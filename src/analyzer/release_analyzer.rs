use crate::changelog::{self, ChangelogDocument};
use crate::classifier::ChangeClassifier;
use crate::config::Config;
use crate::domain::{attach_prerelease, BumpClass, CommitRecord, ReleaseChannel, Version};
use crate::error::{RelverError, Result};
use crate::parser::{self, IgnoredCommit, ParseError, ParsedMessage};
use crate::policy::{BranchPolicy, GateViolation, Phase};

/// Context for one analysis run. Each run is a pure function of this
/// context plus the message batch; nothing is carried across runs.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Last released version (the baseline for the increment).
    pub current: Version,
    pub channel: ReleaseChannel,
    pub phase: Phase,
    /// Most recent pre-release published on the way to the upcoming
    /// version, if any. Ignored unless its core matches the bump target.
    pub prior_prerelease: Option<Version>,
    /// When set, an empty batch is an error instead of a NONE-bump no-op.
    pub require_commits: bool,
}

/// Where the version moves and why. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDecision {
    pub from: Version,
    pub to: Version,
    pub bump: BumpClass,
    /// Contributing commits, in input order.
    pub triggering_commits: Vec<CommitRecord>,
}

impl ReleaseDecision {
    /// A NONE-bump decision: the caller must not tag.
    pub fn is_noop(&self) -> bool {
        self.bump == BumpClass::None
    }
}

/// Everything one run produces: the decision, the changelog, and every
/// per-commit rejection collected along the way.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub decision: ReleaseDecision,
    pub changelog: ChangelogDocument,
    pub parse_errors: Vec<ParseError>,
    pub gate_violations: Vec<GateViolation>,
    pub ignored: Vec<IgnoredCommit>,
}

impl BatchReport {
    pub fn has_rejections(&self) -> bool {
        !self.parse_errors.is_empty() || !self.gate_violations.is_empty()
    }
}

/// Folds a commit batch into a release decision.
pub struct ReleaseAnalyzer {
    classifier: ChangeClassifier,
    policy: BranchPolicy,
}

impl ReleaseAnalyzer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ReleaseAnalyzer {
            classifier: ChangeClassifier::new(config.revert.policy),
            policy: config.branch_policy()?,
        })
    }

    pub fn from_parts(classifier: ChangeClassifier, policy: BranchPolicy) -> Self {
        ReleaseAnalyzer { classifier, policy }
    }

    /// Run the full pipeline over raw messages: parse, gate, classify,
    /// decide, aggregate the changelog.
    ///
    /// Malformed messages and gate rejections do not abort the batch; they
    /// are collected into the report and the offending commits are excluded
    /// from bump computation and the changelog.
    pub fn analyze(&self, messages: &[String], ctx: &RunContext) -> Result<BatchReport> {
        if ctx.require_commits && messages.is_empty() {
            return Err(RelverError::EmptyBatch);
        }

        let mut records = Vec::new();
        let mut parse_errors = Vec::new();
        let mut gate_violations = Vec::new();
        let mut ignored = Vec::new();

        for raw in messages {
            match parser::parse(raw) {
                Ok(ParsedMessage::Conventional(record)) => {
                    let gate = self.policy.check(&record, ctx.phase);
                    if gate.allowed {
                        records.push(record);
                    } else {
                        gate_violations.push(GateViolation::new(&record, &gate));
                    }
                }
                Ok(ParsedMessage::Ignored(skipped)) => ignored.push(skipped),
                Err(error) => parse_errors.push(error),
            }
        }

        let decision = self.next_version(
            &ctx.current,
            &records,
            ctx.channel,
            ctx.prior_prerelease.as_ref(),
        )?;
        let changelog = changelog::render(&records);

        Ok(BatchReport {
            decision,
            changelog,
            parse_errors,
            gate_violations,
            ignored,
        })
    }

    /// Compute the next version for an already-parsed batch.
    ///
    /// The aggregate bump class is the max over per-commit classes; NONE
    /// yields a no-op decision with `to == current`. Otherwise exactly one
    /// increment applies, and non-release channels get a pre-release suffix
    /// whose sequence continues any prior pre-release on the same channel
    /// for the same target version.
    pub fn next_version(
        &self,
        current: &Version,
        commits: &[CommitRecord],
        channel: ReleaseChannel,
        prior_prerelease: Option<&Version>,
    ) -> Result<ReleaseDecision> {
        let bump = self.classifier.aggregate(commits);
        if bump == BumpClass::None {
            return Ok(ReleaseDecision {
                from: current.clone(),
                to: current.clone(),
                bump,
                triggering_commits: commits.to_vec(),
            });
        }

        let target = current.bump(bump);
        let to = match channel.prerelease_channel() {
            Some(prerelease_channel) => {
                let prior = prior_prerelease
                    .filter(|p| p.same_core(&target))
                    .and_then(|p| p.prerelease);
                attach_prerelease(&target, prerelease_channel, prior.as_ref())
            }
            None => target,
        };

        Ok(ReleaseDecision {
            from: current.clone(),
            to,
            bump,
            triggering_commits: commits.to_vec(),
        })
    }
}
