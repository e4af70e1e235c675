//! Change classification - maps a parsed commit to a bump severity and
//! extracts the issue references the changelog links to.

use crate::domain::{BumpClass, CommitRecord, CommitType};
use crate::parser::{self, ParsedMessage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How `revert:` commits are classified.
///
/// The reverted commit's class cannot be recovered from a git hash without
/// history access, so inheritance works off the revert subject instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevertPolicy {
    /// Reverts never trigger a release on their own.
    #[default]
    None,
    /// When the revert subject is itself a conventional header
    /// (`revert: feat(auth): add login`), inherit that header's class.
    InheritSubject,
}

/// Classifies commits into bump severities.
#[derive(Debug, Clone, Default)]
pub struct ChangeClassifier {
    revert_policy: RevertPolicy,
}

impl ChangeClassifier {
    pub fn new(revert_policy: RevertPolicy) -> Self {
        ChangeClassifier { revert_policy }
    }

    /// Classify one commit. Precedence, highest first: breaking, feat, fix,
    /// revert (per policy), everything else NONE.
    pub fn classify(&self, record: &CommitRecord) -> BumpClass {
        if record.breaking {
            return BumpClass::Major;
        }
        match record.commit_type {
            CommitType::Feat => BumpClass::Minor,
            CommitType::Fix => BumpClass::Patch,
            CommitType::Revert => self.classify_revert(record),
            _ => BumpClass::None,
        }
    }

    /// Aggregate class for a batch: the max over its commits, NONE when
    /// the batch is empty.
    pub fn aggregate(&self, records: &[CommitRecord]) -> BumpClass {
        records
            .iter()
            .map(|record| self.classify(record))
            .max()
            .unwrap_or(BumpClass::None)
    }

    fn classify_revert(&self, record: &CommitRecord) -> BumpClass {
        match self.revert_policy {
            RevertPolicy::None => BumpClass::None,
            RevertPolicy::InheritSubject => match parser::parse(&record.subject) {
                Ok(ParsedMessage::Conventional(inner)) => self.classify(&inner),
                _ => BumpClass::None,
            },
        }
    }
}

/// Kind of issue link a footer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Closes,
    Refs,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Closes => "Closes",
            RefKind::Refs => "Refs",
        }
    }
}

/// An issue reference extracted from a `Closes`/`Refs` footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub kind: RefKind,
    /// Issue id without the leading '#'.
    pub id: String,
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind.as_str(), self.id)
    }
}

/// Extract `Closes`/`Refs` footer values, in footer order.
pub fn issue_refs(record: &CommitRecord) -> Vec<IssueRef> {
    record
        .footers
        .iter()
        .filter_map(|footer| {
            let kind = match footer.key.as_str() {
                "Closes" => RefKind::Closes,
                "Refs" => RefKind::Refs,
                _ => return None,
            };
            let id = footer.value.trim().trim_start_matches('#').to_string();
            if id.is_empty() {
                None
            } else {
                Some(IssueRef { kind, id })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn record(raw: &str) -> CommitRecord {
        match parse(raw).unwrap() {
            ParsedMessage::Conventional(record) => record,
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn test_classify_feat_is_minor() {
        let classifier = ChangeClassifier::default();
        assert_eq!(classifier.classify(&record("feat: x")), BumpClass::Minor);
    }

    #[test]
    fn test_classify_fix_is_patch() {
        let classifier = ChangeClassifier::default();
        assert_eq!(classifier.classify(&record("fix: x")), BumpClass::Patch);
    }

    #[test]
    fn test_classify_breaking_wins_over_type() {
        let classifier = ChangeClassifier::default();
        assert_eq!(classifier.classify(&record("docs!: x")), BumpClass::Major);
        assert_eq!(
            classifier.classify(&record("fix: x\n\nBREAKING CHANGE: y")),
            BumpClass::Major
        );
    }

    #[test]
    fn test_classify_other_types_are_none() {
        let classifier = ChangeClassifier::default();
        for raw in [
            "docs: x", "style: x", "refactor: x", "perf: x", "test: x", "chore: x", "ci: x",
            "build: x",
        ] {
            assert_eq!(classifier.classify(&record(raw)), BumpClass::None, "{}", raw);
        }
    }

    #[test]
    fn test_classify_revert_default_none() {
        let classifier = ChangeClassifier::new(RevertPolicy::None);
        assert_eq!(
            classifier.classify(&record("revert: feat(auth): add login")),
            BumpClass::None
        );
    }

    #[test]
    fn test_classify_revert_inherits_subject() {
        let classifier = ChangeClassifier::new(RevertPolicy::InheritSubject);
        assert_eq!(
            classifier.classify(&record("revert: feat(auth): add login")),
            BumpClass::Minor
        );
        assert_eq!(
            classifier.classify(&record("revert: fix: patch leak")),
            BumpClass::Patch
        );
        // Unparseable subject falls back to NONE
        assert_eq!(
            classifier.classify(&record("revert: something freeform")),
            BumpClass::None
        );
    }

    #[test]
    fn test_aggregate_takes_max() {
        let classifier = ChangeClassifier::default();
        let records = vec![
            record("docs: a"),
            record("fix: b"),
            record("feat: c"),
        ];
        assert_eq!(classifier.aggregate(&records), BumpClass::Minor);
    }

    #[test]
    fn test_aggregate_empty_is_none() {
        let classifier = ChangeClassifier::default();
        assert_eq!(classifier.aggregate(&[]), BumpClass::None);
    }

    #[test]
    fn test_aggregate_monotonic_in_additions() {
        let classifier = ChangeClassifier::default();
        let mut records = vec![record("chore: a")];
        assert_eq!(classifier.aggregate(&records), BumpClass::None);

        records.push(record("feat: b"));
        assert!(classifier.aggregate(&records) >= BumpClass::Minor);

        records.push(record("chore!: c"));
        assert_eq!(classifier.aggregate(&records), BumpClass::Major);
    }

    #[test]
    fn test_issue_refs() {
        let record = record("fix: x\n\nCloses: 12\nRefs #34\nReviewed-By: someone");
        let refs = issue_refs(&record);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].to_string(), "Closes #12");
        assert_eq!(refs[1].to_string(), "Refs #34");
    }

    #[test]
    fn test_issue_refs_strip_hash() {
        let record = record("fix: x\n\nRefs: #7");
        assert_eq!(issue_refs(&record), vec![IssueRef {
            kind: RefKind::Refs,
            id: "7".to_string(),
        }]);
    }
}
