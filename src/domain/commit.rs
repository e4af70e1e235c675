use std::fmt;

/// Recognized conventional commit types (case-sensitive, lowercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    Ci,
    Build,
    Revert,
}

impl CommitType {
    pub const ALL: [CommitType; 11] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
        CommitType::Ci,
        CommitType::Build,
        CommitType::Revert,
    ];

    /// Look up a type token. The match is exact: uppercase or unknown
    /// tokens are rejected by the parser.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "feat" => Some(CommitType::Feat),
            "fix" => Some(CommitType::Fix),
            "docs" => Some(CommitType::Docs),
            "style" => Some(CommitType::Style),
            "refactor" => Some(CommitType::Refactor),
            "perf" => Some(CommitType::Perf),
            "test" => Some(CommitType::Test),
            "chore" => Some(CommitType::Chore),
            "ci" => Some(CommitType::Ci),
            "build" => Some(CommitType::Build),
            "revert" => Some(CommitType::Revert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
            CommitType::Build => "build",
            CommitType::Revert => "revert",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `Token: value` (or `Token #value`) footer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub key: String,
    pub value: String,
}

impl Footer {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Footer {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Whether this footer marks a breaking change. The comparison is
    /// case-insensitive and accepts both the spaced and hyphenated spellings.
    pub fn is_breaking_marker(&self) -> bool {
        self.key.eq_ignore_ascii_case("BREAKING CHANGE")
            || self.key.eq_ignore_ascii_case("BREAKING-CHANGE")
    }
}

/// One parsed conventional commit. Read-only after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    /// True when the header carries `!` or a footer carries a breaking
    /// marker; the two signals are equivalent.
    pub breaking: bool,
    pub subject: String,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
    /// Original message, retained for audit and error reporting.
    pub raw: String,
}

impl CommitRecord {
    /// First footer value for a key (exact match).
    pub fn footer(&self, key: &str) -> Option<&str> {
        self.footers
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_token() {
        assert_eq!(CommitType::from_token("feat"), Some(CommitType::Feat));
        assert_eq!(CommitType::from_token("revert"), Some(CommitType::Revert));
        assert_eq!(CommitType::from_token("Feat"), None);
        assert_eq!(CommitType::from_token("feature"), None);
        assert_eq!(CommitType::from_token(""), None);
    }

    #[test]
    fn test_type_roundtrip() {
        for t in CommitType::ALL {
            assert_eq!(CommitType::from_token(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_breaking_marker() {
        assert!(Footer::new("BREAKING CHANGE", "x").is_breaking_marker());
        assert!(Footer::new("BREAKING-CHANGE", "x").is_breaking_marker());
        assert!(Footer::new("breaking change", "x").is_breaking_marker());
        assert!(!Footer::new("Closes", "12").is_breaking_marker());
    }

    #[test]
    fn test_footer_lookup() {
        let record = CommitRecord {
            commit_type: CommitType::Fix,
            scope: None,
            breaking: false,
            subject: "x".to_string(),
            body: None,
            footers: vec![Footer::new("Closes", "12"), Footer::new("Refs", "34")],
            raw: "fix: x".to_string(),
        };
        assert_eq!(record.footer("Closes"), Some("12"));
        assert_eq!(record.footer("Reviewed-By"), None);
    }
}
