use crate::domain::version::Version;
use crate::error::{RelverError, Result};

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Format a version according to the pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    fn to_regex(&self) -> Result<regex::Regex> {
        if !self.pattern.contains("{version}") {
            return Err(RelverError::tag(
                "Pattern must contain {version} placeholder",
            ));
        }

        // Escape everything, then swap the placeholder for a version group
        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(
            r"\{version\}",
            r"(\d+\.\d+\.\d+(?:-(?:alpha|beta|rc)\.\d+)?)",
        );

        regex::Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|_| RelverError::tag("Invalid pattern"))
    }

    /// Validate if a tag matches this pattern
    pub fn matches(&self, tag: &str) -> Result<bool> {
        Ok(self.to_regex()?.is_match(tag))
    }

    /// Extract the version embedded in a tag ("v1.2.3" -> 1.2.3)
    pub fn extract(&self, tag: &str) -> Result<Option<Version>> {
        match self.to_regex()?.captures(tag) {
            Some(captures) => Version::parse(&captures[1]).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::new("v{version}");
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_prefix() {
        let pattern = TagPattern::new("release-{version}");
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "release-1.2.3");
    }

    #[test]
    fn test_pattern_format_prerelease() {
        let pattern = TagPattern::new("v{version}");
        let version = Version::parse("1.1.0-beta.2").unwrap();
        assert_eq!(pattern.format(&version), "v1.1.0-beta.2");
    }

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::new("v{version}");
        assert!(pattern.matches("v1.2.3").unwrap());
        assert!(pattern.matches("v1.2.3-rc.1").unwrap());
        assert!(!pattern.matches("release-1.2.3").unwrap());
        assert!(!pattern.matches("1.2.3").unwrap());
    }

    #[test]
    fn test_pattern_extract() {
        let pattern = TagPattern::new("v{version}");
        assert_eq!(
            pattern.extract("v1.2.3").unwrap(),
            Some(Version::new(1, 2, 3))
        );
        assert_eq!(
            pattern.extract("v1.2.3-beta.1").unwrap(),
            Some(Version::parse("1.2.3-beta.1").unwrap())
        );
        assert_eq!(pattern.extract("banana").unwrap(), None);
    }

    #[test]
    fn test_pattern_without_placeholder() {
        let pattern = TagPattern::new("v1.0.0");
        assert!(pattern.matches("v1.0.0").is_err());
    }
}
