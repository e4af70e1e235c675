use crate::domain::bump::BumpClass;
use crate::domain::prerelease::Prerelease;
use crate::error::{RelverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version with an optional pre-release suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Option<Prerelease>,
}

impl Version {
    /// Create a release version (no pre-release suffix)
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Create a pre-release version
    pub fn with_prerelease(major: u32, minor: u32, patch: u32, prerelease: Prerelease) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Some(prerelease),
        }
    }

    /// Parse a version string (e.g., "1.2.3", "v1.2.3", "1.2.3-beta.1")
    pub fn parse(input: &str) -> Result<Self> {
        // Tolerate 'v'/'V' tag prefixes
        let clean = input
            .trim()
            .trim_start_matches('v')
            .trim_start_matches('V');

        let (core, suffix) = match clean.split_once('-') {
            Some((core, suffix)) => (core, Some(suffix)),
            None => (clean, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(RelverError::version(format!(
                "Invalid version format: '{}' - expected MAJOR.MINOR.PATCH",
                input
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| RelverError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| RelverError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| RelverError::version(format!("Invalid patch version: {}", parts[2])))?;

        let prerelease = suffix.map(Prerelease::parse).transpose()?;

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// The version with any pre-release suffix removed
    pub fn core(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Whether two versions share the same (major, minor, patch) triple
    pub fn same_core(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// Apply exactly one increment according to the bump class.
    ///
    /// The result never carries a pre-release suffix; attaching one is a
    /// separate step. A `None` bump returns the version unchanged.
    pub fn bump(&self, class: BumpClass) -> Self {
        match class {
            BumpClass::Major => Version::new(self.major + 1, 0, 0),
            BumpClass::Minor => Version::new(self.major, self.minor + 1, 0),
            BumpClass::Patch => Version::new(self.major, self.minor, self.patch + 1),
            BumpClass::None => self.clone(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = RelverError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

// A release version is greater than any pre-release with the same core, and
// pre-releases order by channel then sequence. Implemented by hand because a
// derived Ord would sort `None` below `Some`.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
