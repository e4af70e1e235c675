//! Pre-release handling for semantic versioning
//!
//! Supports the alpha, beta and rc channels with a mandatory sequence number.
//! Ordering follows semver.org: https://semver.org/#spec-item-9

use crate::domain::version::Version;
use crate::error::{RelverError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release channel, ordered by maturity: alpha < beta < rc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Channel {
    Alpha,
    Beta,
    Rc,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Alpha => "alpha",
            Channel::Beta => "beta",
            Channel::Rc => "rc",
        }
    }
}

impl FromStr for Channel {
    type Err = RelverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alpha" => Ok(Channel::Alpha),
            "beta" => Ok(Channel::Beta),
            "rc" => Ok(Channel::Rc),
            other => Err(RelverError::version(format!(
                "Invalid pre-release channel: '{}' (expected alpha, beta or rc)",
                other
            ))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The channel a release run targets.
///
/// `Release` produces a bare `MAJOR.MINOR.PATCH` version; the other channels
/// attach a pre-release suffix to the computed version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    Alpha,
    Beta,
    Rc,
    Release,
}

impl ReleaseChannel {
    /// The pre-release channel to attach, or `None` for a full release.
    pub fn prerelease_channel(&self) -> Option<Channel> {
        match self {
            ReleaseChannel::Alpha => Some(Channel::Alpha),
            ReleaseChannel::Beta => Some(Channel::Beta),
            ReleaseChannel::Rc => Some(Channel::Rc),
            ReleaseChannel::Release => None,
        }
    }
}

impl FromStr for ReleaseChannel {
    type Err = RelverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "release" => Ok(ReleaseChannel::Release),
            other => other
                .parse::<Channel>()
                .map(|ch| match ch {
                    Channel::Alpha => ReleaseChannel::Alpha,
                    Channel::Beta => ReleaseChannel::Beta,
                    Channel::Rc => ReleaseChannel::Rc,
                })
                .map_err(|_| {
                    RelverError::version(format!(
                        "Invalid release channel: '{}' (expected alpha, beta, rc or release)",
                        other
                    ))
                }),
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prerelease_channel() {
            Some(ch) => ch.fmt(f),
            None => f.write_str("release"),
        }
    }
}

/// Pre-release suffix of a version, e.g. "beta.2".
///
/// The derived ordering compares channel first, then sequence, which is
/// exactly the required law: alpha.N < beta.M < rc.K for any N, M, K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Prerelease {
    pub channel: Channel,
    pub sequence: u32,
}

impl Prerelease {
    pub fn new(channel: Channel, sequence: u32) -> Self {
        Prerelease { channel, sequence }
    }

    /// Parse a pre-release suffix like "beta.1" or "rc.3".
    ///
    /// The sequence is mandatory and must be a positive integer.
    pub fn parse(s: &str) -> Result<Self> {
        let (channel, sequence) = s.split_once('.').ok_or_else(|| {
            RelverError::version(format!(
                "Invalid pre-release '{}': expected CHANNEL.SEQUENCE",
                s
            ))
        })?;

        let channel = channel.parse::<Channel>()?;
        let sequence = sequence.parse::<u32>().map_err(|_| {
            RelverError::version(format!("Invalid pre-release sequence: '{}'", sequence))
        })?;
        if sequence == 0 {
            return Err(RelverError::version(
                "Pre-release sequence must be a positive integer",
            ));
        }

        Ok(Prerelease { channel, sequence })
    }

    /// The next sequence on the same channel.
    pub fn increment(&self) -> Self {
        Prerelease {
            channel: self.channel,
            sequence: self.sequence + 1,
        }
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.channel, self.sequence)
    }
}

/// Attach a pre-release suffix to a base version.
///
/// If the prior pre-release for the same `(major, minor, patch)` is on the
/// same channel the sequence continues from it; switching channels (e.g.
/// alpha -> beta) or starting fresh resets the sequence to 1.
pub fn attach_prerelease(
    base: &Version,
    channel: Channel,
    prior: Option<&Prerelease>,
) -> Version {
    let suffix = match prior {
        Some(p) if p.channel == channel => p.increment(),
        _ => Prerelease::new(channel, 1),
    };
    Version::with_prerelease(base.major, base.minor, base.patch, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parse() {
        assert_eq!("alpha".parse::<Channel>().unwrap(), Channel::Alpha);
        assert_eq!("beta".parse::<Channel>().unwrap(), Channel::Beta);
        assert_eq!("rc".parse::<Channel>().unwrap(), Channel::Rc);
        assert!("gamma".parse::<Channel>().is_err());
        assert!("Beta".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_ordering() {
        assert!(Channel::Alpha < Channel::Beta);
        assert!(Channel::Beta < Channel::Rc);
    }

    #[test]
    fn test_release_channel_parse() {
        assert_eq!(
            "release".parse::<ReleaseChannel>().unwrap(),
            ReleaseChannel::Release
        );
        assert_eq!(
            "beta".parse::<ReleaseChannel>().unwrap(),
            ReleaseChannel::Beta
        );
        assert!("stable".parse::<ReleaseChannel>().is_err());
    }

    #[test]
    fn test_prerelease_parse() {
        let pr = Prerelease::parse("beta.1").unwrap();
        assert_eq!(pr.channel, Channel::Beta);
        assert_eq!(pr.sequence, 1);

        let pr = Prerelease::parse("rc.12").unwrap();
        assert_eq!(pr.channel, Channel::Rc);
        assert_eq!(pr.sequence, 12);
    }

    #[test]
    fn test_prerelease_parse_invalid() {
        assert!(Prerelease::parse("beta").is_err());
        assert!(Prerelease::parse("beta.abc").is_err());
        assert!(Prerelease::parse("beta.0").is_err());
        assert!(Prerelease::parse("dev.1").is_err());
        assert!(Prerelease::parse("").is_err());
    }

    #[test]
    fn test_prerelease_ordering() {
        let a1 = Prerelease::parse("alpha.1").unwrap();
        let a2 = Prerelease::parse("alpha.2").unwrap();
        let b1 = Prerelease::parse("beta.1").unwrap();
        let rc1 = Prerelease::parse("rc.1").unwrap();

        assert!(a1 < a2);
        assert!(a2 < b1);
        assert!(b1 < rc1);
    }

    #[test]
    fn test_prerelease_increment() {
        let pr = Prerelease::parse("beta.1").unwrap();
        assert_eq!(pr.increment(), Prerelease::new(Channel::Beta, 2));
    }

    #[test]
    fn test_prerelease_display() {
        assert_eq!(Prerelease::new(Channel::Rc, 2).to_string(), "rc.2");
    }

    #[test]
    fn test_attach_fresh() {
        let base = Version::new(1, 2, 0);
        let v = attach_prerelease(&base, Channel::Beta, None);
        assert_eq!(v.to_string(), "1.2.0-beta.1");
    }

    #[test]
    fn test_attach_same_channel_continues() {
        let base = Version::new(1, 2, 0);
        let prior = Prerelease::new(Channel::Beta, 1);
        let v = attach_prerelease(&base, Channel::Beta, Some(&prior));
        assert_eq!(v.to_string(), "1.2.0-beta.2");
    }

    #[test]
    fn test_attach_channel_switch_resets() {
        let base = Version::new(1, 2, 0);
        let prior = Prerelease::new(Channel::Alpha, 4);
        let v = attach_prerelease(&base, Channel::Beta, Some(&prior));
        assert_eq!(v.to_string(), "1.2.0-beta.1");
    }
}
