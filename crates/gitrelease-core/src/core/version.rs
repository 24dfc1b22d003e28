use crate::core::error::{GitReleaseError, GitReleaseResult};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Accepted version shape. Minor and patch may be omitted, a leading `v`
/// is allowed, and pre-release / build identifiers follow SemVer syntax.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("version regex is valid")
});

/// A parsed semantic version.
///
/// Parsing is lenient in the same way release tags tend to be: `8.2`
/// becomes `8.2.0` and `v1.0.0` is accepted. Precedence follows SemVer,
/// so build metadata never affects ordering or equality.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release version (e.g., "alpha.1", "RC1")
    pub prerelease: Option<String>,
    /// Build metadata (e.g., "build.123")
    pub build_metadata: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Parse a version string (e.g. "8.2.26", "v8.2", "8.3.0RC1" is rejected,
    /// "8.3.0-RC1" and "1.0.0-rc.1+build.456" are accepted).
    pub fn parse(s: &str) -> GitReleaseResult<Self> {
        let caps = VERSION_RE
            .captures(s)
            .ok_or_else(|| GitReleaseError::Version(format!("Invalid version format: {}", s)))?;

        let component = |idx: usize| -> GitReleaseResult<u64> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse().map_err(|_| {
                    GitReleaseError::Version(format!("Version component out of range: {}", s))
                }),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            prerelease: caps.get(4).map(|m| m.as_str().to_string()),
            build_metadata: caps.get(5).map(|m| m.as_str().to_string()),
        })
    }
}

// Build metadata is ignored for equality, matching precedence.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => compare_prerelease_identifiers(a, b),
            })
    }
}

/// Compare pre-release identifiers according to SemVer precedence rules
fn compare_prerelease_identifiers(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        let ordering = match (a_part.parse::<u64>(), b_part.parse::<u64>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a_part.cmp(b_part),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Version {
    type Err = GitReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
