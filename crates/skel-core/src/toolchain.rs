//! Go toolchain detection for freshly rendered projects.
//!
//! The builtin template sets scaffold Go starter projects, so after a
//! render the CLI reports whether a usable `go` toolchain is present.
//! Detection is best-effort: a missing tool, a failing `go version`, or
//! unparseable output all degrade to a hint, never an error — the
//! scaffolding itself succeeded regardless.

use std::fmt;
use std::process::Command;

/// A semver-like version with major.minor.patch components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// What the generated `go.mod` declares; older toolchains get a hint.
pub const GO_MINIMUM: Version = Version {
    major: 1,
    minor: 21,
    patch: 0,
};

impl Version {
    /// Parse the first `X.Y.Z` pattern found in a string.
    ///
    /// Handles the formats version banners actually produce:
    /// - `"1.22.1"`
    /// - `"go version go1.22.1 linux/amd64"`
    /// - `"v1.21.0"`
    pub fn parse(s: &str) -> Option<Self> {
        for (i, c) in s.char_indices() {
            if c.is_ascii_digit() {
                if let Some(version) = Self::parse_at(&s[i..]) {
                    return Some(version);
                }
            }
        }
        None
    }

    /// Try to parse `X.Y.Z` at the start of `s`. The patch component may
    /// carry trailing non-digit text (`"1 linux/amd64"`, `"0-rc1"`).
    fn parse_at(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, '.');
        let major: u32 = parts.next()?.parse().ok()?;
        let minor: u32 = parts.next()?.parse().ok()?;
        let patch_digits: String = parts
            .next()?
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if patch_digits.is_empty() {
            return None;
        }
        let patch: u32 = patch_digits.parse().ok()?;
        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Outcome of the Go toolchain check after a render.
#[derive(Debug, Clone)]
pub struct ToolchainReport {
    pub found: bool,
    pub version: Option<Version>,
    pub below_minimum: bool,
}

/// Look up `go` on PATH and parse its version banner.
pub fn check_go() -> ToolchainReport {
    if which::which("go").is_err() {
        return ToolchainReport {
            found: false,
            version: None,
            below_minimum: false,
        };
    }

    let version = detect_version("go");
    let below_minimum = version.map(|v| v < GO_MINIMUM).unwrap_or(false);
    ToolchainReport {
        found: true,
        version,
        below_minimum,
    }
}

/// Run `<tool> version` and parse the output for an `X.Y.Z` pattern.
///
/// Returns `None` if the tool cannot be run, exits with an error, or
/// produces output with no parseable version in it.
pub fn detect_version(tool: &str) -> Option<Version> {
    let output = Command::new(tool).arg("version").output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if let Some(version) = Version::parse(&stdout) {
        return Some(version);
    }
    // Some tools print their banner to stderr.
    let stderr = String::from_utf8_lossy(&output.stderr);
    Version::parse(&stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(
            Version::parse("1.22.1"),
            Some(Version {
                major: 1,
                minor: 22,
                patch: 1
            })
        );
    }

    #[test]
    fn test_parse_go_banner() {
        assert_eq!(
            Version::parse("go version go1.22.1 linux/amd64"),
            Some(Version {
                major: 1,
                minor: 22,
                patch: 1
            })
        );
    }

    #[test]
    fn test_parse_v_prefix_and_suffix() {
        assert_eq!(
            Version::parse("v1.21.0-rc1"),
            Some(Version {
                major: 1,
                minor: 21,
                patch: 0
            })
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("no version here").is_none());
        assert!(Version::parse("1.21").is_none());
    }

    #[test]
    fn test_ordering_against_minimum() {
        let old = Version {
            major: 1,
            minor: 20,
            patch: 14,
        };
        let new = Version {
            major: 1,
            minor: 22,
            patch: 0,
        };
        assert!(old < GO_MINIMUM);
        assert!(new > GO_MINIMUM);
        assert_eq!(GO_MINIMUM.to_string(), "1.21.0");
    }

    #[test]
    fn test_detect_version_nonexistent_tool() {
        assert!(detect_version("this_tool_does_not_exist_xyz").is_none());
    }
}
