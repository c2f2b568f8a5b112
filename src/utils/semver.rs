use crate::error::{BumpError, Result};
use std::fmt;
use std::str::FromStr;

/// A two-component `major.minor` version.
///
/// The major component keeps its text as written (`01` stays `01`); only the
/// minor component is ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: String,
    pub minor: u64,
}

impl Version {
    pub fn next_minor(&self) -> Result<Version> {
        let minor = self
            .minor
            .checked_add(1)
            .ok_or_else(|| BumpError::invalid_version(&self.to_string(), "minor overflow"))?;
        Ok(Version {
            major: self.major.clone(),
            minor,
        })
    }
}

impl FromStr for Version {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('.');
        let major = parts.next().unwrap_or("");
        let minor = parts
            .next()
            .ok_or_else(|| BumpError::invalid_version(s, "expected <major>.<minor>"))?;
        if parts.next().is_some() {
            return Err(BumpError::invalid_version(
                s,
                "expected exactly two components",
            ));
        }

        parse_component(s, major, "major")?;
        Ok(Version {
            major: major.to_string(),
            minor: parse_component(s, minor, "minor")?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

fn parse_component(full: &str, part: &str, name: &str) -> Result<u64> {
    // u64::from_str accepts a leading '+', which is not a version digit
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BumpError::invalid_version(
            full,
            format!("{} component '{}' is not a non-negative integer", name, part),
        ));
    }
    part.parse::<u64>()
        .map_err(|e| BumpError::invalid_version(full, format!("{} component: {}", name, e)))
}

/// Increments the minor component of `current`.
pub fn compute_next_version(current: &str) -> Result<String> {
    let version: Version = current.parse()?;
    Ok(version.next_minor()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bumps_minor() {
        assert_eq!(compute_next_version("1.14").unwrap(), "1.15");
        assert_eq!(compute_next_version("0.9").unwrap(), "0.10");
        assert_eq!(compute_next_version("3.0").unwrap(), "3.1");
    }

    #[test]
    fn repeated_bumps_strictly_increase() {
        let first = compute_next_version("2.3").unwrap();
        let second = compute_next_version(&first).unwrap();
        assert_eq!(first, "2.4");
        assert_eq!(second, "2.5");
        assert!(second.parse::<Version>().unwrap().minor > first.parse::<Version>().unwrap().minor);
    }

    #[test]
    fn major_text_is_kept_verbatim() {
        assert_eq!(compute_next_version("01.5").unwrap(), "01.6");
        assert_eq!(compute_next_version("007.09").unwrap(), "007.10");
        let v: Version = "01.5".parse().unwrap();
        assert_eq!(v.major, "01");
        assert_eq!(v.to_string(), "01.5");
    }

    #[test]
    fn rejects_missing_minor() {
        let err = compute_next_version("2").unwrap_err();
        assert!(matches!(err, BumpError::InvalidVersionFormat { .. }));
    }

    #[test]
    fn rejects_non_numeric_and_extra_parts() {
        for bad in ["1.x", "a.1", "1.2.3", "", ".", "1.", "1.-2", "1.+2", " 1.2"] {
            assert!(
                matches!(
                    compute_next_version(bad),
                    Err(BumpError::InvalidVersionFormat { .. })
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn rejects_minor_overflow() {
        let v = format!("1.{}", u64::MAX);
        assert!(compute_next_version(&v).is_err());
    }
}
