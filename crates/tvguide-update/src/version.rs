//! Semantic version parsing and precedence.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// A parsed semantic version (`MAJOR.MINOR.PATCH[-PRERELEASE]`).
///
/// A leading `v`/`V` and trailing build metadata (`+...`) are accepted and
/// ignored; omitted minor/patch components default to `0` (release tags in
/// the wild are frequently two-part).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
    /// Pre-release identifiers (`rc.1` in `1.2.3-rc.1`).
    pub pre: Option<String>,
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        if trimmed.is_empty() {
            bail!("empty version string");
        }

        // Build metadata does not participate in precedence.
        let without_build = trimmed.split_once('+').map_or(trimmed, |(core, _)| core);

        let (core, pre) = match without_build.split_once('-') {
            Some((_, p)) if p.is_empty() => bail!("empty pre-release in version: {s:?}"),
            Some((core, p)) => (core, Some(String::from(p))),
            None => (without_build, None),
        };

        let mut parts = core.split('.');
        let major = parse_component(parts.next(), s)?;
        let minor = parts.next().map_or(Ok(0), |p| parse_component(Some(p), s))?;
        let patch = parts.next().map_or(Ok(0), |p| parse_component(Some(p), s))?;
        if parts.next().is_some() {
            bail!("too many components in version: {s:?}");
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }
}

/// Parses one numeric version component.
fn parse_component(part: Option<&str>, original: &str) -> Result<u64> {
    let part = part.filter(|p| !p.is_empty());
    let part = part.with_context(|| format!("missing component in version: {original:?}"))?;
    part.parse::<u64>()
        .with_context(|| format!("invalid component {part:?} in version: {original:?}"))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                // A pre-release sorts before its release.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_pre(a, b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares dot-separated pre-release identifiers.
///
/// Numeric identifiers compare numerically and rank below alphanumeric
/// ones; a shorter identifier list ranks below a longer one with the same
/// prefix.
fn compare_pre(a: &str, b: &str) -> Ordering {
    let mut a_parts = a.split('.');
    let mut b_parts = b.split('.');
    loop {
        match (a_parts.next(), b_parts.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(xn), Ok(yn)) => xn.cmp(&yn),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
