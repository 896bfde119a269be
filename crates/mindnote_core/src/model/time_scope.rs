//! Time scope used to restrict the mind to recently modified knowledge.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static TIME_SCOPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)y(\d+)m(\d+)d(\d+)h(\d+)m$").expect("valid time scope regex")
});

/// Relative time window `NyNmNdNhNm`; all zeros means "no scope".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeScope {
    pub years: u16,
    pub months: u16,
    pub days: u16,
    pub hours: u16,
    pub minutes: u16,
}

impl TimeScope {
    pub fn new(years: u16, months: u16, days: u16, hours: u16, minutes: u16) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
        }
    }

    /// Returns whether this scope restricts anything.
    pub fn is_enabled(&self) -> bool {
        *self != Self::default()
    }
}

impl Display for TimeScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}y{}m{}d{}h{}m",
            self.years, self.months, self.days, self.hours, self.minutes
        )
    }
}

/// Time scope text did not match `NyNmNdNhNm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeScopeParseError(pub String);

impl Display for TimeScopeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid time scope `{}` (expected e.g. 2y0m0d0h0m)", self.0)
    }
}

impl Error for TimeScopeParseError {}

impl FromStr for TimeScope {
    type Err = TimeScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let captures = TIME_SCOPE_RE
            .captures(trimmed)
            .ok_or_else(|| TimeScopeParseError(trimmed.to_string()))?;
        let part = |index: usize| -> Result<u16, TimeScopeParseError> {
            captures[index]
                .parse::<u16>()
                .map_err(|_| TimeScopeParseError(trimmed.to_string()))
        };
        Ok(Self {
            years: part(1)?,
            months: part(2)?,
            days: part(3)?,
            hours: part(4)?,
            minutes: part(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TimeScope;

    #[test]
    fn formats_and_parses_compact_form() {
        let scope = TimeScope::new(1, 2, 33, 4, 55);
        assert_eq!(scope.to_string(), "1y2m33d4h55m");
        assert_eq!(
            "1y2m33d4h55m"
                .parse::<TimeScope>()
                .expect("rendered scope should parse back"),
            scope
        );
    }

    #[test]
    fn default_scope_is_disabled() {
        assert_eq!(TimeScope::default().to_string(), "0y0m0d0h0m");
        assert!(!TimeScope::default().is_enabled());
    }

    #[test]
    fn rejects_partial_or_reordered_text() {
        assert!("2y0m".parse::<TimeScope>().is_err());
        assert!("0m2y0d0h0m".parse::<TimeScope>().is_err());
        assert!("99999y0m0d0h0m".parse::<TimeScope>().is_err());
        assert!("".parse::<TimeScope>().is_err());
    }
}
