//! Anchored relative-time interval specifications.
//!
//! An interval spec is an expression like `"START +15 MINUTE"`: the
//! anchor keyword followed by signed amount/unit terms. The anchor is
//! substituted with a concrete instant at evaluation time. Specs are
//! validated at setup; a spec without the anchor keyword never gets as
//! far as execution.

use chrono::{DateTime, Duration, Utc};

use probation_core::errors::ConfigError;

/// Placeholder token substituted with the anchor instant.
pub const ANCHOR_KEYWORD: &str = "START";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl Unit {
    fn parse(token: &str) -> Option<Self> {
        // Accept singular and plural forms, case-insensitive.
        let upper = token.to_ascii_uppercase();
        let base = upper.strip_suffix('S').unwrap_or(&upper);
        match base {
            "SECOND" => Some(Self::Second),
            "MINUTE" => Some(Self::Minute),
            "HOUR" => Some(Self::Hour),
            "DAY" => Some(Self::Day),
            "WEEK" => Some(Self::Week),
            _ => None,
        }
    }

    fn duration(self, amount: i64) -> Duration {
        match self {
            Self::Second => Duration::seconds(amount),
            Self::Minute => Duration::minutes(amount),
            Self::Hour => Duration::hours(amount),
            Self::Day => Duration::days(amount),
            Self::Week => Duration::weeks(amount),
        }
    }
}

/// A parsed, validated interval expression.
#[derive(Debug, Clone)]
pub struct IntervalSpec {
    source: String,
    terms: Vec<(i64, Unit)>,
}

impl IntervalSpec {
    /// Parse and validate a spec. Missing anchor keyword and malformed
    /// terms are configuration errors, fatal at setup time.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = spec.split_whitespace().collect();

        if !tokens
            .iter()
            .any(|t| t.eq_ignore_ascii_case(ANCHOR_KEYWORD))
        {
            return Err(ConfigError::MissingAnchor {
                spec: spec.to_string(),
                anchor: ANCHOR_KEYWORD,
            });
        }
        if !tokens[0].eq_ignore_ascii_case(ANCHOR_KEYWORD) {
            return Err(ConfigError::InvalidInterval {
                spec: spec.to_string(),
                reason: format!("'{ANCHOR_KEYWORD}' must lead the expression"),
            });
        }

        let invalid = |reason: String| ConfigError::InvalidInterval {
            spec: spec.to_string(),
            reason,
        };

        let mut terms = Vec::new();
        let mut rest = tokens[1..].iter();
        while let Some(amount_token) = rest.next() {
            let amount: i64 = amount_token
                .parse()
                .map_err(|_| invalid(format!("expected signed amount, found '{amount_token}'")))?;
            let unit_token = rest
                .next()
                .ok_or_else(|| invalid(format!("amount '{amount_token}' has no unit")))?;
            let unit = Unit::parse(unit_token)
                .ok_or_else(|| invalid(format!("unknown unit '{unit_token}'")))?;
            terms.push((amount, unit));
        }

        Ok(Self {
            source: spec.to_string(),
            terms,
        })
    }

    /// Substitute the anchor and evaluate to an absolute deadline.
    pub fn deadline(&self, anchor: DateTime<Utc>) -> DateTime<Utc> {
        self.terms
            .iter()
            .fold(anchor, |at, &(amount, unit)| at + unit.duration(amount))
    }

    /// The original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }
}
