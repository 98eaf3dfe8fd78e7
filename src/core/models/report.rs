use chrono::{DateTime, Utc};

use crate::core::errors::{DmarcError, Result};

/// The `<policy_evaluated>` block of a record row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyEvaluated {
    pub disposition: Option<String>,
    pub dkim: Option<String>,
    pub spf: Option<String>,
}

/// One `<record>` of an aggregate report.
///
/// Values are kept verbatim as they appear in the XML; `count` is not
/// parsed into an integer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub source_ip: Option<String>,
    pub count: Option<String>,
    /// `None` when the row carries no `<policy_evaluated>` element.
    pub policy: Option<PolicyEvaluated>,
}

impl Record {
    pub fn disposition(&self) -> Option<&str> {
        self.policy.as_ref().and_then(|p| p.disposition.as_deref())
    }

    pub fn dkim(&self) -> Option<&str> {
        self.policy.as_ref().and_then(|p| p.dkim.as_deref())
    }

    pub fn spf(&self) -> Option<&str> {
        self.policy.as_ref().and_then(|p| p.spf.as_deref())
    }
}

/// Reporting window of an aggregate report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range from the raw `<begin>` / `<end>` text.
    pub fn from_epoch_text(begin: &str, end: &str) -> Result<Self> {
        Ok(Self {
            begin: parse_epoch_seconds("begin", begin)?,
            end: parse_epoch_seconds("end", end)?,
        })
    }
}

/// A parsed DMARC aggregate report: metadata plus its records.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub org_name: Option<String>,
    pub report_id: Option<String>,
    pub date_range: DateRange,
    pub records: Vec<Record>,
    /// Number of `<record>` elements dropped because they had no `<row>`.
    pub skipped_records: usize,
}

/// Convert epoch-seconds text into a UTC instant.
///
/// Leading and trailing whitespace is ignored. Anything else that is not a
/// representable integer second count is a `MalformedTimestamp`.
pub fn parse_epoch_seconds(boundary: &'static str, text: &str) -> Result<DateTime<Utc>> {
    let malformed = || DmarcError::MalformedTimestamp {
        boundary,
        value: text.to_string(),
    };

    let secs: i64 = text.trim().parse().map_err(|_| malformed())?;
    DateTime::from_timestamp(secs, 0).ok_or_else(malformed)
}
