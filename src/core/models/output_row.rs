use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::models::report::{Record, Report};

/// Column order of the output CSV. Written once, when the file is created.
pub const CSV_HEADER: [&str; 9] = [
    "report_id",
    "org_name",
    "begin_date",
    "end_date",
    "source_ip",
    "count",
    "disposition",
    "dkim",
    "spf",
];

/// One flattened CSV row: report metadata joined with a single record.
///
/// Field order matches `CSV_HEADER`. Absent values serialize as empty
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub report_id: Option<String>,
    pub org_name: Option<String>,
    pub begin_date: String,
    pub end_date: String,
    pub source_ip: Option<String>,
    pub count: Option<String>,
    pub disposition: Option<String>,
    pub dkim: Option<String>,
    pub spf: Option<String>,
}

impl OutputRow {
    pub fn new(report: &Report, record: &Record) -> Self {
        Self {
            report_id: report.report_id.clone(),
            org_name: report.org_name.clone(),
            begin_date: iso_timestamp(&report.date_range.begin),
            end_date: iso_timestamp(&report.date_range.end),
            source_ip: record.source_ip.clone(),
            count: record.count.clone(),
            disposition: record.disposition().map(str::to_string),
            dkim: record.dkim().map(str::to_string),
            spf: record.spf().map(str::to_string),
        }
    }

    /// Flatten a whole report, one row per record, in document order.
    pub fn from_report(report: &Report) -> Vec<Self> {
        report
            .records
            .iter()
            .map(|record| Self::new(report, record))
            .collect()
    }
}

/// Second-precision ISO-8601 without an offset suffix, e.g. `2023-11-14T22:13:20`.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}
