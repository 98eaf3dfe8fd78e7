use roxmltree::{Document, Node, ParsingOptions};

use crate::adapters::parsers::xml_encoding::decode_document;
use crate::adapters::parsers::xml_fields::ElementExt;
use crate::core::errors::{DmarcError, Result};
use crate::core::models::outline::DocumentOutline;
use crate::core::models::report::{DateRange, PolicyEvaluated, Record, Report};
use crate::core::traits::parser::{Extraction, ReportParser};

/// Reads DMARC aggregate reports (RFC 7489 appendix C layout).
///
/// Only the fields needed for the flattened CSV are read:
/// - `report_metadata/{org_name, report_id, date_range/begin, date_range/end}`
/// - `record/row/{source_ip, count, policy_evaluated/{disposition, dkim, spf}}`
///
/// Everything else in the document is ignored and nothing is validated
/// against the DMARC schema.
pub struct XmlReportParser;

impl XmlReportParser {
    fn read_report(root: Node) -> Result<Report> {
        let metadata = root
            .child_element("report_metadata")
            .ok_or(DmarcError::MissingMetadata)?;

        let begin = metadata
            .find_path(&["date_range", "begin"])
            .ok_or(DmarcError::MissingDateRange { boundary: "begin" })?;
        let end = metadata
            .find_path(&["date_range", "end"])
            .ok_or(DmarcError::MissingDateRange { boundary: "end" })?;

        let date_range = DateRange::from_epoch_text(
            begin.text().unwrap_or_default(),
            end.text().unwrap_or_default(),
        )?;

        let mut records = Vec::new();
        let mut skipped_records = 0;
        for element in root.child_elements("record") {
            match Self::read_record(element) {
                Some(record) => records.push(record),
                None => skipped_records += 1,
            }
        }

        Ok(Report {
            org_name: metadata.field("org_name"),
            report_id: metadata.field("report_id"),
            date_range,
            records,
            skipped_records,
        })
    }

    /// A `<record>` without a `<row>` carries nothing to flatten.
    fn read_record(element: Node) -> Option<Record> {
        let row = element.child_element("row")?;

        let policy = row
            .child_element("policy_evaluated")
            .map(|policy| PolicyEvaluated {
                disposition: policy.field("disposition"),
                dkim: policy.field("dkim"),
                spf: policy.field("spf"),
            });

        Some(Record {
            source_ip: row.field("source_ip"),
            count: row.field("count"),
            policy,
        })
    }
}

impl ReportParser for XmlReportParser {
    fn extract(&self, content: &[u8]) -> Result<Extraction> {
        let text = decode_document(content)?;

        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(&text, options).map_err(|e| {
            DmarcError::ParseError {
                detail: e.to_string(),
            }
        })?;

        let root = doc.root_element();
        let outline = DocumentOutline {
            root_tag: root.tag_name().name().to_string(),
            child_tags: root.child_tags(),
        };

        Ok(Extraction {
            outline,
            report: Self::read_report(root),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &[".xml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<feedback>
  <report_metadata>
    <org_name>ExampleCorp</org_name>
    <email>noreply-dmarc@example.com</email>
    <report_id>r1</report_id>
    <date_range>
      <begin>1700000000</begin>
      <end>1700003600</end>
    </date_range>
  </report_metadata>
  <policy_published>
    <domain>example.org</domain>
    <p>none</p>
  </policy_published>
  <record>
    <row>
      <source_ip>1.2.3.4</source_ip>
      <count>5</count>
      <policy_evaluated>
        <disposition>none</disposition>
        <dkim>pass</dkim>
        <spf>fail</spf>
      </policy_evaluated>
    </row>
    <identifiers><header_from>example.org</header_from></identifiers>
  </record>
  <record>
    <row>
      <source_ip>2001:db8::1</source_ip>
      <count>2</count>
    </row>
  </record>
</feedback>"#;

    fn report(xml: &str) -> Result<Report> {
        XmlReportParser.extract(xml.as_bytes()).unwrap().report
    }

    #[test]
    fn extracts_metadata_and_records() {
        let report = report(FULL_REPORT).unwrap();

        assert_eq!(report.org_name.as_deref(), Some("ExampleCorp"));
        assert_eq!(report.report_id.as_deref(), Some("r1"));
        assert_eq!(report.date_range.begin.timestamp(), 1_700_000_000);
        assert_eq!(report.date_range.end.timestamp(), 1_700_003_600);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped_records, 0);

        let first = &report.records[0];
        assert_eq!(first.source_ip.as_deref(), Some("1.2.3.4"));
        assert_eq!(first.count.as_deref(), Some("5"));
        assert_eq!(first.disposition(), Some("none"));
        assert_eq!(first.dkim(), Some("pass"));
        assert_eq!(first.spf(), Some("fail"));
    }

    #[test]
    fn record_without_policy_has_null_policy_fields() {
        let report = report(FULL_REPORT).unwrap();
        let second = &report.records[1];

        assert_eq!(second.source_ip.as_deref(), Some("2001:db8::1"));
        assert!(second.policy.is_none());
    }

    #[test]
    fn outline_lists_root_children() {
        let extraction = XmlReportParser.extract(FULL_REPORT.as_bytes()).unwrap();

        assert_eq!(extraction.outline.root_tag, "feedback");
        assert_eq!(
            extraction.outline.child_tags,
            vec!["report_metadata", "policy_published", "record", "record"]
        );
    }

    #[test]
    fn missing_metadata_is_typed_failure_with_outline() {
        let xml = "<feedback><record><row><count>1</count></row></record></feedback>";
        let extraction = XmlReportParser.extract(xml.as_bytes()).unwrap();

        assert_eq!(extraction.outline.child_tags, vec!["record"]);
        assert!(matches!(
            extraction.report,
            Err(DmarcError::MissingMetadata)
        ));
    }

    #[test]
    fn missing_end_boundary_is_missing_date_range() {
        let xml = r#"<feedback><report_metadata>
            <report_id>r2</report_id>
            <date_range><begin>1700000000</begin></date_range>
        </report_metadata></feedback>"#;

        assert!(matches!(
            report(xml),
            Err(DmarcError::MissingDateRange { boundary: "end" })
        ));
    }

    #[test]
    fn missing_date_range_element_is_missing_begin() {
        let xml = "<feedback><report_metadata><report_id>r3</report_id></report_metadata></feedback>";

        assert!(matches!(
            report(xml),
            Err(DmarcError::MissingDateRange { boundary: "begin" })
        ));
    }

    #[test]
    fn non_numeric_begin_is_malformed_timestamp() {
        let xml = r#"<feedback><report_metadata>
            <date_range><begin>last week</begin><end>1700003600</end></date_range>
        </report_metadata></feedback>"#;

        assert!(matches!(
            report(xml),
            Err(DmarcError::MalformedTimestamp { boundary: "begin", .. })
        ));
    }

    #[test]
    fn empty_boundary_is_malformed_timestamp() {
        let xml = r#"<feedback><report_metadata>
            <date_range><begin>1700000000</begin><end/></date_range>
        </report_metadata></feedback>"#;

        assert!(matches!(
            report(xml),
            Err(DmarcError::MalformedTimestamp { boundary: "end", .. })
        ));
    }

    #[test]
    fn no_records_is_not_an_error() {
        let xml = r#"<feedback><report_metadata>
            <org_name>Quiet</org_name>
            <date_range><begin>0</begin><end>86400</end></date_range>
        </report_metadata></feedback>"#;
        let report = report(xml).unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.report_id, None);
    }

    #[test]
    fn record_without_row_is_skipped_and_counted() {
        let xml = r#"<feedback><report_metadata>
            <date_range><begin>0</begin><end>86400</end></date_range>
        </report_metadata>
        <record><identifiers/></record>
        <record><row><source_ip>192.0.2.7</source_ip></row></record>
        </feedback>"#;
        let report = report(xml).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.records[0].count, None);
    }

    #[test]
    fn malformed_xml_is_parse_error() {
        let err = XmlReportParser.extract(b"<feedback><oops></feedback>").unwrap_err();
        assert!(matches!(err, DmarcError::ParseError { .. }));
    }

    #[test]
    fn leading_byte_order_mark_is_accepted() {
        let xml = format!("\u{feff}{FULL_REPORT}");
        assert!(XmlReportParser.extract(xml.as_bytes()).unwrap().report.is_ok());
    }

    #[test]
    fn namespaced_report_is_read() {
        let xml = r#"<feedback xmlns="urn:ietf:params:xml:ns:dmarc-2.0">
  <report_metadata>
    <org_name>ns.example</org_name>
    <report_id>ns-1</report_id>
    <date_range><begin>1700000000</begin><end>1700003600</end></date_range>
  </report_metadata>
  <record><row><source_ip>203.0.113.5</source_ip><count>1</count></row></record>
</feedback>"#;
        let report = report(xml).unwrap();

        assert_eq!(report.report_id.as_deref(), Some("ns-1"));
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn declared_latin1_report_is_read() {
        let xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
<feedback><report_metadata><org_name>M\xfcller GmbH</org_name>\
<report_id>l1</report_id><date_range><begin>1700000000</begin>\
<end>1700003600</end></date_range></report_metadata>\
<record><row><source_ip>192.0.2.44</source_ip><count>3</count></row></record>\
</feedback>";
        let report = XmlReportParser.extract(xml).unwrap().report.unwrap();

        assert_eq!(report.org_name.as_deref(), Some("Müller GmbH"));
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn undeclared_non_utf8_is_parse_error() {
        let err = XmlReportParser
            .extract(b"<feedback><org_name>M\xfcller</org_name></feedback>")
            .unwrap_err();
        assert!(matches!(err, DmarcError::ParseError { .. }));
    }

    #[test]
    fn supported_extensions() {
        assert_eq!(XmlReportParser.supported_extensions(), &[".xml"]);
    }
}
