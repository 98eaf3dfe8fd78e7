pub mod xml_encoding;
pub mod xml_fields;
pub mod xml_report_parser;
