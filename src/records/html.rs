//! HTML format reader.
//!
//! A WARC stream; each `response` record carries one ClueWeb22 document
//! (`spec.md` §4.5). Header access follows
//! `oscar-project-ungoliant/src/shard/wet.rs`'s use of `warc::RawRecord`:
//! custom ClueWeb22 headers arrive as `WarcHeader::Unknown(name)` with the
//! name lowercased.
use std::collections::HashMap;
use std::io::BufRead;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use warc::header::WarcHeader;
use warc::{RawRecord, WarcReader};

use crate::error::Error;
use crate::records::Record;

/// One of the seven VDOM-annotation node lists a HTML record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationType {
    None,
    Primary,
    Heading,
    Title,
    Paragraph,
    Table,
    List,
}

impl AnnotationType {
    pub const ALL: [AnnotationType; 7] = [
        AnnotationType::None,
        AnnotationType::Primary,
        AnnotationType::Heading,
        AnnotationType::Title,
        AnnotationType::Paragraph,
        AnnotationType::Table,
        AnnotationType::List,
    ];

    fn header_name(self) -> &'static str {
        match self {
            AnnotationType::None => "vdom-none",
            AnnotationType::Primary => "vdom-primary",
            AnnotationType::Heading => "vdom-heading",
            AnnotationType::Title => "vdom-title",
            AnnotationType::Paragraph => "vdom-paragraph",
            AnnotationType::Table => "vdom-table",
            AnnotationType::List => "vdom-list",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HtmlRecord {
    pub doc_id: String,
    pub url: String,
    pub url_hash: String,
    pub language: String,
    pub date: DateTime<Utc>,
    pub record_id: String,
    pub payload_digest: String,
    pub html: Vec<u8>,
    pub vdom_nodes: HashMap<AnnotationType, Vec<u64>>,
}

fn header(record: &RawRecord, name: WarcHeader) -> Option<String> {
    record
        .headers
        .get(&name)
        .map(|raw| String::from_utf8_lossy(raw).to_string())
}

fn required(record: &RawRecord, name: WarcHeader, field: &'static str) -> Result<String, Error> {
    header(record, name).ok_or_else(|| Error::Decode(format!("missing {field} header")))
}

/// WARC-Date accepts both `%Y-%m-%dT%H:%M:%SZ` and the microsecond
/// variant, chosen by the presence of a `.` in the raw value.
fn parse_date(raw: &str) -> Result<DateTime<Utc>, Error> {
    let format = if raw.contains('.') {
        "%Y-%m-%dT%H:%M:%S%.fZ"
    } else {
        "%Y-%m-%dT%H:%M:%SZ"
    };
    let naive = NaiveDateTime::parse_from_str(raw, format)
        .map_err(|e| Error::Decode(format!("invalid WARC-Date {raw:?}: {e}")))?;
    Ok(Utc.from_utc_datetime(&naive))
}

fn parse_int_list(raw: Option<String>) -> Result<Vec<u64>, Error> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) => s
            .split_whitespace()
            .map(|token| token.parse::<u64>().map_err(Error::from))
            .collect(),
    }
}

/// Reads the HTML records of one decompressed WARC shard, skipping every
/// non-`response` record (warcinfo, etc).
pub fn read_html<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Record, Error>> {
    WarcReader::new(reader).filter_map(|item| {
        let record = match item {
            Ok(record) => record,
            Err(e) => return Some(Err(Error::Warc(e))),
        };
        let warc_type = header(&record, WarcHeader::WarcType).unwrap_or_default();
        if warc_type != "response" {
            return None;
        }
        Some(build(record))
    })
}

fn build(record: RawRecord) -> Result<Record, Error> {
    let doc_id = required(
        &record,
        WarcHeader::Unknown("clueweb22-id".to_string()),
        "ClueWeb22-ID",
    )?;
    let url = required(&record, WarcHeader::TargetURI, "WARC-Target-URI")?;
    let url_hash = required(
        &record,
        WarcHeader::Unknown("url-hash".to_string()),
        "URL-Hash",
    )?;
    let language = required(
        &record,
        WarcHeader::Unknown("language".to_string()),
        "Language",
    )?;
    let date = parse_date(&required(&record, WarcHeader::Date, "WARC-Date")?)?;
    let record_id = required(&record, WarcHeader::RecordID, "WARC-Record-ID")?
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_string();
    let payload_digest = header(&record, WarcHeader::PayloadDigest).unwrap_or_default();
    let content_length: usize = required(&record, WarcHeader::ContentLength, "Content-Length")?
        .parse()?;

    if record.body.len() != content_length {
        return Err(Error::Decode(format!(
            "Content-Length {content_length} does not match body length {}",
            record.body.len()
        )));
    }

    let mut vdom_nodes = HashMap::with_capacity(AnnotationType::ALL.len());
    for annotation in AnnotationType::ALL {
        let raw = header(
            &record,
            WarcHeader::Unknown(annotation.header_name().to_string()),
        );
        vdom_nodes.insert(annotation, parse_int_list(raw)?);
    }

    Ok(Record::Html(HtmlRecord {
        doc_id,
        url,
        url_hash,
        language,
        date,
        record_id,
        payload_digest,
        html: record.body,
        vdom_nodes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_date_format() {
        let date = parse_date("2021-02-24T17:02:28Z").unwrap();
        assert_eq!(date.to_string(), "2021-02-24 17:02:28 UTC");
    }

    #[test]
    fn parses_microsecond_date_format() {
        let date = parse_date("2021-02-24T17:02:28.123456Z").unwrap();
        assert_eq!(date.timestamp(), 1614186148);
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn empty_annotation_header_yields_empty_list() {
        assert_eq!(parse_int_list(None).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn parses_whitespace_separated_annotation_list() {
        assert_eq!(
            parse_int_list(Some("1 2 3".to_string())).unwrap(),
            vec![1, 2, 3]
        );
    }
}
