//! INLINK/OUTLINK format reader.
//!
//! One JSON object per line; a blank line is the positional placeholder
//! for "no anchors recorded" and must still advance the logical index
//! (`spec.md` §4.5, §8's blank-line boundary behavior). Each anchor is a
//! 5-tuple `[url, url_hash, text, ?, language]`; the fourth element is
//! unused by this crate.
use std::io::BufRead;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::records::Record;

#[derive(Debug, Clone, Deserialize)]
struct RawLinkRecord {
    #[serde(rename = "ClueWeb22-ID")]
    doc_id: String,
    #[serde(rename = "url")]
    url: String,
    #[serde(rename = "urlhash")]
    url_hash: String,
    #[serde(alias = "anchors", alias = "outlinks")]
    links: Vec<(String, String, String, Value, String)>,
}

#[derive(Debug, Clone)]
pub struct Anchor {
    pub url: String,
    pub url_hash: String,
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub doc_id: String,
    pub url: String,
    pub url_hash: String,
    pub anchors: Vec<Anchor>,
}

/// Reads one INLINK or OUTLINK shard; the field name carrying the anchor
/// list (`Anchors` vs `Outlinks`) is resolved automatically via alias.
pub fn read_link<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Record, Error>> {
    reader.lines().map(|line| {
        let line = line?;
        if line.trim().is_empty() {
            return Ok(Record::Empty);
        }
        let raw: RawLinkRecord = serde_json::from_str(&line)?;
        let anchors = raw
            .links
            .into_iter()
            .map(|(url, url_hash, text, _unused, language)| Anchor {
                url,
                url_hash,
                text,
                language,
            })
            .collect();
        Ok(Record::Link(LinkRecord {
            doc_id: raw.doc_id,
            url: raw.url,
            url_hash: raw.url_hash,
            anchors,
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn blank_line_yields_empty_record() {
        let mut results = read_link(Cursor::new(b"\n".as_slice()));
        let record = results.next().unwrap().unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn parses_anchors_array() {
        let line = r#"{"ClueWeb22-ID":"a","url":"u","urlhash":"h","anchors":[["au","ah","atext",0,"en"]]}"#;
        let mut results = read_link(Cursor::new(line.as_bytes()));
        let record = results.next().unwrap().unwrap();
        let link = record.as_link().unwrap();
        assert_eq!(link.anchors.len(), 1);
        assert_eq!(link.anchors[0].url, "au");
        assert_eq!(link.anchors[0].language, "en");
    }

    #[test]
    fn parses_outlinks_array() {
        let line = r#"{"ClueWeb22-ID":"a","url":"u","urlhash":"h","outlinks":[]}"#;
        let mut results = read_link(Cursor::new(line.as_bytes()));
        let record = results.next().unwrap().unwrap();
        let link = record.as_link().unwrap();
        assert!(link.anchors.is_empty());
    }

    #[test]
    fn blank_line_then_record_keeps_positional_order() {
        let data = "\n{\"ClueWeb22-ID\":\"a\",\"url\":\"u\",\"urlhash\":\"h\",\"anchors\":[]}\n";
        let records: Vec<_> = read_link(Cursor::new(data.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_empty());
        assert!(records[1].as_link().is_some());
    }
}
