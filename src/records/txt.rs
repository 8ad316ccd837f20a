//! TXT format reader.
//!
//! One JSON object per line (`spec.md` §4.5). The `URL` field may carry a
//! trailing `\n` (stripped here) and may be truncated at the first `,`
//! relative to the HTML record's URL; that truncation is the combiner's
//! concern, not this reader's.
use std::io::BufRead;

use serde::Deserialize;

use crate::error::Error;
use crate::records::Record;

#[derive(Debug, Clone, Deserialize)]
struct RawTxtRecord {
    #[serde(rename = "ClueWeb22-ID")]
    doc_id: String,
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "URL-hash")]
    url_hash: String,
    #[serde(rename = "Language")]
    language: String,
    #[serde(rename = "Clean-Text")]
    text: String,
}

#[derive(Debug, Clone)]
pub struct TxtRecord {
    pub doc_id: String,
    pub url: String,
    pub url_hash: String,
    pub language: String,
    pub text: String,
}

impl From<RawTxtRecord> for TxtRecord {
    fn from(raw: RawTxtRecord) -> Self {
        TxtRecord {
            doc_id: raw.doc_id,
            url: raw.url.trim_end_matches('\n').to_string(),
            url_hash: raw.url_hash,
            language: raw.language,
            text: raw.text,
        }
    }
}

/// Reads the TXT records of one decompressed shard, in file order.
pub fn read_txt<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Record, Error>> {
    reader.lines().map(|line| {
        let line = line?;
        let raw: RawTxtRecord = serde_json::from_str(&line)?;
        Ok(Record::Txt(TxtRecord::from(raw)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_and_strips_trailing_newline() {
        let line = r#"{"ClueWeb22-ID":"clueweb22-en0000-00-00000","URL":"https://example.com/\n","URL-hash":"abc","Language":"en","Clean-Text":"hello"}"#;
        let mut results = read_txt(Cursor::new(line.as_bytes()));
        let record = results.next().unwrap().unwrap();
        let txt = record.as_txt().unwrap();
        assert_eq!(txt.url, "https://example.com/");
        assert_eq!(txt.doc_id, "clueweb22-en0000-00-00000");
    }

    #[test]
    fn reads_multiple_lines_in_order() {
        let data = "{\"ClueWeb22-ID\":\"a\",\"URL\":\"u1\",\"URL-hash\":\"h1\",\"Language\":\"en\",\"Clean-Text\":\"t1\"}\n\
                    {\"ClueWeb22-ID\":\"b\",\"URL\":\"u2\",\"URL-hash\":\"h2\",\"Language\":\"en\",\"Clean-Text\":\"t2\"}\n";
        let records: Vec<_> = read_txt(Cursor::new(data.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].as_txt().unwrap().doc_id, "a");
        assert_eq!(records[1].as_txt().unwrap().doc_id, "b");
    }

    #[test]
    fn malformed_json_errors() {
        let mut results = read_txt(Cursor::new(b"not json".as_slice()));
        assert!(results.next().unwrap().is_err());
    }
}
