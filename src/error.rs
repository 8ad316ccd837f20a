//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns [`Error`]. Variants map
//! onto the error kinds of the aligned reader: a malformed identifier, a
//! shard or inner archive member that the catalog promised but the
//! filesystem doesn't have, a cross-format alignment failure, or a
//! decoding failure bubbled up from gzip/WARC/JSON/CSV/ZIP.
//!
//! Tolerated defects (stray URL hash mismatches, the `ja0009-57` offset
//! sidecar quirk, and so on) are *not* represented here: per the combiner's
//! contract they are logged and iteration continues, so they never reach
//! a `Result::Err`.
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// A `clueweb22-...` identifier did not parse, or failed a range check.
    MalformedIdentifier(String),
    /// A shard referenced by the catalog is missing on disk, or vice versa.
    MissingShard(String),
    /// A ZIP archive (VDOM format) is missing an expected inner member.
    MissingInnerMember(String),
    /// `doc_id` (or a non-tolerated field) disagreed across format streams.
    AlignmentMismatch(String),
    /// gzip/WARC/JSON/ZIP decoding failed.
    Decode(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Warc(warc::Error),
    Zip(zip::result::ZipError),
    ParseInt(std::num::ParseIntError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedIdentifier(s) => write!(f, "malformed identifier: {s}"),
            Error::MissingShard(s) => write!(f, "missing shard: {s}"),
            Error::MissingInnerMember(s) => write!(f, "missing inner member: {s}"),
            Error::AlignmentMismatch(s) => write!(f, "alignment mismatch: {s}"),
            Error::Decode(s) => write!(f, "decode error: {s}"),
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Csv(e) => write!(f, "csv error: {e}"),
            Error::Serde(e) => write!(f, "json error: {e}"),
            Error::Warc(e) => write!(f, "warc error: {e}"),
            Error::Zip(e) => write!(f, "zip error: {e}"),
            Error::ParseInt(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<warc::Error> for Error {
    fn from(e: warc::Error) -> Error {
        Error::Warc(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Error {
        Error::Zip(e)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Error {
        Error::ParseInt(e)
    }
}
