//! Per-format record readers.
//!
//! Each submodule turns a decompressed byte stream for one format into a
//! lazy sequence of [`Record`] values (`spec.md` §4.5, §9's "enum of record
//! shapes" design note). The combiner dispatches on the subset's required
//! formats, not on the variant, so a mismatched variant reaching it is a
//! programmer error rather than a recoverable one.
pub mod html;
pub mod jpg;
pub mod link;
pub mod txt;
pub mod vdom;

pub use html::HtmlRecord;
pub use link::{Anchor, LinkRecord};
pub use txt::TxtRecord;
pub use vdom::VdomRecord;

/// One record from one format stream, tagged by shape.
///
/// `Empty` is the blank-line placeholder INLINK/OUTLINK emit to preserve
/// positional alignment; it is distinct from `Link` carrying an anchor
/// list of length zero.
#[derive(Debug, Clone)]
pub enum Record {
    Txt(TxtRecord),
    Html(HtmlRecord),
    Link(LinkRecord),
    Vdom(VdomRecord),
    Jpg(jpg::JpgRecord),
    Empty,
}

impl Record {
    pub fn as_txt(&self) -> Option<&TxtRecord> {
        match self {
            Record::Txt(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_html(&self) -> Option<&HtmlRecord> {
        match self {
            Record::Html(r) => Some(r),
            _ => None,
        }
    }

    /// `None` for both a genuinely absent (blank-line) record and an
    /// unexpected variant; callers distinguish via `is_empty`.
    pub fn as_link(&self) -> Option<&LinkRecord> {
        match self {
            Record::Link(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Record::Empty)
    }
}
