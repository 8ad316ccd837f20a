//! JPG format reader.
//!
//! Reserved; screenshot layout and compression are unspecified (`spec.md`
//! §9 open question). No subset currently lists `Format::Jpg` among its
//! required formats, so this reader is never invoked; it exists so the
//! `Record` enum's shape and the format table stay complete.
#[derive(Debug, Clone)]
pub struct JpgRecord {
    pub bytes: Vec<u8>,
}
