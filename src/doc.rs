//! Unified document shapes produced by the combiner.
//!
//! One struct per subset (`spec.md` §3); `B` carries the same fields as
//! `A` since the screenshot field stays absent until the JPG format is
//! implemented (`spec.md` §9).
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::records::html::AnnotationType;
use crate::records::Anchor;

#[derive(Debug, Clone)]
pub struct DocL {
    pub doc_id: String,
    pub url: String,
    pub url_hash: String,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct DocA {
    pub doc_id: String,
    pub url: String,
    pub url_hash: String,
    pub language: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub html: Vec<u8>,
    pub record_id: String,
    pub payload_digest: String,
    pub vdom_nodes: HashMap<AnnotationType, Vec<u64>>,
    pub vdom: Vec<u8>,
    pub inlink_anchors: Vec<Anchor>,
    pub outlink_anchors: Vec<Anchor>,
}

/// `B`'s fields are identical to `A`'s (see module docs).
pub type DocB = DocA;

#[derive(Debug, Clone)]
pub enum Doc {
    L(DocL),
    A(DocA),
    B(DocB),
}
