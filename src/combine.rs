//! Aligner/combiner.
//!
//! Steps N per-format record iterators in lock-step (`spec.md` §4.6): the
//! k-th tuple across iterators is the k-th logical document. Consistency
//! checks either abort the whole document (`Error::AlignmentMismatch`) or
//! are tolerated and logged, per the matrix below, grounded in
//! `original_source._combine_a_docs`/`_combine_b_docs`.
use itertools::izip;
use log::{debug, warn};

use crate::doc::{DocA, DocL};
use crate::error::Error;
use crate::records::link::LinkRecord;
use crate::records::{HtmlRecord, Record, TxtRecord};

fn expect_txt(record: Record) -> Result<TxtRecord, Error> {
    match record {
        Record::Txt(r) => Ok(r),
        other => Err(Error::AlignmentMismatch(format!(
            "expected a TXT record, got {other:?}"
        ))),
    }
}

fn expect_html(record: Record) -> Result<HtmlRecord, Error> {
    match record {
        Record::Html(r) => Ok(r),
        other => Err(Error::AlignmentMismatch(format!(
            "expected an HTML record, got {other:?}"
        ))),
    }
}

/// INLINK/OUTLINK positions are `Empty` (blank line) or `Link`; anything
/// else is a reader bug.
fn expect_link(record: Record) -> Result<Option<LinkRecord>, Error> {
    match record {
        Record::Link(r) => Ok(Some(r)),
        Record::Empty => Ok(None),
        other => Err(Error::AlignmentMismatch(format!(
            "expected a link record or blank placeholder, got {other:?}"
        ))),
    }
}

/// Checks the TXT/HTML URL pair, tolerating the documented comma
/// truncation defect.
fn check_url(txt_url: &str, html_url: &str) -> Result<(), Error> {
    if txt_url == html_url {
        return Ok(());
    }
    if let Some(prefix) = html_url.split(',').next() {
        if prefix == txt_url {
            debug!("tolerated TXT/HTML URL comma truncation: {txt_url:?} vs {html_url:?}");
            return Ok(());
        }
    }
    Err(Error::AlignmentMismatch(format!(
        "TXT URL {txt_url:?} does not match HTML URL {html_url:?}"
    )))
}

fn check_url_hash(format: &str, txt_hash: &str, other_hash: &str) {
    if txt_hash != other_hash {
        warn!("{format} URL-hash mismatch: {txt_hash:?} vs {other_hash:?}");
    }
}

fn check_language(txt_language: &str, html_language: &str) -> Result<(), Error> {
    if txt_language == html_language || txt_language == "other" {
        return Ok(());
    }
    Err(Error::AlignmentMismatch(format!(
        "language mismatch: TXT {txt_language:?} vs HTML {html_language:?}"
    )))
}

fn check_link(
    format: &str,
    txt_doc_id: &str,
    html_url: &str,
    link: &Option<LinkRecord>,
) -> Result<(), Error> {
    let Some(link) = link else {
        return Ok(());
    };
    if link.doc_id != txt_doc_id {
        return Err(Error::AlignmentMismatch(format!(
            "{format} doc_id {:?} does not match {txt_doc_id:?}",
            link.doc_id
        )));
    }
    if link.url != html_url {
        warn!(
            "{format} URL mismatch: {:?} vs HTML URL {html_url:?}",
            link.url
        );
    }
    Ok(())
}

/// Combines the lone TXT iterator into `L`-subset documents.
pub fn combine_l(
    txt: impl Iterator<Item = Result<Record, Error>>,
) -> impl Iterator<Item = Result<DocL, Error>> {
    txt.map(|record| {
        let txt = expect_txt(record?)?;
        Ok(DocL {
            doc_id: txt.doc_id,
            url: txt.url,
            url_hash: txt.url_hash,
            language: txt.language,
            text: txt.text,
        })
    })
}

/// Combines TXT, HTML, INLINK, OUTLINK and VDOM iterators into
/// `A`/`B`-subset documents (identical combining logic for both, per
/// `original_source`).
pub fn combine_a(
    txt: impl Iterator<Item = Result<Record, Error>>,
    html: impl Iterator<Item = Result<Record, Error>>,
    inlink: impl Iterator<Item = Result<Record, Error>>,
    outlink: impl Iterator<Item = Result<Record, Error>>,
    vdom: impl Iterator<Item = Result<Record, Error>>,
) -> impl Iterator<Item = Result<DocA, Error>> {
    izip!(txt, html, inlink, outlink, vdom).map(|(txt, html, inlink, outlink, vdom)| {
        let txt = expect_txt(txt?)?;
        let html = expect_html(html?)?;
        let inlink = expect_link(inlink?)?;
        let outlink = expect_link(outlink?)?;
        let vdom = match vdom? {
            Record::Vdom(r) => r,
            other => {
                return Err(Error::AlignmentMismatch(format!(
                    "expected a VDOM record, got {other:?}"
                )))
            }
        };

        if txt.doc_id != html.doc_id {
            return Err(Error::AlignmentMismatch(format!(
                "TXT doc_id {:?} does not match HTML doc_id {:?}",
                txt.doc_id, html.doc_id
            )));
        }
        check_url(&txt.url, &html.url)?;
        check_url_hash("HTML", &txt.url_hash, &html.url_hash);
        check_language(&txt.language, &html.language)?;
        check_link("INLINK", &txt.doc_id, &html.url, &inlink)?;
        check_link("OUTLINK", &txt.doc_id, &html.url, &outlink)?;
        if let Some(inlink) = &inlink {
            check_url_hash("INLINK", &txt.url_hash, &inlink.url_hash);
        }
        if let Some(outlink) = &outlink {
            check_url_hash("OUTLINK", &txt.url_hash, &outlink.url_hash);
        }

        Ok(DocA {
            doc_id: html.doc_id,
            url: html.url,
            url_hash: html.url_hash,
            language: html.language,
            text: txt.text,
            date: html.date,
            html: html.html,
            record_id: html.record_id,
            payload_digest: html.payload_digest,
            vdom_nodes: html.vdom_nodes,
            vdom: vdom.bytes,
            inlink_anchors: inlink.map(|r| r.anchors).unwrap_or_default(),
            outlink_anchors: outlink.map(|r| r.anchors).unwrap_or_default(),
        })
    })
}
