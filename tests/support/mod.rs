//! Shared fixture builders for integration tests.
//!
//! Builds a synthetic on-disk ClueWeb22 tree under a [`tempfile::TempDir`]:
//! a version marker, gzip shards with matching offset sidecars, and a
//! record-count catalog. Each JSON-lines record is compressed as its own
//! independent gzip member, matching the real corpus's layout.
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

/// gzip-compresses each line of `lines` as its own member and returns the
/// concatenated bytes alongside the byte offset each member starts at.
pub fn gzip_members(lines: &[String]) -> (Vec<u8>, Vec<u64>) {
    let mut bytes = Vec::new();
    let mut offsets = Vec::new();
    for line in lines {
        offsets.push(bytes.len() as u64);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(line.as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
        bytes.extend(encoder.finish().unwrap());
    }
    (bytes, offsets)
}

pub fn write_shard(path: &Path, lines: &[String]) -> Vec<u64> {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let (bytes, offsets) = gzip_members(lines);
    fs::write(path, bytes).unwrap();
    offsets
}

pub fn write_offsets(path: &Path, offsets: &[u64]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for offset in offsets {
        writeln!(f, "{offset}").unwrap();
    }
}

pub fn write_counts(root: &Path, format: &str, lang_stream: &str, rows: &[(&str, u64)]) {
    let dir = root.join("record_counts").join(format);
    fs::create_dir_all(&dir).unwrap();
    let mut f = File::create(dir.join(format!("{lang_stream}_counts.csv"))).unwrap();
    for (tag, count) in rows {
        writeln!(f, "{tag},{count}").unwrap();
    }
}

pub fn write_version(root: &Path, subset: char, major: u32, minor: u32) {
    File::create(root.join(format!("version_{subset}_{major}.{minor}"))).unwrap();
}

/// Writes a minimal single-shard L-subset corpus under `root`:
/// `txt/en/en00/en0000/en0000-00.json.gz` with `lines.len()` records.
pub fn write_l_corpus(root: &Path, lines: &[String]) -> PathBuf {
    let shard_path = root
        .join("txt")
        .join("en")
        .join("en00")
        .join("en0000")
        .join("en0000-00.json.gz");
    let offsets = write_shard(&shard_path, lines);
    write_offsets(
        &root
            .join("txt")
            .join("en")
            .join("en00")
            .join("en0000")
            .join("en0000-00.offset"),
        &offsets,
    );
    write_counts(root, "txt", "en00", &[("en0000-00", lines.len() as u64)]);
    write_version(root, 'L', 1, 0);
    shard_path
}

pub fn txt_line(doc_id: &str, url: &str, url_hash: &str, language: &str, text: &str) -> String {
    format!(
        r#"{{"ClueWeb22-ID":"{doc_id}","URL":"{url}","URL-hash":"{url_hash}","Language":"{language}","Clean-Text":"{text}"}}"#
    )
}
