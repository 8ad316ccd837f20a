//! Record-count catalog.
//!
//! For each format, `record_counts/<format-id>/<lang><ss>_counts.csv` holds
//! rows `<tag>-<ff>,<count>` giving the number of records in every shard
//! file, without needing to open the shards. The catalog is the
//! authoritative shard listing (`spec.md` §4.3): shards on disk but absent
//! from the catalog are ignored, and vice versa.
use std::fs::File;
use std::path::Path;

use crate::docid::FileId;
use crate::error::Error;
use crate::format::Format;
use crate::language::Language;
use crate::subset::Subset;

/// Reads every `*_counts.csv` file for `format`, optionally restricted to
/// one language, and returns `(FileId, count)` pairs in ascending
/// `(language, stream, subdirectory, file)` order.
pub fn raw_counts(
    root: &Path,
    format: Format,
    language_filter: Option<Language>,
) -> Result<Vec<(FileId, u64)>, Error> {
    let format_dir = root.join("record_counts").join(format.id());
    let prefix = language_filter.map(|l| l.id()).unwrap_or("");
    let pattern = format_dir.join(format!("{prefix}*_counts.csv"));
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Decode("non-utf8 record_counts path".to_string()))?;

    let mut csv_paths: Vec<_> = glob::glob(pattern)
        .map_err(|e| Error::Decode(e.to_string()))?
        .filter_map(Result::ok)
        .collect();
    csv_paths.sort();

    let mut counts = Vec::new();
    for csv_path in csv_paths {
        let file_name = csv_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Decode("invalid counts file name".to_string()))?;
        let tag = file_name
            .strip_suffix("_counts.csv")
            .ok_or_else(|| Error::Decode(format!("unexpected counts file name: {file_name}")))?;
        if tag.len() < 2 {
            return Err(Error::Decode(format!("unexpected counts file tag: {tag}")));
        }
        let (language_id, stream_str) = tag.split_at(tag.len() - 2);
        let stream: u32 = stream_str.parse()?;

        let file = File::open(&csv_path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(file);
        for record in reader.records() {
            let record = record?;
            if record.len() != 2 {
                return Err(Error::Decode(format!(
                    "malformed counts row in {csv_path:?}"
                )));
            }
            let shard_tag = &record[0];
            let count: u64 = record[1].parse()?;

            let (subdirectory_tag, file_tag) = shard_tag
                .split_once('-')
                .ok_or_else(|| Error::Decode(format!("malformed shard tag: {shard_tag}")))?;
            if subdirectory_tag.len() < 2 {
                return Err(Error::Decode(format!("malformed shard tag: {shard_tag}")));
            }
            let subdirectory: u32 = subdirectory_tag[subdirectory_tag.len() - 2..].parse()?;
            let file_no: u32 = file_tag.parse()?;

            let file_id = FileId {
                language_id: Language::from_id(language_id)?.id(),
                stream,
                subdirectory,
                file: file_no,
            };
            counts.push((file_id, count));
        }
    }

    counts.sort_by_key(|(file_id, _)| *file_id);
    Ok(counts)
}

/// Counts for one of `subset`'s diff formats (formats required by `subset`
/// but by none of the subsets it extends). Falls back to HTML counts when
/// `subset` has no diff formats of its own (e.g. because JPG readers are
/// not implemented for `B`).
pub fn diff_format_counts(
    root: &Path,
    subset: Subset,
    language_filter: Option<Language>,
) -> Result<Vec<(FileId, u64)>, Error> {
    match subset.diff_formats().first() {
        Some(format) => raw_counts(root, *format, language_filter),
        None => raw_counts(root, Format::Html, language_filter),
    }
}

/// The counts callers actually see for `format` under `subset`: sized by
/// the subset's diff-format counts, but restricted to files that also
/// exist in `format`'s own (possibly broader) catalog.
pub fn subset_counts(
    root: &Path,
    subset: Subset,
    format: Format,
    language_filter: Option<Language>,
) -> Result<Vec<(FileId, u64)>, Error> {
    let diff = diff_format_counts(root, subset, language_filter)?;
    let catalog = raw_counts(root, format, language_filter)?;

    let mut result = Vec::with_capacity(diff.len());
    for (file_id, diff_count) in diff {
        if catalog.iter().any(|(id, _)| *id == file_id) {
            result.push((file_id, diff_count));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_counts_csv(dir: &Path, format: &str, lang_stream: &str, rows: &[(&str, u64)]) {
        let format_dir = dir.join("record_counts").join(format);
        std::fs::create_dir_all(&format_dir).unwrap();
        let mut f = File::create(format_dir.join(format!("{lang_stream}_counts.csv"))).unwrap();
        for (tag, count) in rows {
            writeln!(f, "{tag},{count}").unwrap();
        }
    }

    #[test]
    fn reads_and_sorts_counts() {
        let dir = tempfile::tempdir().unwrap();
        write_counts_csv(
            dir.path(),
            "html",
            "en00",
            &[("en0000-01", 5), ("en0000-00", 7)],
        );

        let counts = raw_counts(dir.path(), Format::Html, None).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].0.file, 0);
        assert_eq!(counts[0].1, 7);
        assert_eq!(counts[1].0.file, 1);
        assert_eq!(counts[1].1, 5);
    }

    #[test]
    fn language_filter_restricts_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write_counts_csv(dir.path(), "txt", "en00", &[("en0000-00", 3)]);
        write_counts_csv(dir.path(), "txt", "de00", &[("de0000-00", 4)]);

        let counts = raw_counts(dir.path(), Format::Txt, Some(Language::En)).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].0.language_id, "en");
    }

    #[test]
    fn subset_counts_excludes_files_missing_from_format_catalog() {
        let dir = tempfile::tempdir().unwrap();
        // diff format for A is TXT; HTML catalog is missing file 01.
        write_counts_csv(
            dir.path(),
            "txt",
            "en00",
            &[("en0000-00", 3), ("en0000-01", 2)],
        );
        write_counts_csv(dir.path(), "html", "en00", &[("en0000-00", 3)]);

        let counts = subset_counts(dir.path(), Subset::A, Format::Html, None).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].0.file, 0);
        assert_eq!(counts[0].1, 3);
    }

    #[test]
    fn b_falls_back_to_html_diff_counts() {
        let dir = tempfile::tempdir().unwrap();
        write_counts_csv(dir.path(), "html", "en00", &[("en0000-00", 9)]);

        let counts = diff_format_counts(dir.path(), Subset::B, None).unwrap();
        assert_eq!(counts, vec![(counts[0].0, 9)]);
    }
}
