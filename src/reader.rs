//! Public reader facade.
//!
//! Composes the catalog, slice planner, sparse stream adapter, format
//! readers and combiner into streaming iteration, random slicing, and
//! by-identifier lookup (`spec.md` §4.8). Every shard is opened lazily
//! inside a `flat_map` closure, so its file handles (and the inner
//! compressed streams built from them) are dropped as soon as the
//! combined iterator for that shard is exhausted — the scoped-release
//! contract of `spec.md` §5 falls out of ordinary iterator ownership.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::catalog;
use crate::combine::{combine_a, combine_l};
use crate::doc::{Doc, DocA, DocL};
use crate::docid::{DocId, FileId};
use crate::error::Error;
use crate::format::Format;
use crate::language::Language;
use crate::offsets::read_offsets;
use crate::plan;
use crate::records::{html, link, txt, vdom, Record};
use crate::sparse::SparseReader;
use crate::subset::Subset;
use crate::version::Version;

/// A reader bound to one dataset root, one on-disk subset, and the
/// (possibly narrower) subset it currently serves.
pub struct Reader {
    root: PathBuf,
    on_disk_subset: Subset,
    view: Subset,
    language_filter: Option<Language>,
}

impl Reader {
    /// Opens a dataset root, reading its version marker once.
    pub fn open(root: impl Into<PathBuf>, language_filter: Option<Language>) -> Result<Reader, Error> {
        let root = root.into();
        let version = Version::read(&root)?;
        Ok(Reader {
            root,
            on_disk_subset: version.subset,
            view: version.subset,
            language_filter,
        })
    }

    /// Returns a reader exposing `view`'s fields from this reader's
    /// on-disk copy; `view` must be the on-disk subset or one it
    /// transitively extends.
    pub fn subset_view(&self, view: Subset) -> Result<Reader, Error> {
        if !self.on_disk_subset.subset_views().contains(&view) {
            return Err(Error::Decode(format!(
                "on-disk subset {:?} cannot be viewed as {:?}",
                self.on_disk_subset, view
            )));
        }
        Ok(Reader {
            root: self.root.clone(),
            on_disk_subset: self.on_disk_subset,
            view,
            language_filter: self.language_filter,
        })
    }

    /// The catalog format whose presence on disk backs every shard of
    /// this reader's on-disk subset (used to size subset views).
    fn representative_format(&self) -> Format {
        match self.on_disk_subset {
            Subset::L => Format::Txt,
            Subset::A | Subset::B => Format::Html,
        }
    }

    fn shards(&self) -> Result<Vec<(FileId, u64)>, Error> {
        catalog::subset_counts(
            &self.root,
            self.view,
            self.representative_format(),
            self.language_filter,
        )
    }

    /// The subset-constrained total record count.
    pub fn count(&self) -> Result<u64, Error> {
        Ok(self.shards()?.iter().map(|(_, count)| count).sum())
    }

    /// Lazily yields every document in catalog order.
    pub fn iterate(&self) -> Result<impl Iterator<Item = Result<Doc, Error>>, Error> {
        let shards = self.shards()?;
        let root = self.root.clone();
        let view = self.view;
        Ok(shards.into_iter().flat_map(move |(file_id, count)| {
            let indices: Vec<u64> = (0..count).collect();
            open_shard(&root, view, file_id, indices)
        }))
    }

    /// Lazily yields the documents selected by `[start, stop, step)` over
    /// the global index.
    pub fn slice(
        &self,
        start: u64,
        stop: u64,
        step: u64,
    ) -> Result<impl Iterator<Item = Result<Doc, Error>>, Error> {
        let shards = self.shards()?;
        let plan = plan::slice_plan(&shards, start, stop, step)?;
        let root = self.root.clone();
        let view = self.view;
        Ok(plan
            .into_iter()
            .flat_map(move |(file_id, indices)| open_shard(&root, view, file_id, indices)))
    }

    /// Lazily yields exactly the requested documents, in the order their
    /// identifiers group by shard.
    pub fn get_many(
        &self,
        doc_ids: &[DocId],
    ) -> Result<impl Iterator<Item = Result<Doc, Error>>, Error> {
        if let Some(filter) = self.language_filter {
            if doc_ids.iter().any(|doc_id| doc_id.language != filter) {
                return Err(Error::MalformedIdentifier(
                    "identifier language disagrees with reader's language filter".to_string(),
                ));
            }
        }
        let groups = plan::group_by_identifier(doc_ids);
        let root = self.root.clone();
        let view = self.view;
        Ok(groups.into_iter().flat_map(move |(file_id, docs)| {
            let indices: Vec<u64> = docs.into_iter().map(u64::from).collect();
            open_shard(&root, view, file_id, indices)
        }))
    }

    /// The single document identified by `doc_id`.
    pub fn get(&self, doc_id: DocId) -> Result<Doc, Error> {
        self.get_many(&[doc_id])?
            .next()
            .ok_or_else(|| Error::MissingShard(format!("no document for {doc_id}")))?
    }
}

fn shard_path(root: &Path, format: Format, file_id: &FileId) -> PathBuf {
    let mut path = root
        .join(format.id())
        .join(file_id.path())
        .to_string_lossy()
        .to_string();
    path.push_str(format.extension());
    apply_outlink_path_quirk(format, path)
}

fn offset_path(root: &Path, format: Format, file_id: &FileId) -> Option<PathBuf> {
    format.offset_extension().map(|ext| {
        let mut path = root
            .join(format.id())
            .join(file_id.path())
            .to_string_lossy()
            .to_string();
        path.push_str(ext);
        apply_outlink_path_quirk(format, path)
    })
}

/// For the outlink format only, the on-disk tree spells the Chinese
/// subdirectory `zh` instead of `zh_chs` (`spec.md` §6).
fn apply_outlink_path_quirk(format: Format, path: String) -> PathBuf {
    if format == Format::Outlink {
        PathBuf::from(path.replace("zh_chs/zh_chs", "zh_chs/zh"))
    } else {
        PathBuf::from(path)
    }
}

fn open_gzip_records(
    root: &Path,
    format: Format,
    file_id: &FileId,
    indices: &[u64],
) -> Result<Box<dyn Iterator<Item = Result<Record, Error>>>, Error> {
    let path = shard_path(root, format, file_id);
    let offsets_path =
        offset_path(root, format, file_id).expect("gzip formats carry an offset sidecar");
    let offsets = read_offsets(&offsets_path, &path)?;

    let file = File::open(&path)?;
    let sparse = SparseReader::from_offsets(file, &offsets, indices.iter().map(|&i| i as usize));
    let reader = BufReader::new(MultiGzDecoder::new(sparse));

    Ok(match format {
        Format::Txt => Box::new(txt::read_txt(reader)),
        Format::Html => Box::new(html::read_html(reader)),
        Format::Inlink | Format::Outlink => Box::new(link::read_link(reader)),
        Format::Vdom | Format::Jpg => unreachable!("vdom/jpg are not gzip formats"),
    })
}

fn open_vdom_records(
    root: &Path,
    file_id: &FileId,
    indices: &[u64],
) -> Result<Vec<Record>, Error> {
    let path = shard_path(root, Format::Vdom, file_id);
    let file = File::open(&path)?;
    let records = vdom::read_indices(file, indices.iter().map(|&i| i as usize))?;
    Ok(records.into_iter().map(|(_, record)| record).collect())
}

fn open_shard_l(
    root: &Path,
    file_id: &FileId,
    indices: &[u64],
) -> Result<impl Iterator<Item = Result<DocL, Error>>, Error> {
    let txt = open_gzip_records(root, Format::Txt, file_id, indices)?;
    Ok(combine_l(txt))
}

fn open_shard_a(
    root: &Path,
    file_id: &FileId,
    indices: &[u64],
) -> Result<impl Iterator<Item = Result<DocA, Error>>, Error> {
    let txt = open_gzip_records(root, Format::Txt, file_id, indices)?;
    let html = open_gzip_records(root, Format::Html, file_id, indices)?;
    let inlink = open_gzip_records(root, Format::Inlink, file_id, indices)?;
    let outlink = open_gzip_records(root, Format::Outlink, file_id, indices)?;
    let vdom = open_vdom_records(root, file_id, indices)?
        .into_iter()
        .map(Ok);
    Ok(combine_a(txt, html, inlink, outlink, vdom))
}

fn open_shard(
    root: &Path,
    view: Subset,
    file_id: FileId,
    indices: Vec<u64>,
) -> Box<dyn Iterator<Item = Result<Doc, Error>>> {
    match view {
        Subset::L => match open_shard_l(root, &file_id, &indices) {
            Ok(it) => Box::new(it.map(|r| r.map(Doc::L))),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
        Subset::A => match open_shard_a(root, &file_id, &indices) {
            Ok(it) => Box::new(it.map(|r| r.map(Doc::A))),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
        Subset::B => match open_shard_a(root, &file_id, &indices) {
            Ok(it) => Box::new(it.map(|r| r.map(Doc::B))),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
    }
}
