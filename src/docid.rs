//! Document and file identifiers.
//!
//! [`DocId`] and [`FileId`] parse/format the textual `clueweb22-...`
//! identifiers and translate them into the path fragments used to locate
//! shard files on disk. See `spec.md` §4.1 for the exact grammar.
use std::path::PathBuf;

use crate::error::Error;
use crate::language::Language;

const MAX_SUBDIRECTORY: u32 = 80;
const MAX_FILE: u32 = 100;

/// A single ClueWeb22 document identifier, e.g. `clueweb22-en0000-00-00000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocId {
    pub language: Language,
    pub stream: u32,
    pub subdirectory: u32,
    pub file: u32,
    pub doc: u32,
}

/// The file-level identifier a [`DocId`] belongs to: everything but the
/// record index within the file. Used to group documents by shard and to
/// walk the record-count catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId {
    pub language_id: &'static str,
    pub stream: u32,
    pub subdirectory: u32,
    pub file: u32,
}

impl DocId {
    /// Parses a `clueweb22-<lang><ss><dd>-<ff>-<ddddd>` identifier.
    pub fn parse(s: &str) -> Result<DocId, Error> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 4 {
            return Err(Error::MalformedIdentifier(s.to_string()));
        }
        if parts[0] != "clueweb22" {
            return Err(Error::MalformedIdentifier(s.to_string()));
        }

        let stream_subdir = parts[1];
        if stream_subdir.len() < 4 {
            return Err(Error::MalformedIdentifier(s.to_string()));
        }
        let split_at = stream_subdir.len() - 4;
        let language_id = &stream_subdir[..split_at];
        let stream: u32 = stream_subdir[split_at..split_at + 2]
            .parse()
            .map_err(|_| Error::MalformedIdentifier(s.to_string()))?;
        let subdirectory: u32 = stream_subdir[split_at + 2..]
            .parse()
            .map_err(|_| Error::MalformedIdentifier(s.to_string()))?;

        let language = Language::from_id(language_id)
            .map_err(|_| Error::MalformedIdentifier(s.to_string()))?;

        let file: u32 = parts[2]
            .parse()
            .map_err(|_| Error::MalformedIdentifier(s.to_string()))?;
        let doc: u32 = parts[3]
            .parse()
            .map_err(|_| Error::MalformedIdentifier(s.to_string()))?;

        if subdirectory > MAX_SUBDIRECTORY || file > MAX_FILE {
            return Err(Error::MalformedIdentifier(s.to_string()));
        }

        Ok(DocId {
            language,
            stream,
            subdirectory,
            file,
            doc,
        })
    }

    /// The `FileId` this document belongs to.
    pub fn file_id(&self) -> FileId {
        FileId {
            language_id: self.language.id(),
            stream: self.stream,
            subdirectory: self.subdirectory,
            file: self.file,
        }
    }

    /// Path fragment `<lang>/<lang><ss>/<lang><ss><dd>/<lang><ss><dd>-<ff>`,
    /// relative to a format's root directory, without extension.
    pub fn path(&self) -> PathBuf {
        self.file_id().path()
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "clueweb22-{}{:02}{:02}-{:02}-{:05}",
            self.language.id(),
            self.stream,
            self.subdirectory,
            self.file,
            self.doc
        )
    }
}

impl FileId {
    /// Path fragment `<lang>/<lang><ss>/<lang><ss><dd>/<lang><ss><dd>-<ff>`,
    /// relative to a format's root directory, without extension.
    pub fn path(&self) -> PathBuf {
        let lang = self.language_id;
        let stream_path = format!("{lang}{:02}", self.stream);
        let subdirectory_path = format!("{stream_path}{:02}", self.subdirectory);
        let file_path = format!("{subdirectory_path}-{:02}", self.file);
        PathBuf::from(lang)
            .join(&stream_path)
            .join(&subdirectory_path)
            .join(&file_path)
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "clueweb22-{}{:02}{:02}-{:02}",
            self.language_id, self.stream, self.subdirectory, self.file
        )
    }
}
