//! VDOM format reader.
//!
//! The decompressed member of a ZIP archive is a single opaque blob, one
//! record per file (`spec.md` §4.5). Unlike the gzip formats, VDOM shards
//! have no offset sidecar (`Format::Vdom.offset_extension()` is `None`):
//! the ZIP's own central directory gives random access to members, so
//! this reader indexes the archive directly instead of going through the
//! sparse stream adapter.
use std::io::{Read, Seek};

use crate::error::Error;
use crate::records::Record;

#[derive(Debug, Clone)]
pub struct VdomRecord {
    pub bytes: Vec<u8>,
}

/// Reads only the members at `indices`, in ascending order, as
/// `(index, Record)` pairs. Used by the slice planner and by-identifier
/// lookup to avoid materializing an entire archive.
pub fn read_indices<R: Read + Seek>(
    reader: R,
    indices: impl IntoIterator<Item = usize>,
) -> Result<Vec<(usize, Record)>, Error> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut sorted: Vec<usize> = indices.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut out = Vec::with_capacity(sorted.len());
    for index in sorted {
        let mut file = archive
            .by_index(index)
            .map_err(|_| Error::MissingInnerMember(format!("member index {index}")))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        out.push((index, Record::Vdom(VdomRecord { bytes })));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    fn sample_zip() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = zip::ZipWriter::new(cursor);
            let options =
                zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
            writer.start_file("00000.bin", options).unwrap();
            writer.write_all(b"first").unwrap();
            writer.start_file("00001.bin", options).unwrap();
            writer.write_all(b"second").unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn reads_all_members_in_order() {
        let records = read_indices(Cursor::new(sample_zip()), [0, 1]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 0);
        assert_eq!(
            match &records[0].1 {
                Record::Vdom(v) => v.bytes.clone(),
                _ => panic!("expected vdom record"),
            },
            b"first"
        );
    }

    #[test]
    fn reads_selected_indices_only() {
        let records = read_indices(Cursor::new(sample_zip()), [1]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, 1);
        match &records[0].1 {
            Record::Vdom(v) => assert_eq!(v.bytes, b"second"),
            _ => panic!("expected vdom record"),
        }
    }

    #[test]
    fn missing_index_errors() {
        assert!(read_indices(Cursor::new(sample_zip()), [5]).is_err());
    }
}
