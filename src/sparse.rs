//! Sparse stream adapter.
//!
//! Presents the concatenation of a selected subset of byte ranges inside a
//! seekable source as one contiguous [`Read`] stream, so that a gzip
//! decoder sees only the gzip members it was asked for. Skipped bytes are
//! never read, only seeked over (`spec.md` §4.4, §9).
use std::collections::VecDeque;
use std::io::{Read, Seek, SeekFrom};

/// One included byte range `[start, end)`. `end` is `None` for the final
/// selected range when no upper bound is known (end of file).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Range {
    start: u64,
    end: Option<u64>,
}

/// Wraps a seekable byte source, exposing only the selected offset ranges
/// as a contiguous stream.
pub struct SparseReader<R> {
    inner: R,
    ranges: VecDeque<Range>,
    /// Bytes remaining in the range currently being read, `None` once a
    /// range with no upper bound is active (read until EOF).
    remaining: Option<Option<u64>>,
}

impl<R: Read + Seek> SparseReader<R> {
    /// Builds a reader over `inner` that yields the record bodies at
    /// `indices`, given the shard's offset list. `offsets[i]` is the start
    /// of record `i`; the end of record `i` is `offsets[i + 1]` when known,
    /// else the stream runs to EOF.
    pub fn from_offsets(
        inner: R,
        offsets: &[u64],
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        let mut sorted: Vec<usize> = indices.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let ranges = sorted
            .into_iter()
            .filter(|&i| i < offsets.len())
            .map(|i| Range {
                start: offsets[i],
                end: offsets.get(i + 1).copied(),
            })
            .collect();

        SparseReader {
            inner,
            ranges,
            remaining: None,
        }
    }

    fn advance_to_next_range(&mut self) -> std::io::Result<bool> {
        loop {
            let Some(range) = self.ranges.pop_front() else {
                self.remaining = None;
                return Ok(false);
            };
            let len = range.end.map(|end| end.saturating_sub(range.start));
            if len == Some(0) {
                // Zero-length range: nothing to read, move on without
                // touching the underlying source.
                continue;
            }
            self.inner.seek(SeekFrom::Start(range.start))?;
            self.remaining = Some(len);
            return Ok(true);
        }
    }
}

impl<R: Read + Seek> Read for SparseReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            match self.remaining {
                None => {
                    if !self.advance_to_next_range()? {
                        return Ok(0);
                    }
                }
                Some(Some(0)) => {
                    self.remaining = None;
                }
                Some(remaining_len) => {
                    let cap = remaining_len
                        .map(|n| n.min(buf.len() as u64) as usize)
                        .unwrap_or(buf.len());
                    let read = self.inner.read(&mut buf[..cap])?;
                    if read == 0 {
                        // Underlying EOF reached before the expected range
                        // end (only possible for the open-ended last
                        // range); move on to the next selected range.
                        self.remaining = None;
                        continue;
                    }
                    if let Some(n) = remaining_len {
                        self.remaining = Some(Some(n - read as u64));
                    }
                    return Ok(read);
                }
            }
        }
    }
}
