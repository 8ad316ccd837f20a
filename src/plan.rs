//! Slice planner.
//!
//! Turns a global `(start, stop, step)` slice or a set of document
//! identifiers into a per-shard plan of local indices to materialize
//! (`spec.md` §4.7), without opening any shard whose index set would be
//! empty.
use std::collections::HashMap;

use crate::docid::{DocId, FileId};
use crate::error::Error;

/// Plans a global-index slice over `shards` (in catalog order, as
/// returned by [`crate::catalog::subset_counts`]). Clamps `start`/`stop`
/// to `[0, total)` first; a non-overlapping shard is omitted from the
/// plan entirely rather than included with an empty index set.
///
/// Negative step is not supported (open question in `spec.md` §9,
/// resolved in `DESIGN.md`): `step` is unsigned and `0` is rejected.
pub fn slice_plan(
    shards: &[(FileId, u64)],
    start: u64,
    stop: u64,
    step: u64,
) -> Result<Vec<(FileId, Vec<u64>)>, Error> {
    if step == 0 {
        return Err(Error::Decode("slice step must be non-zero".to_string()));
    }

    let total: u64 = shards.iter().map(|(_, count)| count).sum();
    let start = start.min(total);
    let stop = stop.min(total);
    if start >= stop {
        return Ok(Vec::new());
    }

    let mut plan = Vec::new();
    let mut running = 0u64;
    for (file_id, count) in shards {
        let shard_start = running;
        let shard_end = running + count;
        running = shard_end;

        if shard_end <= start || shard_start >= stop {
            continue;
        }

        let lower = shard_start.max(start);
        let upper = shard_end.min(stop);

        let offset_into_step = (lower - start) % step;
        let first = if offset_into_step == 0 {
            lower
        } else {
            lower + (step - offset_into_step)
        };

        let mut indices = Vec::new();
        let mut g = first;
        while g < upper {
            indices.push(g - shard_start);
            g += step;
        }

        if !indices.is_empty() {
            plan.push((*file_id, indices));
        }
    }
    Ok(plan)
}

/// Groups `doc_ids` by the shard they belong to, preserving first-seen
/// order of the *group*, not of every individual input element — this
/// differs deliberately from Python's `itertools.groupby`, which only
/// merges consecutive equal keys (`spec.md` §4.7).
pub fn group_by_identifier(doc_ids: &[DocId]) -> Vec<(FileId, Vec<u32>)> {
    let mut order: Vec<FileId> = Vec::new();
    let mut groups: HashMap<FileId, Vec<u32>> = HashMap::new();

    for doc_id in doc_ids {
        let file_id = doc_id.file_id();
        groups
            .entry(file_id)
            .or_insert_with(|| {
                order.push(file_id);
                Vec::new()
            })
            .push(doc_id.doc);
    }

    order
        .into_iter()
        .map(|file_id| {
            let indices = groups.remove(&file_id).expect("group inserted above");
            (file_id, indices)
        })
        .collect()
}
