//! Splitting the ordered entry store into protocol-sized segments.

use crate::config::{BoundaryPolicy, SegmentLimits};
use crate::entry::Entry;
use crate::logging::LOG_TARGET;

/// One output document: a contiguous run of entries and the name its file gets.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    /// Position in the output, starting at 0
    pub index: usize,
    /// File stem: the base name, suffixed with the index from the second segment on
    pub name: String,
    pub entries: Vec<&'a Entry>,
}

/// Name of the segment at `index`: `sitemap`, `sitemap1`, `sitemap2`, ...
///
/// # Examples
///
/// ```
/// # use core_smap::segment_name;
/// assert_eq!(segment_name("sitemap", 0), "sitemap");
/// assert_eq!(segment_name("sitemap", 3), "sitemap3");
/// ```
pub fn segment_name(base_name: &str, index: usize) -> String {
    if index == 0 {
        base_name.to_string()
    } else {
        format!("{base_name}{index}")
    }
}

#[derive(Debug, Clone, Copy)]
enum Boundary {
    Size,
    Count,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Size => write!(f, "size"),
            Boundary::Count => write!(f, "count"),
        }
    }
}

/// Walks `entries` once, in order, and buckets them into segments.
///
/// A segment is closed when the running estimated size reaches `limits.max_bytes`
/// or when it already holds `limits.max_entries` entries. The entry that triggers
/// the boundary is placed according to `policy`. Segments are returned in index
/// order and are never empty. Zero limits are treated as 1.
pub fn segment<'a>(
    base_name: &str,
    entries: &'a [Entry],
    limits: &SegmentLimits,
    policy: BoundaryPolicy,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut buffer: Vec<&'a Entry> = Vec::new();
    let mut size: usize = 0;
    let mut index: usize = 0;
    let max_entries = limits.max_entries.max(1);
    let max_bytes = limits.max_bytes.max(1);

    for (position, entry) in entries.iter().enumerate() {
        let entry_size = entry.estimated_size();
        size += entry_size;

        let boundary = if size >= max_bytes {
            Some(Boundary::Size)
        } else if buffer.len() >= max_entries {
            Some(Boundary::Count)
        } else {
            None
        };

        let Some(boundary) = boundary else {
            buffer.push(entry);
            continue;
        };

        tracing::debug!(
            target: LOG_TARGET,
            "{} limit reached at entry {}: closing segment '{}' with {} entries",
            boundary,
            position,
            segment_name(base_name, index),
            buffer.len()
        );

        // A lone oversized entry arrives with an empty buffer: there is nothing to close.
        if !buffer.is_empty() {
            segments.push(Segment {
                index,
                name: segment_name(base_name, index),
                entries: std::mem::take(&mut buffer),
            });
            index += 1;
        }

        match (policy, boundary) {
            (BoundaryPolicy::Carry, _) => {
                buffer.push(entry);
                size = entry_size;
            }
            (BoundaryPolicy::Drop, Boundary::Size) => {
                tracing::warn!(target: LOG_TARGET, "Dropped entry {} ({}) at size boundary", position, entry.location());
                size = 0;
            }
            (BoundaryPolicy::Drop, Boundary::Count) => {
                tracing::warn!(target: LOG_TARGET, "Dropped entry {} ({}) at count boundary", position, entry.location());
            }
        }
    }

    if !buffer.is_empty() {
        segments.push(Segment {
            index,
            name: segment_name(base_name, index),
            entries: buffer,
        });
    }

    tracing::debug!(
        target: LOG_TARGET,
        "Split {} entries into {} segment(s) for '{}'",
        entries.len(),
        segments.len(),
        base_name
    );
    segments
}
