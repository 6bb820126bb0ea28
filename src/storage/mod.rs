//! Bookkeeping of which regions of a buffer have already been analyzed, kept
//! current as edits arrive so that untouched regions need not be rescanned.

use std::time::Instant;

use tracing::debug;

/// A previously analyzed half-open byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRange {
    pub start: usize,
    pub end: usize,
    pub updated_at: Instant,
}

impl FormRange {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.end > start && self.start < end
    }

    /// Whether recording `[start, end)` makes this range redundant: it
    /// overlaps, is the same range, or is empty and sits within it.
    fn superseded_by(&self, start: usize, end: usize) -> bool {
        self.overlaps(start, end)
            || (self.start == start && self.end == end)
            || (self.is_empty() && start <= self.start && self.start <= end)
    }
}

/// Ranges are kept sorted by `start` and never overlap one another.
#[derive(Debug, Default)]
pub struct FormStore {
    ranges: Vec<FormRange>,
}

impl FormStore {
    pub fn new() -> FormStore {
        FormStore { ranges: Vec::new() }
    }

    /// Record `[start, end)` as analyzed, evicting any stored range it
    /// overlaps or duplicates, and any empty range it covers.
    ///
    /// # Panics
    ///
    /// If `start > end`.
    pub fn upsert(&mut self, start: usize, end: usize, timestamp: Instant) -> FormRange {
        assert!(
            start <= end,
            "range start {} is past its end {}",
            start,
            end
        );

        let before = self
            .ranges
            .len();
        self.ranges
            .retain(|r| !r.superseded_by(start, end));
        let evicted = before
            - self
                .ranges
                .len();
        if evicted > 0 {
            debug!(start, end, evicted, "upsert evicted overlapping ranges");
        }

        let range = FormRange {
            start,
            end,
            updated_at: timestamp,
        };
        let index = self
            .ranges
            .partition_point(|r| r.start <= start);
        self.ranges
            .insert(index, range);
        range
    }

    /// Account for replacing `old_length` bytes at `location` with
    /// `new_length` bytes. Ranges before the edit are untouched, ranges after
    /// it move by the difference, and ranges the edit touches are dropped.
    pub fn apply_edit(
        &mut self,
        location: usize,
        old_length: usize,
        new_length: usize,
        timestamp: Instant,
    ) {
        let edit_end = location.saturating_add(old_length);
        let before = self
            .ranges
            .len();

        self.ranges
            .retain_mut(|r| {
                if r.end <= location {
                    true
                } else if r.start >= edit_end {
                    r.start = (r.start - old_length).saturating_add(new_length);
                    r.end = (r.end - old_length).saturating_add(new_length);
                    r.updated_at = timestamp;
                    true
                } else {
                    false
                }
            });

        debug!(
            location,
            old_length,
            new_length,
            dropped = before
                - self
                    .ranges
                    .len(),
            "applied edit"
        );
    }

    /// Every stored range overlapping `[start, end)`, in order.
    pub fn intersecting(&self, start: usize, end: usize) -> Vec<FormRange> {
        self.ranges
            .iter()
            .filter(|r| r.overlaps(start, end))
            .copied()
            .collect()
    }

    pub fn ranges(&self) -> &[FormRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges
            .is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges
            .clear();
    }
}
