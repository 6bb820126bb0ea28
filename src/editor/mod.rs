//! Glue for an editing host: a text buffer that keeps the analyzed-region
//! ledger and the reader's cache in step with the edits made to it.

use tracing::debug;

use crate::reader::{Clock, ReaderEngine, SystemClock};
use crate::scanning::{clamp, TextRange, TokenSpan};
use crate::storage::FormStore;

#[derive(Debug)]
pub struct Buffer<C: Clock + Clone = SystemClock> {
    text: String,
    store: FormStore,
    reader: ReaderEngine<C>,
    clock: C,
}

impl Buffer<SystemClock> {
    pub fn new(text: impl Into<String>) -> Buffer<SystemClock> {
        Buffer::with_clock(text, SystemClock)
    }
}

impl<C: Clock + Clone> Buffer<C> {
    /// The store and the reader both take their time from `clock`.
    pub fn with_clock(text: impl Into<String>, clock: C) -> Buffer<C> {
        Buffer {
            text: text.into(),
            store: FormStore::new(),
            reader: ReaderEngine::with_clock(clock.clone()),
            clock,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn reader(&self) -> &ReaderEngine<C> {
        &self.reader
    }

    /// Replace `old_length` bytes at `location` with `replacement`. Offsets
    /// past the end of the text, or inside a multi-byte character, are pulled
    /// back to the nearest valid position.
    pub fn edit(&mut self, location: usize, old_length: usize, replacement: &str) {
        let start = clamp(&self.text, location);
        let end = clamp(&self.text, location.saturating_add(old_length)).max(start);

        self.text
            .replace_range(start..end, replacement);

        self.store
            .apply_edit(
                start,
                end - start,
                replacement.len(),
                self.clock
                    .now(),
            );
        self.reader
            .invalidate_from(start);

        debug!(start, end, inserted = replacement.len(), "edited buffer");
    }

    /// Tokens intersecting `range`. The complete form(s) around it are
    /// recorded as analyzed.
    pub fn viewport(&mut self, range: TextRange) -> Vec<TokenSpan> {
        let viewport = self
            .reader
            .analyze_viewport(&self.text, range);

        if !viewport
            .range
            .is_empty()
        {
            self.store
                .upsert(
                    viewport
                        .range
                        .start,
                    viewport
                        .range
                        .end,
                    self.clock
                        .now(),
                );
        }

        viewport
            .tokens
            .into_iter()
            .filter(|token| {
                token
                    .range()
                    .intersects(&range)
            })
            .collect()
    }

    /// The parts of `range` not covered by any region analyzed since it was
    /// last edited.
    pub fn stale_regions(&self, range: TextRange) -> Vec<TextRange> {
        let limit = self
            .text
            .len();
        let start = range
            .start
            .min(limit);
        let end = range
            .end
            .min(limit);

        let mut regions = Vec::new();
        let mut cursor = start;

        for analyzed in self
            .store
            .intersecting(start, end)
        {
            if analyzed.start > cursor {
                regions.push(TextRange::new(cursor, analyzed.start));
            }
            cursor = cursor.max(analyzed.end);
        }
        if cursor < end {
            regions.push(TextRange::new(cursor, end));
        }

        regions
    }
}
