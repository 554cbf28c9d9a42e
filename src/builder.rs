//! Type-state builder for [`crate::index::Index`].
//!
//! Mirrors the teacher crate's `ReedSolomon<New|Configured|Computed>` pattern
//! (`src/reed_solomon/typestate.rs`): the `Collecting`/`Finalized` state the
//! spec describes is encoded as a phantom marker so `insert` after `finalize`
//! is a compile error rather than the reference's "implementation-defined,
//! silently accepts and breaks invariants" behavior (§7). There is no
//! `IndexBuilder<Finalized>` type — `finalize` consumes the builder by value
//! and returns the immutable [`crate::index::Index`] itself, since the spec
//! describes the finalized state purely in terms of what it forbids
//! (further inserts), not any capability it still offers as a builder.

use std::marker::PhantomData;

use crate::codec;
use crate::domain::KeywordId;
use crate::error::{BuildError, BuildResult};
use crate::index::Index;

/// Zero-sized marker: the builder accepts `insert` calls.
pub struct Collecting;

const MIN_CAPACITY: usize = 1024;

/// A dictionary under construction.
pub struct IndexBuilder<State = Collecting> {
    words: Vec<[u8; codec::L]>,
    _state: PhantomData<State>,
}

impl IndexBuilder<Collecting> {
    /// Start collecting, with room for at least `capacity` words (and at
    /// least [`MIN_CAPACITY`], matching the spec's initial-capacity floor).
    pub fn create(capacity: usize) -> Self {
        IndexBuilder {
            words: Vec::with_capacity(capacity.max(MIN_CAPACITY)),
            _state: PhantomData,
        }
    }

    /// Insert one keyword. `word` must be exactly `L` bytes; anything else
    /// (including empty input) is silently ignored, per §4.6 — the prep
    /// driver's line reader is responsible for filtering malformed lines
    /// before they reach this call.
    pub fn insert(&mut self, word: &[u8]) {
        let Ok(fixed): Result<[u8; codec::L], _> = word.try_into() else {
            return;
        };
        self.words.push(fixed);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Build the pair index and deletion index (§4.4, §4.5) and consume the
    /// builder, returning the immutable, searchable [`Index`].
    pub fn finalize(self) -> BuildResult<Index> {
        if self.words.len() > KeywordId::MAX as usize + 1 {
            return Err(BuildError::TooManyKeywords(self.words.len() as u32));
        }
        Ok(Index::new(self.words))
    }
}

impl Default for IndexBuilder<Collecting> {
    fn default() -> Self {
        Self::create(MIN_CAPACITY)
    }
}
