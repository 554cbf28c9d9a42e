//! The finalized, immutable dual-case index: raw words, nibble codes, the
//! Case-A pair index, and the Case-B deletion index, all built together by
//! [`crate::builder::IndexBuilder::finalize`].

use crate::codec;
use crate::deletion_index::DeletionIndex;
use crate::domain::{KeywordId, NibbleCode};
use crate::pair_index::PairIndex;

/// A finalized dictionary, ready for search or serialization.
///
/// Owns every array it refers to; dropping an `Index` releases the raw
/// words, nibble codes, and both CSR tables together, with no shared
/// ownership or internal cycles.
pub struct Index {
    words: Vec<[u8; codec::L]>,
    codes: Vec<NibbleCode>,
    pair_index: PairIndex,
    deletion_index: DeletionIndex,
}

impl Index {
    pub(crate) fn new(words: Vec<[u8; codec::L]>) -> Self {
        let codes = words.iter().map(codec::encode).collect();
        let pair_index = PairIndex::build(&words);
        let deletion_index = DeletionIndex::build(&words);
        Index {
            words,
            codes,
            pair_index,
            deletion_index,
        }
    }

    /// Reassemble an `Index` from parts already reconstructed by the
    /// deserializer (raw words read from disk, codes re-derived from them,
    /// and both CSR tables rebuilt from stored `counts` + payload).
    pub(crate) fn from_parts(
        words: Vec<[u8; codec::L]>,
        codes: Vec<NibbleCode>,
        pair_index: PairIndex,
        deletion_index: DeletionIndex,
    ) -> Self {
        Index {
            words,
            codes,
            pair_index,
            deletion_index,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, id: KeywordId) -> &[u8; codec::L] {
        &self.words[id.as_usize()]
    }

    pub fn words(&self) -> &[[u8; codec::L]] {
        &self.words
    }

    pub fn code(&self, id: KeywordId) -> NibbleCode {
        self.codes[id.as_usize()]
    }

    pub fn codes(&self) -> &[NibbleCode] {
        &self.codes
    }

    pub fn pair_index(&self) -> &PairIndex {
        &self.pair_index
    }

    pub fn deletion_index(&self) -> &DeletionIndex {
        &self.deletion_index
    }
}
