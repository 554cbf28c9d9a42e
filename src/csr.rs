//! Generic compressed-sparse-row posting table.
//!
//! A dense `offsets` array of length `slots + 1` delimits, for each slot,
//! a contiguous run in a shared `payload` array: `payload[offsets[s]..offsets[s+1]]`
//! is exactly the set of postings filed under slot `s`. `counts[s]` is kept
//! alongside `offsets` (rather than discarded once `offsets` is computed)
//! purely so the serializer can later decide between a 16- or 32-bit count
//! width without re-deriving it from `offsets`.
//!
//! Construction is two-pass: a counting pass sizes `offsets`/`payload`, then
//! a scatter pass walks the same entries again and writes each payload into
//! its slot's run using a scratch cursor (a copy of `offsets`, advanced one
//! per insert and discarded once the table is built).

/// A built, immutable CSR posting table over a dense `[0, slots)` key space.
#[derive(Debug, Clone)]
pub struct CsrTable<T> {
    slots: usize,
    offsets: Vec<u32>,
    counts: Vec<u32>,
    payload: Vec<T>,
}

impl<T: Copy + Default> CsrTable<T> {
    /// Build a table over `slots` keys from the entries `entries_fn` produces.
    ///
    /// `entries_fn` is called twice — once to count, once to scatter — so it
    /// must be a pure, repeatable iterator factory (e.g. "iterate over all
    /// keywords and yield their slot for this pair"), not a one-shot stream.
    pub fn build<F, I>(slots: usize, entries_fn: F) -> Self
    where
        F: Fn() -> I,
        I: Iterator<Item = (u32, T)>,
    {
        let mut counts = vec![0u32; slots];
        for (slot, _) in entries_fn() {
            counts[slot as usize] += 1;
        }

        let mut offsets = vec![0u32; slots + 1];
        for s in 0..slots {
            offsets[s + 1] = offsets[s] + counts[s];
        }

        let total = offsets[slots] as usize;
        let mut payload = vec![T::default(); total];

        // Scratch cursor, a copy of `offsets` advanced per insert; scoped to
        // this function and dropped when it returns.
        let mut cursor = offsets.clone();
        for (slot, value) in entries_fn() {
            let c = &mut cursor[slot as usize];
            payload[*c as usize] = value;
            *c += 1;
        }

        CsrTable {
            slots,
            offsets,
            counts,
            payload,
        }
    }

    /// Construct a table directly from precomputed `offsets`/`counts`/`payload`,
    /// used by the deserializer once it has reconstructed `offsets` from the
    /// stored `counts` by prefix sum.
    pub fn from_parts(offsets: Vec<u32>, counts: Vec<u32>, payload: Vec<T>) -> Self {
        debug_assert_eq!(offsets.len(), counts.len() + 1);
        debug_assert_eq!(*offsets.last().unwrap() as usize, payload.len());
        CsrTable {
            slots: counts.len(),
            offsets,
            counts,
            payload,
        }
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn payload(&self) -> &[T] {
        &self.payload
    }

    /// `[begin, end)` byte range of slot `slot` within [`Self::payload`].
    pub fn range(&self, slot: u32) -> (u32, u32) {
        let s = slot as usize;
        (self.offsets[s], self.offsets[s + 1])
    }

    /// Number of postings filed under `slot`.
    pub fn slot_len(&self, slot: u32) -> u32 {
        self.counts[slot as usize]
    }

    /// The postings filed under `slot`.
    pub fn postings(&self, slot: u32) -> &[T] {
        let (begin, end) = self.range(slot);
        &self.payload[begin as usize..end as usize]
    }

    /// Total number of postings across all slots; equal to `offsets[slots]`.
    pub fn total_postings(&self) -> usize {
        self.payload.len()
    }
}
