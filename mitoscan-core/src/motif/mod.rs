//! Exact motif search
//!
//! A [`MotifIndex`] is built once per target sequence and then answers any
//! number of motif queries without rescanning the target. Queries report
//! every occurrence, overlapping ones included, as 0-based offsets into the
//! original target.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

mod fm_index;

use fm_index::FmIndex;

/// Result of a single motif query.
///
/// `count` is derived from `positions` at construction, so the two never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifQueryResult {
    motif: String,
    count: usize,
    positions: Vec<usize>,
}

impl MotifQueryResult {
    pub fn new(motif: &[u8], positions: Vec<usize>) -> Self {
        Self {
            motif: motif.iter().map(|&b| char::from(b)).collect(),
            count: positions.len(),
            positions,
        }
    }

    pub fn motif(&self) -> &str {
        &self.motif
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Ascending start offsets
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Reusable exact-match index over one target sequence.
///
/// Once built the index is immutable, so a shared reference can be queried
/// from many threads at once. [`MotifIndex::new`] yields an unbuilt index
/// that rejects queries with [`CoreError::InvalidState`].
#[derive(Debug, Clone, Default)]
pub struct MotifIndex {
    target: Vec<u8>,
    fm: Option<FmIndex>,
}

impl MotifIndex {
    /// An index with no target yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `target`. Time and space are linear in its length.
    pub fn build<T: AsRef<[u8]>>(target: T) -> CoreResult<Self> {
        let target = target.as_ref();
        let fm = FmIndex::build(target)?;

        log::debug!(
            "built motif index over {} bp (~{} bytes)",
            target.len(),
            fm.size_in_bytes()
        );

        Ok(Self {
            target: target.to_vec(),
            fm: Some(fm),
        })
    }

    pub fn is_built(&self) -> bool {
        self.fm.is_some()
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    /// Find every occurrence of `motif`.
    ///
    /// A motif longer than the target yields an empty result, not an error.
    pub fn query<M: AsRef<[u8]>>(&self, motif: M) -> CoreResult<MotifQueryResult> {
        let motif = motif.as_ref();
        let fm = self
            .fm
            .as_ref()
            .ok_or_else(|| CoreError::invalid_state("motif index queried before build"))?;

        if motif.is_empty() {
            return Err(CoreError::invalid_input("motif must not be empty"));
        }
        if motif.len() > self.target.len() {
            return Ok(MotifQueryResult::new(motif, Vec::new()));
        }

        Ok(MotifQueryResult::new(motif, fm.locate(motif)))
    }

    /// Number of occurrences of `motif`
    pub fn count<M: AsRef<[u8]>>(&self, motif: M) -> CoreResult<usize> {
        self.query(motif).map(|result| result.count())
    }
}
