//! Session-scoped sequence context
//!
//! A [`Session`] owns the records loaded for one user or request together
//! with one prebuilt [`MotifIndex`] per record. Replacing the loaded set means
//! building a new session; nothing is shared between sessions.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::align::{align, AlignmentMode, AlignmentResult, ScoringScheme};
use crate::error::{CoreError, CoreResult};
use crate::motif::{MotifIndex, MotifQueryResult};

/// A named sequence supplied by a record loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub description: String,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    pub fn new<I, D, S>(id: I, description: D, sequence: S) -> Self
    where
        I: Into<String>,
        D: Into<String>,
        S: Into<Vec<u8>>,
    {
        Self {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Percentage of G and C bases (case-insensitive), 0.0 for an empty sequence
    pub fn gc_content(&self) -> f64 {
        if self.sequence.is_empty() {
            return 0.0;
        }
        let gc = self
            .sequence
            .iter()
            .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
            .count();
        (gc as f64 / self.sequence.len() as f64) * 100.0
    }

    /// Bytes in `start..end`
    pub fn subsequence(&self, start: usize, end: usize) -> CoreResult<&[u8]> {
        if start > end || end > self.sequence.len() {
            return Err(CoreError::invalid_input(format!(
                "subsequence {}..{} out of range for '{}' (length {})",
                start,
                end,
                self.id,
                self.sequence.len()
            )));
        }
        Ok(&self.sequence[start..end])
    }
}

/// Motif hits for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMotifHits {
    pub id: String,
    pub description: String,
    pub result: MotifQueryResult,
}

/// Alignment of the reference against one other record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceComparison {
    pub id: String,
    pub score: i32,
    /// Percentage of match columns
    pub similarity: f64,
}

struct Entry {
    record: SequenceRecord,
    index: MotifIndex,
}

/// Loaded records plus their motif indexes.
pub struct Session {
    entries: Vec<Entry>,
    by_id: HashMap<String, usize>,
}

impl Session {
    /// Take ownership of `records` and index each one.
    pub fn new(records: Vec<SequenceRecord>) -> CoreResult<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), i).is_some() {
                return Err(CoreError::invalid_input(format!(
                    "duplicate sequence id '{}'",
                    record.id
                )));
            }
        }

        let entries = records
            .into_par_iter()
            .map(|record| -> CoreResult<Entry> {
                let index = MotifIndex::build(&record.sequence)?;
                Ok(Entry { record, index })
            })
            .collect::<CoreResult<Vec<Entry>>>()?;

        log::debug!("session indexed {} records", entries.len());

        Ok(Self { entries, by_id })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in load order
    pub fn records(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    pub fn record(&self, id: &str) -> Option<&SequenceRecord> {
        self.entry(id).ok().map(|e| &e.record)
    }

    pub fn index(&self, id: &str) -> Option<&MotifIndex> {
        self.entry(id).ok().map(|e| &e.index)
    }

    fn entry(&self, id: &str) -> CoreResult<&Entry> {
        self.by_id
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| CoreError::invalid_input(format!("unknown sequence id '{}'", id)))
    }

    /// Align two loaded records by id.
    pub fn align(
        &self,
        id1: &str,
        id2: &str,
        scheme: &ScoringScheme,
        mode: AlignmentMode,
    ) -> CoreResult<AlignmentResult> {
        let first = self.entry(id1)?;
        let second = self.entry(id2)?;
        align(&first.record.sequence, &second.record.sequence, scheme, mode)
    }

    /// Query `motif` against every record, in load order.
    pub fn find_motif(&self, motif: &[u8]) -> CoreResult<Vec<RecordMotifHits>> {
        self.entries
            .iter()
            .map(|entry| -> CoreResult<RecordMotifHits> {
                Ok(RecordMotifHits {
                    id: entry.record.id.clone(),
                    description: entry.record.description.clone(),
                    result: entry.index.query(motif)?,
                })
            })
            .collect()
    }

    /// Align the reference against every other record.
    pub fn compare_to_reference(
        &self,
        reference_id: &str,
        scheme: &ScoringScheme,
        mode: AlignmentMode,
    ) -> CoreResult<Vec<ReferenceComparison>> {
        let reference = &self.entry(reference_id)?.record;

        self.entries
            .par_iter()
            .filter(|entry| entry.record.id != reference.id)
            .map(|entry| -> CoreResult<ReferenceComparison> {
                let result = align(&reference.sequence, &entry.record.sequence, scheme, mode)?;
                let summary = result.summary()?;
                Ok(ReferenceComparison {
                    id: entry.record.id.clone(),
                    score: result.score,
                    similarity: summary.similarity,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(vec![
            SequenceRecord::new("NC_01", "first", "GATCGATCGATC"),
            SequenceRecord::new("NC_02", "second", "GATCCATCGATC"),
            SequenceRecord::new("NC_03", "third", "TTTTTTTT"),
        ])
        .unwrap()
    }

    #[test]
    fn test_record_helpers() {
        let record = SequenceRecord::new("id", "", "GGCCAATT");
        assert_eq!(record.len(), 8);
        assert!((record.gc_content() - 50.0).abs() < 1e-9);
        assert_eq!(record.subsequence(2, 6).unwrap(), b"CCAA");
        assert!(record.subsequence(4, 9).is_err());
        assert!(record.subsequence(5, 4).is_err());
        assert_eq!(SequenceRecord::new("e", "", "").gc_content(), 0.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Session::new(vec![
            SequenceRecord::new("a", "", "ACGT"),
            SequenceRecord::new("a", "", "TTTT"),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_find_motif_per_record() {
        let hits = session().find_motif(b"GATC").unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, "NC_01");
        assert_eq!(hits[0].result.positions(), &[0, 4, 8]);
        assert_eq!(hits[1].result.positions(), &[0, 8]);
        assert_eq!(hits[2].result.count(), 0);
    }

    #[test]
    fn test_align_by_id() {
        let s = session();
        let scheme = ScoringScheme::default();
        let result = s.align("NC_01", "NC_02", &scheme, AlignmentMode::Global).unwrap();
        assert_eq!(result.score, 10);

        let err = s.align("NC_01", "missing", &scheme, AlignmentMode::Global).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_compare_to_reference() {
        let comparisons = session()
            .compare_to_reference("NC_01", &ScoringScheme::default(), AlignmentMode::Global)
            .unwrap();

        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].id, "NC_02");
        assert!((comparisons[0].similarity - 11.0 / 12.0 * 100.0).abs() < 1e-9);
        assert_eq!(comparisons[1].id, "NC_03");
    }

    #[test]
    fn test_reference_similarity_with_dash_bytes() {
        let s = Session::new(vec![
            SequenceRecord::new("ref", "", "AC-GT"),
            SequenceRecord::new("copy", "", "AC-GT"),
        ])
        .unwrap();
        let comparisons = s
            .compare_to_reference("ref", &ScoringScheme::default(), AlignmentMode::Global)
            .unwrap();

        assert_eq!(comparisons[0].score, 5);
        assert_eq!(comparisons[0].similarity, 100.0);
    }

    #[test]
    fn test_index_lookup() {
        let s = session();
        assert!(s.index("NC_03").unwrap().is_built());
        assert!(s.index("nope").is_none());
        assert_eq!(s.records().count(), 3);
    }
}
