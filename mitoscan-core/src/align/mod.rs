//! Pairwise alignment engine
//!
//! Optimal global (Needleman-Wunsch) and local (Smith-Waterman) alignment
//! under a linear gap model. Both modes share one score matrix and one
//! traceback; they differ only in the border values, the zero floor and where
//! traceback starts and stops.
//!
//! Traceback breaks ties deterministically: diagonal (substitution) first,
//! then vertical (gap in the second sequence), then horizontal (gap in the
//! first sequence).

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

mod matrix;
pub mod summary;

pub use summary::{AlignmentBlock, AlignmentSummary, ComparisonSymbol, DEFAULT_BLOCK_WIDTH};

/// Character inserted into aligned sequences for gap columns
pub const GAP_MARKER: char = '-';

/// Which dynamic-programming variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Align both sequences end to end
    Global,
    /// Align the best-scoring pair of substrings
    Local,
}

impl Default for AlignmentMode {
    fn default() -> Self {
        Self::Global
    }
}

impl AlignmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "local" => Ok(Self::Local),
            other => Err(CoreError::invalid_configuration(format!(
                "unknown alignment mode '{}' (expected 'global' or 'local')",
                other
            ))),
        }
    }
}

/// Linear-gap scoring scheme.
///
/// No sign constraints are enforced; a positive gap "penalty" still produces
/// a deterministic alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    /// Score for two equal characters
    pub match_score: i32,
    /// Score for two unequal characters
    pub mismatch: i32,
    /// Score per gap column
    pub gap: i32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch: -1,
            gap: -2,
        }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    #[inline]
    pub fn substitution(&self, x: u8, y: u8) -> i32 {
        if x == y {
            self.match_score
        } else {
            self.mismatch
        }
    }

    /// Check that no cell of an `n x m` alignment can overflow `i32`.
    pub fn validate_for(&self, n: usize, m: usize) -> CoreResult<()> {
        let largest = [self.match_score, self.mismatch, self.gap]
            .iter()
            .map(|v| i64::from(*v).abs())
            .max()
            .unwrap_or(0);

        let columns = i64::try_from(n)
            .ok()
            .zip(i64::try_from(m).ok())
            .and_then(|(n, m)| n.checked_add(m));

        match columns.and_then(|c| c.checked_mul(largest)) {
            Some(bound) if bound <= i64::from(i32::MAX) => Ok(()),
            _ => Err(CoreError::invalid_input(format!(
                "scoring scheme {:?} overflows for sequences of length {} and {}",
                self, n, m
            ))),
        }
    }
}

/// An optimal pairwise alignment.
///
/// `aligned1`, `aligned2` and `comparison` always have the same number of
/// `char`s, one per column. Each input byte becomes one `char`
/// (`char::from(b)`), so ASCII inputs round-trip exactly; bytes `>= 0x80`
/// encode as two UTF-8 bytes, so compare lengths with `chars().count()` or
/// [`AlignmentResult::len`], never `String::len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub mode: AlignmentMode,
    pub aligned1: String,
    pub aligned2: String,
    /// One [`ComparisonSymbol`] per column
    pub comparison: String,
    pub score: i32,
    /// Span of the first sequence covered by the alignment
    pub seq1_range: Range<usize>,
    /// Span of the second sequence covered by the alignment
    pub seq2_range: Range<usize>,
}

impl AlignmentResult {
    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.comparison.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.comparison.is_empty()
    }
}

/// Align `seq_a` against `seq_b`.
pub fn align(
    seq_a: &[u8],
    seq_b: &[u8],
    scheme: &ScoringScheme,
    mode: AlignmentMode,
) -> CoreResult<AlignmentResult> {
    if seq_a.is_empty() || seq_b.is_empty() {
        return Err(CoreError::invalid_input(format!(
            "cannot align empty sequence (lengths {} and {})",
            seq_a.len(),
            seq_b.len()
        )));
    }
    scheme.validate_for(seq_a.len(), seq_b.len())?;

    log::debug!(
        "{} alignment: {}x{} matrix ({} cells)",
        mode,
        seq_a.len() + 1,
        seq_b.len() + 1,
        (seq_a.len() + 1).saturating_mul(seq_b.len() + 1)
    );

    let filled = matrix::fill(seq_a, seq_b, scheme, mode)?;
    let traced = matrix::traceback(seq_a, seq_b, scheme, mode, &filled);

    log::trace!(
        "traceback from {:?} to {:?}, score {}",
        filled.end,
        traced.start,
        filled.score
    );

    Ok(AlignmentResult {
        mode,
        aligned1: traced.aligned1,
        aligned2: traced.aligned2,
        comparison: traced.comparison,
        score: filled.score,
        seq1_range: traced.start.0..filled.end.0,
        seq2_range: traced.start.1..filled.end.1,
    })
}

/// A scoring scheme and mode bundled for repeated use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentEngine {
    pub scheme: ScoringScheme,
    pub mode: AlignmentMode,
}

impl AlignmentEngine {
    pub fn new(scheme: ScoringScheme, mode: AlignmentMode) -> Self {
        Self { scheme, mode }
    }

    pub fn global(scheme: ScoringScheme) -> Self {
        Self::new(scheme, AlignmentMode::Global)
    }

    pub fn local(scheme: ScoringScheme) -> Self {
        Self::new(scheme, AlignmentMode::Local)
    }

    pub fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> CoreResult<AlignmentResult> {
        align(seq_a, seq_b, &self.scheme, self.mode)
    }
}
