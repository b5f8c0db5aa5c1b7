//! MitoScan Core Library
//!
//! Pairwise global/local alignment, indexed exact motif search, and the
//! session context that ties loaded sequences to their indexes.

pub mod error;
pub mod align;
pub mod motif;
pub mod session;

// Re-export commonly used types and functions
pub use error::{CoreError, CoreResult};
pub use align::{
    align, AlignmentBlock, AlignmentEngine, AlignmentMode, AlignmentResult, AlignmentSummary,
    ComparisonSymbol, ScoringScheme, DEFAULT_BLOCK_WIDTH, GAP_MARKER,
};
pub use motif::{MotifIndex, MotifQueryResult};
pub use session::{RecordMotifHits, ReferenceComparison, SequenceRecord, Session};

/// Version information for the MitoScan core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_core_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MotifIndex>();
        assert_send_sync::<AlignmentEngine>();
        assert_send_sync::<Session>();
    }
}
