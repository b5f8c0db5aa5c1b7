//! Dynamic-programming score matrix and traceback for linear-gap alignment.

use super::{AlignmentMode, ScoringScheme, GAP_MARKER};
use super::summary::ComparisonSymbol;
use crate::error::{CoreError, CoreResult};

/// Move that produced a cell value. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Substitution: consume one symbol from each sequence
    Diagonal,
    /// Gap in the second sequence
    Vertical,
    /// Gap in the first sequence
    Horizontal,
}

/// Row-major `(n + 1) x (m + 1)` score matrix.
pub(crate) struct ScoreMatrix {
    cols: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    fn new(rows: usize, cols: usize) -> CoreResult<Self> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            CoreError::invalid_input(format!("alignment matrix {}x{} is too large", rows, cols))
        })?;
        Ok(Self {
            cols,
            cells: vec![0; len],
        })
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: i32) {
        self.cells[i * self.cols + j] = value;
    }
}

/// Filled matrix plus the cell traceback starts from.
pub(crate) struct FilledMatrix {
    pub matrix: ScoreMatrix,
    pub end: (usize, usize),
    pub score: i32,
}

/// Fill the score matrix for `mode`.
///
/// In local mode the best cell is the first maximum in row-major order, which
/// is `(0, 0)` when no cell scores above zero.
pub(crate) fn fill(
    a: &[u8],
    b: &[u8],
    scheme: &ScoringScheme,
    mode: AlignmentMode,
) -> CoreResult<FilledMatrix> {
    let n = a.len();
    let m = b.len();
    let mut matrix = ScoreMatrix::new(n + 1, m + 1)?;

    if mode == AlignmentMode::Global {
        for i in 1..=n {
            matrix.set(i, 0, i as i32 * scheme.gap);
        }
        for j in 1..=m {
            matrix.set(0, j, j as i32 * scheme.gap);
        }
    }

    let mut best = (0usize, 0usize);
    let mut best_score = 0i32;

    for i in 1..=n {
        let ai = a[i - 1];
        for j in 1..=m {
            let diagonal = matrix.get(i - 1, j - 1) + scheme.substitution(ai, b[j - 1]);
            let vertical = matrix.get(i - 1, j) + scheme.gap;
            let horizontal = matrix.get(i, j - 1) + scheme.gap;
            let mut value = diagonal.max(vertical).max(horizontal);

            if mode == AlignmentMode::Local {
                value = value.max(0);
                if value > best_score {
                    best_score = value;
                    best = (i, j);
                }
            }

            matrix.set(i, j, value);
        }
    }

    let (end, score) = match mode {
        AlignmentMode::Global => ((n, m), matrix.get(n, m)),
        AlignmentMode::Local => (best, best_score),
    };

    Ok(FilledMatrix { matrix, end, score })
}

/// Output of a traceback walk, in alignment order.
pub(crate) struct Traced {
    pub aligned1: String,
    pub aligned2: String,
    pub comparison: String,
    pub start: (usize, usize),
}

/// Walk back from `filled.end`.
///
/// Global mode stops at `(0, 0)`; local mode stops at the first zero cell.
pub(crate) fn traceback(
    a: &[u8],
    b: &[u8],
    scheme: &ScoringScheme,
    mode: AlignmentMode,
    filled: &FilledMatrix,
) -> Traced {
    let matrix = &filled.matrix;
    let (mut i, mut j) = filled.end;

    let mut aligned1: Vec<char> = Vec::new();
    let mut aligned2: Vec<char> = Vec::new();
    let mut comparison: Vec<char> = Vec::new();

    loop {
        let done = match mode {
            AlignmentMode::Global => i == 0 && j == 0,
            AlignmentMode::Local => matrix.get(i, j) == 0,
        };
        if done {
            break;
        }

        let (x, y, symbol) = match step_at(matrix, a, b, scheme, i, j) {
            Step::Diagonal => {
                i -= 1;
                j -= 1;
                let symbol = ComparisonSymbol::substitution(a[i], b[j]);
                (char::from(a[i]), char::from(b[j]), symbol)
            }
            Step::Vertical => {
                i -= 1;
                (char::from(a[i]), GAP_MARKER, ComparisonSymbol::Gap)
            }
            Step::Horizontal => {
                j -= 1;
                (GAP_MARKER, char::from(b[j]), ComparisonSymbol::Gap)
            }
        };

        aligned1.push(x);
        aligned2.push(y);
        comparison.push(symbol.as_char());
    }

    Traced {
        aligned1: aligned1.into_iter().rev().collect(),
        aligned2: aligned2.into_iter().rev().collect(),
        comparison: comparison.into_iter().rev().collect(),
        start: (i, j),
    }
}

fn step_at(
    matrix: &ScoreMatrix,
    a: &[u8],
    b: &[u8],
    scheme: &ScoringScheme,
    i: usize,
    j: usize,
) -> Step {
    let here = matrix.get(i, j);

    let diagonal = |i: usize, j: usize| {
        matrix.get(i - 1, j - 1) + scheme.substitution(a[i - 1], b[j - 1])
    };

    if i > 0 && j > 0 && here == diagonal(i, j) {
        Step::Diagonal
    } else if i > 0 && here == matrix.get(i - 1, j) + scheme.gap {
        Step::Vertical
    } else if j > 0 {
        Step::Horizontal
    } else {
        Step::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ScoringScheme {
        ScoringScheme::new(1, -1, -2)
    }

    #[test]
    fn test_global_borders() {
        let filled = fill(b"ACG", b"AC", &scheme(), AlignmentMode::Global).unwrap();
        assert_eq!(filled.matrix.get(0, 0), 0);
        assert_eq!(filled.matrix.get(3, 0), -6);
        assert_eq!(filled.matrix.get(0, 2), -4);
        assert_eq!(filled.end, (3, 2));
    }

    #[test]
    fn test_local_borders_are_zero() {
        let filled = fill(b"ACG", b"TTT", &scheme(), AlignmentMode::Local).unwrap();
        for i in 0..=3 {
            assert_eq!(filled.matrix.get(i, 0), 0);
        }
        assert_eq!(filled.score, 0);
        assert_eq!(filled.end, (0, 0));
    }

    #[test]
    fn test_local_first_maximum_wins() {
        // "A" matches twice in the target; the first occurrence in scan order is kept
        let filled = fill(b"A", b"AA", &scheme(), AlignmentMode::Local).unwrap();
        assert_eq!(filled.score, 1);
        assert_eq!(filled.end, (1, 1));
    }

    #[test]
    fn test_tie_prefers_diagonal() {
        // Both gap placements score -1; the diagonal move at (2, 1) wins
        let s = scheme();
        let filled = fill(b"AA", b"A", &s, AlignmentMode::Global).unwrap();
        let traced = traceback(b"AA", b"A", &s, AlignmentMode::Global, &filled);
        assert_eq!(filled.score, -1);
        assert_eq!(traced.aligned1, "AA");
        assert_eq!(traced.aligned2, "-A");
    }

    #[test]
    fn test_tie_prefers_vertical_over_horizontal() {
        // At (1, 1) the gap moves tie at -2 and beat the -3 substitution
        let s = ScoringScheme::new(1, -3, -1);
        let filled = fill(b"A", b"C", &s, AlignmentMode::Global).unwrap();
        let traced = traceback(b"A", b"C", &s, AlignmentMode::Global, &filled);
        assert_eq!(filled.score, -2);
        assert_eq!(traced.aligned1, "-A");
        assert_eq!(traced.aligned2, "C-");
        assert_eq!(traced.comparison, "  ");
    }

    #[test]
    fn test_gap_marker_byte_is_a_substitution() {
        let s = scheme();
        let filled = fill(b"A-C", b"A-C", &s, AlignmentMode::Global).unwrap();
        let traced = traceback(b"A-C", b"A-C", &s, AlignmentMode::Global, &filled);
        assert_eq!(filled.score, 3);
        assert_eq!(traced.comparison, "|||");
    }
}
