//! Align command - pairwise alignment of two loaded records

use anyhow::{Context, Result};
use mitoscan_core::{align, AlignmentMode, AlignmentResult, AlignmentSummary};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use super::{load_session, require_record};
use crate::config::Config;
use crate::error::CliError;

/// Per-invocation overrides of the configured alignment settings
#[derive(Debug, Clone, Default)]
pub struct AlignOptions {
    pub mode: Option<AlignmentMode>,
    pub match_score: Option<i32>,
    pub mismatch: Option<i32>,
    pub gap: Option<i32>,
    pub width: Option<usize>,
    pub json: bool,
}

#[derive(Serialize)]
struct AlignReport<'a> {
    id1: &'a str,
    id2: &'a str,
    alignment: &'a AlignmentResult,
    summary: AlignmentSummary,
}

/// Reject alignments whose score matrix exceeds `limit` cells
pub(crate) fn check_matrix_size(
    id1: &str,
    len1: usize,
    id2: &str,
    len2: usize,
    limit: u64,
) -> Result<(), CliError> {
    let cells = (len1 as u64 + 1).saturating_mul(len2 as u64 + 1);
    if cells > limit {
        return Err(CliError::MatrixTooLarge {
            id1: id1.to_string(),
            id2: id2.to_string(),
            cells,
            limit,
        });
    }
    Ok(())
}

pub fn execute(
    config: &Config,
    fasta: &Path,
    id1: &str,
    id2: &str,
    opts: AlignOptions,
) -> Result<()> {
    let mode = opts.mode.unwrap_or(config.align.mode);
    let scheme = config
        .scoring
        .scheme_with(opts.match_score, opts.mismatch, opts.gap);
    let width = opts.width.unwrap_or(config.align.block_width);

    log::info!("Starting {} alignment of {} vs {}", mode, id1, id2);
    log::info!(
        "Scoring: match={} mismatch={} gap={}",
        scheme.match_score,
        scheme.mismatch,
        scheme.gap
    );

    let session = load_session(fasta)?;
    let first = require_record(&session, id1)?;
    let second = require_record(&session, id2)?;
    check_matrix_size(id1, first.len(), id2, second.len(), config.align.max_cells)?;

    let result = align(&first.sequence, &second.sequence, &scheme, mode)
        .with_context(|| format!("Failed to align {} vs {}", id1, id2))?;
    let summary = result.summary()?;

    log::info!("Alignment complete: score {}, {} columns", result.score, result.len());

    if opts.json {
        let report = AlignReport {
            id1,
            id2,
            alignment: &result,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(id1, id2, &result, &summary, width)?);
    }

    Ok(())
}

/// Human-readable alignment report with blocks of `width` columns
pub(crate) fn render_text(
    id1: &str,
    id2: &str,
    result: &AlignmentResult,
    summary: &AlignmentSummary,
    width: usize,
) -> Result<String> {
    let mut out = String::new();
    let label = id1.len().max(id2.len());

    writeln!(out, "Mode:       {}", result.mode)?;
    writeln!(out, "Score:      {}", result.score)?;
    writeln!(
        out,
        "Ranges:     {} {}..{}  {} {}..{}",
        id1, result.seq1_range.start, result.seq1_range.end,
        id2, result.seq2_range.start, result.seq2_range.end
    )?;
    writeln!(
        out,
        "Columns:    {} ({} matches, {} mismatches, {} gaps)",
        summary.total, summary.matches, summary.mismatches, summary.gaps
    )?;
    writeln!(out, "Similarity: {:.2}%", summary.similarity)?;

    for block in result.blocks(width)? {
        writeln!(out)?;
        writeln!(out, "{:<label$}  {:>6}  {}", id1, block.start + 1, block.aligned1)?;
        writeln!(out, "{:<label$}  {:>6}  {}", "", "", block.comparison)?;
        writeln!(out, "{:<label$}  {:>6}  {}", id2, block.start + 1, block.aligned2)?;
    }

    Ok(out)
}
