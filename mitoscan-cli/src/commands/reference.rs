//! Reference command - compare every record against one reference

use anyhow::{Context, Result};
use mitoscan_core::{AlignmentMode, ReferenceComparison};
use std::fmt::Write as _;
use std::path::Path;

use super::{load_session, require_record};
use crate::commands::align::check_matrix_size;
use crate::config::Config;

pub fn execute(
    config: &Config,
    fasta: &Path,
    reference_id: &str,
    mode: Option<AlignmentMode>,
    json: bool,
) -> Result<()> {
    let mode = mode.unwrap_or(config.align.mode);
    let scheme = config.scoring.scheme_with(None, None, None);

    log::info!("Comparing all records against {} ({} mode)", reference_id, mode);

    let session = load_session(fasta)?;
    let reference = require_record(&session, reference_id)?;
    for record in session.records().filter(|r| r.id != reference.id) {
        check_matrix_size(
            &reference.id,
            reference.len(),
            &record.id,
            record.len(),
            config.align.max_cells,
        )?;
    }

    let comparisons = session
        .compare_to_reference(reference_id, &scheme, mode)
        .with_context(|| format!("Failed to compare records against {}", reference_id))?;

    log::info!("Compared {} records", comparisons.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&comparisons)?);
    } else {
        print!("{}", render_text(&comparisons)?);
    }

    Ok(())
}

pub(crate) fn render_text(comparisons: &[ReferenceComparison]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "id\tscore\tsimilarity")?;
    for c in comparisons {
        writeln!(out, "{}\t{}\t{:.2}", c.id, c.score, c.similarity)?;
    }
    Ok(out)
}
