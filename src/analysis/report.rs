//! Console and JSON rendering of an `Analysis`.

use serde::Serialize;
use std::io::{self, Write};

use super::collisions::{AggregateResult, Analysis, CollisionReport};

const RULE_WIDTH: usize = 40;

/// Shared-birthday details for matched squads, then the summary block.
pub fn write_text<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "--- Shared Birthday Details ---")?;
    for report in analysis.matched() {
        writeln!(out)?;
        writeln!(out, "Squad (Page {}) has matches:", report.source_group_id)?;
        for collision in &report.collisions {
            writeln!(out, "  - {}: {}", collision.birthday, collision.names.join(", "))?;
        }
    }
    write_summary(out, &analysis.aggregate)
}

pub fn write_summary<W: Write>(out: &mut W, agg: &AggregateResult) -> io::Result<()> {
    let heavy = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "DETAILED ANALYSIS")?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "Total squads analyzed: {}", agg.total_squads)?;
    writeln!(out, "Squads with shared birthdays: {}", agg.squads_with_matches)?;
    writeln!(out, "Observed Frequency: {:.2}%", agg.observed_probability)?;
    writeln!(out, "Theoretical Probability: {:.2}%", agg.theoretical_probability)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "Analysis: {}", agg.verdict)?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    matched_squads: Vec<&'a CollisionReport>,
    summary: &'a AggregateResult,
    verdict_text: &'static str,
}

/// Machine-readable form of the same report.
pub fn write_json<W: Write>(out: &mut W, analysis: &Analysis) -> anyhow::Result<()> {
    let report = JsonReport {
        matched_squads: analysis.matched().collect(),
        summary: &analysis.aggregate,
        verdict_text: analysis.aggregate.verdict.sentence(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
