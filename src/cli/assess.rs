//! Assess command - score every venue in an input file

use super::{read_inputs, CommandContext};
use crate::models::RiskLevel;
use crate::reporters;
use anyhow::{anyhow, Result};
use std::io::Write;
use std::path::Path;

fn parse_level(level: &str) -> Result<RiskLevel> {
    match level {
        "critical" => Ok(RiskLevel::Critical),
        "high" => Ok(RiskLevel::High),
        "medium" => Ok(RiskLevel::Medium),
        "low" => Ok(RiskLevel::Low),
        other => Err(anyhow!("Unknown risk level '{other}'")),
    }
}

pub fn run(ctx: &CommandContext, input: &Path, fail_on: Option<&str>) -> Result<()> {
    let fail_on = fail_on.map(parse_level).transpose()?;
    let inputs = read_inputs(input)?;
    let batch = ctx.runner.run(&inputs)?;

    let reports: Vec<_> = batch.succeeded().cloned().collect();
    print!("{}", reporters::render_reports(&reports, ctx.format)?);

    for entry in batch.failed() {
        if let Err(e) = &entry.result {
            eprintln!("error: venue #{} ({}): {}", entry.index, entry.venue_id, e);
        }
    }
    if batch.has_failures() {
        std::io::stdout().flush()?;
        std::process::exit(1);
    }

    if let Some(threshold) = fail_on {
        let failing = reports
            .iter()
            .filter(|r| r.assessment.risk_level >= threshold)
            .count();
        if failing > 0 {
            eprintln!(
                "{} venue(s) at or above --fail-on={} threshold",
                failing, threshold
            );
            std::io::stdout().flush()?;
            std::process::exit(1);
        }
    }
    Ok(())
}
