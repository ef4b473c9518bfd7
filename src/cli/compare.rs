//! Compare command - rank venues against each other

use super::{read_inputs, CommandContext};
use crate::batch::compare;
use crate::reporters;
use anyhow::{bail, Result};
use std::io::Write;
use std::path::Path;

pub fn run(ctx: &CommandContext, input: &Path) -> Result<()> {
    let inputs = read_inputs(input)?;
    let batch = ctx.runner.run(&inputs)?;

    for entry in batch.failed() {
        if let Err(e) = &entry.result {
            eprintln!("error: venue #{} ({}): {}", entry.index, entry.venue_id, e);
        }
    }

    let Some(comparison) = compare(&batch.assessments()) else {
        bail!("No venue could be assessed");
    };
    print!("{}", reporters::render_comparison(&comparison, ctx.format)?);

    if batch.has_failures() {
        std::io::stdout().flush()?;
        std::process::exit(1);
    }
    Ok(())
}
