use crate::rename::{BatchResult, EntryOutcome, ExecuteOutcome, RenamePlan, RenameStrategy};
use std::io::{self, Write};

fn strategy_note(plan: &RenamePlan) -> String {
    match &plan.strategy {
        RenameStrategy::Direct => String::new(),
        RenameStrategy::Unchanged => " (already named)".to_string(),
        RenameStrategy::CaseOnly { temp_path } => {
            let temp_name = temp_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            format!(" (case-only, via {})", temp_name)
        }
    }
}

/// Print every planned source -> destination pair, in execution order.
pub fn display_plan(plans: &[RenamePlan], writer: &mut impl Write) -> io::Result<()> {
    if plans.is_empty() {
        writeln!(writer, "No entries to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes ({}):", plans.len())?;

    for (i, plan) in plans.iter().enumerate() {
        writeln!(
            writer,
            "  {}. {} -> {}{}",
            i + 1,
            plan.source_path.display(),
            plan.destination_path.display(),
            strategy_note(plan)
        )?;
    }

    Ok(())
}

/// Closing note for a dry run
pub fn display_dry_run(count: usize, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Dry run: {} {} checked, nothing was renamed.",
        count,
        if count == 1 { "entry" } else { "entries" }
    )?;
    writeln!(writer, "Run without --dry-run to apply these changes.")?;
    Ok(())
}

/// Result of a single rename
pub fn display_single_result(
    plan: &RenamePlan,
    outcome: ExecuteOutcome,
    writer: &mut impl Write,
) -> io::Result<()> {
    match outcome {
        ExecuteOutcome::Renamed => writeln!(
            writer,
            "renamed: {} -> {}",
            plan.source_path.display(),
            plan.destination_path.display()
        ),
        ExecuteOutcome::Unchanged => writeln!(
            writer,
            "unchanged: {} already has that name",
            plan.source_path.display()
        ),
    }
}

/// Per-entry outcome of a batch, followed by a summary line
pub fn display_batch_result(result: &BatchResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Results:")?;

    for entry in &result.entries {
        let line = format!(
            "{} -> {}",
            entry.plan.source_name, entry.plan.destination_name
        );
        match &entry.outcome {
            EntryOutcome::Failed(reason) => writeln!(
                writer,
                "  {:<14}{}: {}",
                entry.outcome.label(),
                line,
                reason
            )?,
            outcome => writeln!(writer, "  {:<14}{}", outcome.label(), line)?,
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Summary: {} renamed, {} unchanged, {} failed, {} not attempted",
        result.executed_count(),
        result.skipped_count(),
        result.failed_count(),
        result.not_attempted_count()
    )?;

    Ok(())
}

/// One name per line, nothing else, so the output can be piped
pub fn display_listing(names: &[String], writer: &mut impl Write) -> io::Result<()> {
    for name in names {
        writeln!(writer, "{}", name)?;
    }
    Ok(())
}
