use tracing::{error, info};

use crate::fs::Filesystem;

use super::executor::{ExecuteOutcome, Executor};
use super::types::{BatchResult, EntryOutcome, RenamePlan};

/// Execute already-checked plans in order.
///
/// Execution stops at the first failure: earlier entries stay renamed and the
/// remaining ones are recorded as not attempted. Nothing is rolled back.
pub fn execute_batch<F: Filesystem>(fs: &F, plans: Vec<RenamePlan>, overwrite: bool) -> BatchResult {
    let executor = Executor::new(fs, overwrite)
        .with_reserved_names(plans.iter().map(|p| p.destination_name.clone()));

    let total = plans.len();
    let mut result = BatchResult::new();
    let mut stopped = false;

    info!("Executing {} renames", total);

    for (i, plan) in plans.into_iter().enumerate() {
        if stopped {
            result.push(plan, EntryOutcome::NotAttempted);
            continue;
        }

        let outcome = match executor.execute(&plan) {
            Ok(ExecuteOutcome::Renamed) => EntryOutcome::Executed,
            Ok(ExecuteOutcome::Unchanged) => EntryOutcome::SkippedExisting,
            Err(e) => {
                error!("[{}/{}] {}", i + 1, total, e);
                stopped = true;
                EntryOutcome::Failed(e.to_string())
            }
        };

        result.push(plan, outcome);
    }

    info!(
        executed = result.executed_count(),
        not_attempted = result.not_attempted_count(),
        "Batch finished"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFilesystem;
    use crate::mapping::RenameMapping;
    use crate::rename::planner::{check_batch, plan_batch};
    use std::path::{Path, PathBuf};

    fn mapping(pairs: &[(&str, &str)]) -> RenameMapping {
        pairs.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
    }

    #[test]
    fn test_executes_in_order() {
        let fs = MemoryFilesystem::new()
            .with_dir("/root/X")
            .with_dir("/root/Y")
            .with_dir("/root/Z");
        let plans = plan_batch(
            Path::new("/root"),
            &mapping(&[("X", "1"), ("Y", "2"), ("Z", "3")]),
        )
        .unwrap();
        check_batch(&fs, &plans, false).unwrap();

        let result = execute_batch(&fs, plans, false);

        assert!(result.first_failure().is_none());
        assert_eq!(result.executed_count(), 3);
        assert_eq!(
            fs.paths(),
            vec![
                PathBuf::from("/root/1"),
                PathBuf::from("/root/2"),
                PathBuf::from("/root/3"),
            ]
        );
    }

    #[test]
    fn test_partial_failure_stops_batch() {
        let fs = MemoryFilesystem::new()
            .with_dir("/root/X")
            .with_dir("/root/Y")
            .with_dir("/root/Z");
        let plans = plan_batch(
            Path::new("/root"),
            &mapping(&[("X", "1"), ("Y", "2"), ("Z", "3")]),
        )
        .unwrap();
        check_batch(&fs, &plans, false).unwrap();
        fs.fail_rename_from("/root/Y");

        let result = execute_batch(&fs, plans, false);

        let outcomes: Vec<&EntryOutcome> = result.entries.iter().map(|e| &e.outcome).collect();
        assert_eq!(outcomes[0], &EntryOutcome::Executed);
        assert!(matches!(outcomes[1], EntryOutcome::Failed(reason) if reason.contains("injected failure")));
        assert_eq!(outcomes[2], &EntryOutcome::NotAttempted);

        assert_eq!(
            fs.paths(),
            vec![
                PathBuf::from("/root/1"),
                PathBuf::from("/root/Y"),
                PathBuf::from("/root/Z"),
            ]
        );
    }

    #[test]
    fn test_destination_freed_by_earlier_entry() {
        let fs = MemoryFilesystem::new().with_dir("/root/a").with_dir("/root/b");
        let plans = plan_batch(Path::new("/root"), &mapping(&[("b", "c"), ("a", "b")])).unwrap();
        check_batch(&fs, &plans, false).unwrap();

        let result = execute_batch(&fs, plans, false);

        assert_eq!(result.executed_count(), 2);
        assert_eq!(
            fs.paths(),
            vec![PathBuf::from("/root/b"), PathBuf::from("/root/c")]
        );
    }

    #[test]
    fn test_unchanged_entries_are_skipped() {
        let fs = MemoryFilesystem::new().with_dir("/root/keep").with_dir("/root/a");
        let plans = plan_batch(Path::new("/root"), &mapping(&[("keep", "keep"), ("a", "b")])).unwrap();

        let result = execute_batch(&fs, plans, false);

        assert_eq!(result.entries[0].outcome, EntryOutcome::SkippedExisting);
        assert_eq!(result.entries[1].outcome, EntryOutcome::Executed);
    }

    #[test]
    fn test_case_only_temporary_colliding_with_batch_name() {
        let fs = MemoryFilesystem::new().with_dir("/root/Report").with_dir("/root/other");
        let plans = plan_batch(
            Path::new("/root"),
            &mapping(&[("Report", "report"), ("other", "Report.tmp-rename")]),
        )
        .unwrap();
        assert!(check_batch(&fs, &plans, false).is_err());

        // Executed without the pre-flight, the executor still refuses.
        let result = execute_batch(&fs, plans, false);

        assert!(matches!(
            &result.entries[0].outcome,
            EntryOutcome::Failed(reason) if reason.contains("Temporary name")
        ));
        assert_eq!(result.entries[1].outcome, EntryOutcome::NotAttempted);
        assert!(fs.exists(Path::new("/root/Report")));
    }
}
