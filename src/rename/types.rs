use std::path::{Path, PathBuf};

/// Suffix appended to an entry's name while it passes through a case-only rename.
pub const TEMP_SUFFIX: &str = ".tmp-rename";

/// A request to give an existing entry a new name in the same directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub source_path: PathBuf,
    pub new_name: String,
}

impl RenameRequest {
    pub fn new(source_path: impl Into<PathBuf>, new_name: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            new_name: new_name.into(),
        }
    }
}

/// How a plan gets from the source name to the destination name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameStrategy {
    /// The entry already has the requested name
    Unchanged,
    /// A single rename
    Direct,
    /// Names differ only in letter case; go through `temp_path` first so that
    /// case-insensitive volumes do not swallow the change
    CaseOnly { temp_path: PathBuf },
}

/// A computed, not yet executed rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// Full path to the entry being renamed
    pub source_path: PathBuf,
    /// Current name of the entry
    pub source_name: String,
    /// Full path the entry will have afterwards
    pub destination_path: PathBuf,
    /// Requested name
    pub destination_name: String,
    pub strategy: RenameStrategy,
}

impl RenamePlan {
    pub fn is_case_only(&self) -> bool {
        matches!(self.strategy, RenameStrategy::CaseOnly { .. })
    }

    pub fn temp_path(&self) -> Option<&Path> {
        match &self.strategy {
            RenameStrategy::CaseOnly { temp_path } => Some(temp_path),
            _ => None,
        }
    }
}

/// True when the two names are equal ignoring case but not equal exactly.
pub fn is_case_only_change(old_name: &str, new_name: &str) -> bool {
    old_name != new_name && old_name.to_lowercase() == new_name.to_lowercase()
}

/// What happened to one entry of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Renamed successfully
    Executed,
    /// Already had the requested name; nothing was done
    SkippedExisting,
    /// The rename failed with the given reason
    Failed(String),
    /// Not reached because an earlier entry failed
    NotAttempted,
}

impl EntryOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            EntryOutcome::Executed => "renamed",
            EntryOutcome::SkippedExisting => "unchanged",
            EntryOutcome::Failed(_) => "failed",
            EntryOutcome::NotAttempted => "not attempted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub plan: RenamePlan,
    pub outcome: EntryOutcome,
}

/// Ordered per-entry outcomes of one batch run
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, plan: RenamePlan, outcome: EntryOutcome) {
        self.entries.push(BatchEntry { plan, outcome });
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn executed_count(&self) -> usize {
        self.count(|o| *o == EntryOutcome::Executed)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| *o == EntryOutcome::SkippedExisting)
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed(_)))
    }

    pub fn not_attempted_count(&self) -> usize {
        self.count(|o| *o == EntryOutcome::NotAttempted)
    }

    /// The first failed entry, if any.
    pub fn first_failure(&self) -> Option<&BatchEntry> {
        self.entries
            .iter()
            .find(|e| matches!(e.outcome, EntryOutcome::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_only_change() {
        assert!(is_case_only_change("Report", "report"));
        assert!(is_case_only_change("ÄRGER", "ärger"));
        assert!(!is_case_only_change("report", "report"));
        assert!(!is_case_only_change("report", "reports"));
    }

    #[test]
    fn test_batch_result_counts() {
        let plan = RenamePlan {
            source_path: PathBuf::from("/root/a"),
            source_name: "a".to_string(),
            destination_path: PathBuf::from("/root/b"),
            destination_name: "b".to_string(),
            strategy: RenameStrategy::Direct,
        };

        let mut result = BatchResult::new();
        assert!(result.first_failure().is_none());

        result.push(plan.clone(), EntryOutcome::Executed);
        result.push(plan.clone(), EntryOutcome::Failed("boom".to_string()));
        result.push(plan, EntryOutcome::NotAttempted);

        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.executed_count(), 1);
        assert_eq!(result.failed_count(), 1);
        assert_eq!(result.skipped_count(), 0);
        assert_eq!(result.not_attempted_count(), 1);
        assert_eq!(
            result.first_failure().map(|e| &e.outcome),
            Some(&EntryOutcome::Failed("boom".to_string()))
        );
    }
}
