use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fs::{parent_dir, Filesystem};
use crate::mapping::RenameMapping;

use super::types::{is_case_only_change, RenamePlan, RenameRequest, RenameStrategy, TEMP_SUFFIX};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Path has no name to rename: {0}")]
    NoFileName(PathBuf),
}

/// Reasons a plan cannot be carried out, found before anything is renamed
#[derive(Error, Debug)]
pub enum FeasibilityError {
    #[error("Source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Destination is renamed by a later entry of this batch: {0}")]
    DestinationIsSource(PathBuf),

    #[error("Temporary name '{0}' is also a requested new name in this batch")]
    TemporaryNameReserved(PathBuf),

    #[error("Failed to inspect '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenameRequest {
    pub fn plan(&self) -> Result<RenamePlan, PlanError> {
        plan(&self.source_path, &self.new_name)
    }
}

/// Compute where `source_path` ends up when renamed to `new_name`.
///
/// The destination is always a sibling of the source. No filesystem access.
pub fn plan(source_path: &Path, new_name: &str) -> Result<RenamePlan, PlanError> {
    let source_name = source_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| PlanError::NoFileName(source_path.to_path_buf()))?;

    let parent = parent_dir(source_path);
    let destination_path = parent.join(new_name);

    let strategy = if source_name == new_name {
        RenameStrategy::Unchanged
    } else if is_case_only_change(&source_name, new_name) {
        RenameStrategy::CaseOnly {
            temp_path: parent.join(format!("{}{}", source_name, TEMP_SUFFIX)),
        }
    } else {
        RenameStrategy::Direct
    };

    debug!(
        source = ?source_path,
        destination = ?destination_path,
        strategy = ?strategy,
        "Planned rename"
    );

    Ok(RenamePlan {
        source_path: source_path.to_path_buf(),
        source_name,
        destination_path,
        destination_name: new_name.to_string(),
        strategy,
    })
}

/// Plan every entry of a mapping relative to `root`, in mapping order.
pub fn plan_batch(root: &Path, mapping: &RenameMapping) -> Result<Vec<RenamePlan>, PlanError> {
    mapping
        .iter()
        .map(|entry| RenameRequest::new(root.join(&entry.current_name), &entry.new_name).plan())
        .collect()
}

/// Whether something other than the source itself sits at the destination.
///
/// For a case-only plan only an entry with exactly the destination's name
/// counts; a case-insensitive volume resolving the new name to the source
/// is not an occupant.
pub fn destination_occupied<F: Filesystem>(fs: &F, plan: &RenamePlan) -> io::Result<bool> {
    match plan.strategy {
        RenameStrategy::Unchanged => Ok(false),
        RenameStrategy::CaseOnly { .. } => fs.has_exact_entry(&plan.destination_path),
        RenameStrategy::Direct => Ok(fs.exists(&plan.destination_path)),
    }
}

/// Pre-flight check for a single plan.
///
/// With `overwrite` an occupied destination is fine: the executor removes it
/// first.
pub fn check_feasible<F: Filesystem>(
    fs: &F,
    plan: &RenamePlan,
    overwrite: bool,
) -> Result<(), FeasibilityError> {
    if !fs.exists(&plan.source_path) {
        return Err(FeasibilityError::SourceNotFound(plan.source_path.clone()));
    }

    let occupied = destination_occupied(fs, plan).map_err(|source| FeasibilityError::Io {
        path: plan.destination_path.clone(),
        source,
    })?;

    if occupied {
        if !overwrite {
            return Err(FeasibilityError::DestinationExists(
                plan.destination_path.clone(),
            ));
        }
        info!(path = ?plan.destination_path, "Destination exists and will be overwritten");
    }

    Ok(())
}

/// Pre-flight check for a whole batch.
///
/// Every plan is checked and every problem collected, so the operator sees
/// all of them at once. A destination that a later entry still has to rename
/// away from is refused even with `overwrite`, since removing it would
/// destroy that entry. A destination an earlier entry renames away from is
/// free by the time its plan runs. A case-only plan whose temporary name is
/// another entry's new name is refused up front.
pub fn check_batch<F: Filesystem>(
    fs: &F,
    plans: &[RenamePlan],
    overwrite: bool,
) -> Result<(), Vec<FeasibilityError>> {
    let sources: HashMap<&Path, usize> = plans
        .iter()
        .enumerate()
        .map(|(i, p)| (p.source_path.as_path(), i))
        .collect();
    let new_names: HashSet<&str> = plans.iter().map(|p| p.destination_name.as_str()).collect();

    let mut problems = Vec::new();

    for (i, plan) in plans.iter().enumerate() {
        if let Some(temp_path) = plan.temp_path() {
            let reserved = temp_path
                .file_name()
                .is_some_and(|n| new_names.contains(&*n.to_string_lossy()));
            if reserved {
                problems.push(FeasibilityError::TemporaryNameReserved(
                    temp_path.to_path_buf(),
                ));
                continue;
            }
        }

        match sources.get(plan.destination_path.as_path()) {
            // An earlier case-only rename keeps the name under another case.
            Some(&j) if j > i || (j < i && plans[j].strategy != RenameStrategy::Direct) => {
                if fs.exists(&plan.source_path) {
                    problems.push(FeasibilityError::DestinationIsSource(
                        plan.destination_path.clone(),
                    ));
                    continue;
                }
            }
            Some(&j) if j < i => {
                debug!(path = ?plan.destination_path, "Destination vacated by an earlier entry");
                if !fs.exists(&plan.source_path) {
                    problems.push(FeasibilityError::SourceNotFound(plan.source_path.clone()));
                }
                continue;
            }
            _ => {}
        }

        if let Err(e) = check_feasible(fs, plan, overwrite) {
            debug!(error = %e, "Plan infeasible");
            problems.push(e);
        }
    }

    if problems.is_empty() {
        info!(count = plans.len(), "All plans feasible");
        Ok(())
    } else {
        warn!(count = problems.len(), "Batch infeasible");
        Err(problems)
    }
}
