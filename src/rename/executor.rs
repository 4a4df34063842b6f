use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fs::Filesystem;

use super::planner::destination_occupied;
use super::types::{RenamePlan, RenameStrategy};

/// Errors raised while carrying out a plan
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Failed to remove existing '{path}': {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Temporary name '{0}' is also a requested new name in this batch")]
    TemporaryNameReserved(PathBuf),

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The first half of a case-only rename went through but the second did
    /// not. The entry now lives at `temp_path`.
    #[error("Entry was moved to temporary '{temp_path}' but renaming it to '{destination_path}' failed: {source}")]
    StrandedAtTemporary {
        temp_path: PathBuf,
        destination_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Successful result of [`Executor::execute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    Renamed,
    Unchanged,
}

/// A case-only rename halfway through: the entry sits at its temporary name.
#[derive(Debug)]
pub struct StagedRename<'p> {
    temp_path: &'p Path,
    destination_path: &'p Path,
}

impl StagedRename<'_> {
    pub fn temp_path(&self) -> &Path {
        self.temp_path
    }

    /// Move the entry from its temporary name to the final one.
    pub fn finish<F: Filesystem>(self, fs: &F) -> Result<(), ExecuteError> {
        fs.rename(self.temp_path, self.destination_path)
            .map_err(|source| ExecuteError::StrandedAtTemporary {
                temp_path: self.temp_path.to_path_buf(),
                destination_path: self.destination_path.to_path_buf(),
                source,
            })
    }
}

/// Performs renames one plan at a time.
pub struct Executor<'a, F: Filesystem> {
    fs: &'a F,
    overwrite: bool,
    /// New names requested by the surrounding batch; a case-only rename may
    /// not borrow one of them as its temporary name.
    reserved_names: HashSet<String>,
}

impl<'a, F: Filesystem> Executor<'a, F> {
    pub fn new(fs: &'a F, overwrite: bool) -> Self {
        Self {
            fs,
            overwrite,
            reserved_names: HashSet::new(),
        }
    }

    pub fn with_reserved_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn execute(&self, plan: &RenamePlan) -> Result<ExecuteOutcome, ExecuteError> {
        let temp_path = match &plan.strategy {
            RenameStrategy::Unchanged => {
                debug!(path = ?plan.source_path, "Already has the requested name");
                return Ok(ExecuteOutcome::Unchanged);
            }
            RenameStrategy::Direct => None,
            RenameStrategy::CaseOnly { temp_path } => {
                self.ensure_not_reserved(temp_path)?;
                Some(temp_path.as_path())
            }
        };

        self.clear_destination(plan)?;

        match temp_path {
            Some(temp_path) => {
                info!(
                    "Case-only rename: {} -> {} (via {})",
                    plan.source_name,
                    plan.destination_name,
                    temp_path.display()
                );
                self.stage(plan, temp_path)?.finish(self.fs)?;
            }
            None => {
                self.fs
                    .rename(&plan.source_path, &plan.destination_path)
                    .map_err(|source| ExecuteError::RenameFailed {
                        from: plan.source_path.clone(),
                        to: plan.destination_path.clone(),
                        source,
                    })?;
            }
        }

        info!("Renamed: {} -> {}", plan.source_name, plan.destination_name);
        Ok(ExecuteOutcome::Renamed)
    }

    /// First half of a case-only rename: move the source to `temp_path`,
    /// clearing any leftover from an earlier interrupted run.
    pub fn stage<'p>(
        &self,
        plan: &'p RenamePlan,
        temp_path: &'p Path,
    ) -> Result<StagedRename<'p>, ExecuteError> {
        if self.fs.exists(temp_path) {
            warn!(path = ?temp_path, "Removing leftover temporary entry");
            self.fs
                .remove(temp_path)
                .map_err(|source| ExecuteError::RemoveFailed {
                    path: temp_path.to_path_buf(),
                    source,
                })?;
        }

        self.fs
            .rename(&plan.source_path, temp_path)
            .map_err(|source| ExecuteError::RenameFailed {
                from: plan.source_path.clone(),
                to: temp_path.to_path_buf(),
                source,
            })?;

        Ok(StagedRename {
            temp_path,
            destination_path: &plan.destination_path,
        })
    }

    fn ensure_not_reserved(&self, temp_path: &Path) -> Result<(), ExecuteError> {
        let reserved = temp_path
            .file_name()
            .map(|n| self.reserved_names.contains(&*n.to_string_lossy()))
            .unwrap_or(false);

        if reserved {
            return Err(ExecuteError::TemporaryNameReserved(temp_path.to_path_buf()));
        }
        Ok(())
    }

    fn clear_destination(&self, plan: &RenamePlan) -> Result<(), ExecuteError> {
        let occupied = destination_occupied(self.fs, plan).map_err(|source| {
            ExecuteError::RenameFailed {
                from: plan.source_path.clone(),
                to: plan.destination_path.clone(),
                source,
            }
        })?;

        if !occupied {
            return Ok(());
        }

        if !self.overwrite {
            return Err(ExecuteError::DestinationExists(
                plan.destination_path.clone(),
            ));
        }

        warn!(path = ?plan.destination_path, "Removing existing destination (--overwrite)");
        self.fs
            .remove(&plan.destination_path)
            .map_err(|source| ExecuteError::RemoveFailed {
                path: plan.destination_path.clone(),
                source,
            })
    }
}
