mod codes;

pub use codes::ExitCode;

use crate::lister::ListerError;
use crate::mapping::MappingError;
use crate::rename::{ExecuteError, FeasibilityError, PlanError};
use crate::validator::NameError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Duplicate destination name: {name}")]
    DuplicateDestination { name: String },

    #[error("Invalid mapping: {message}")]
    InvalidMapping { message: String },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Batch cannot be executed ({} problems)", .problems.len())]
    BatchInfeasible { problems: Vec<String> },

    #[error("Rename failed: {from} -> {to}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Rename left entry at temporary name: {temp_path}")]
    RenameStranded {
        temp_path: PathBuf,
        destination_path: PathBuf,
        reason: String,
    },

    #[error("Batch stopped after {renamed} of {total} renames")]
    BatchIncomplete {
        renamed: usize,
        total: usize,
        failed_entry: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Usage(message) => message.clone(),

            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::SourceNotFound { path } => {
                format!("Nothing to rename, the source does not exist:\n  {}", path.display())
            }

            AppError::InvalidName { name, reason } => {
                format!(
                    "Invalid name '{}': {}\n\n\
                     A new name must be a single, non-empty path component.",
                    name, reason
                )
            }

            AppError::DuplicateDestination { name } => {
                format!(
                    "More than one entry would be renamed to '{}'.\n\
                     No changes were made.",
                    name
                )
            }

            AppError::InvalidMapping { message } => {
                format!(
                    "Failed to parse mapping: {}\n\n\
                     Expected a JSON object of current name -> new name, e.g.\n  \
                     {{\"old-name\": \"new-name\", \"other\": \"02-other\"}}",
                    message
                )
            }

            AppError::DestinationExists { path } => {
                format!(
                    "Destination already exists:\n  {}\n\n\
                     Use --overwrite to replace it.",
                    path.display()
                )
            }

            AppError::BatchInfeasible { problems } => {
                let mut msg = String::from("The batch cannot be executed:\n");
                for problem in problems {
                    msg.push_str(&format!("  - {}\n", problem));
                }
                msg.push_str("\nNo changes were made.");
                msg
            }

            AppError::RenameFailed { from, to, reason } => {
                format!(
                    "Failed to rename:\n\
                     From:  {}\n\
                     To:    {}\n\
                     Error: {}\n\n\
                     Check file permissions and ensure no files are open.",
                    from.display(),
                    to.display(),
                    reason
                )
            }

            AppError::RenameStranded {
                temp_path,
                destination_path,
                reason,
            } => {
                format!(
                    "Case-only rename did not complete:\n\
                     {}\n\n\
                     The entry is now at:\n  {}\n\
                     Rename it to the following by hand or run again:\n  {}",
                    reason,
                    temp_path.display(),
                    destination_path.display()
                )
            }

            AppError::BatchIncomplete {
                renamed,
                total,
                failed_entry,
                reason,
            } => {
                format!(
                    "Batch stopped at {}:\n  {}\n\n\
                     {} of {} entries were renamed before the failure; the rest were not attempted.",
                    failed_entry, reason, renamed, total
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ListerError> for AppError {
    fn from(err: ListerError) -> Self {
        match err {
            ListerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ListerError::NotADirectory(path) => AppError::NotADirectory { path },
            ListerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ListerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<NameError> for AppError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::InvalidName { name, reason } => AppError::InvalidName {
                name,
                reason: reason.description().to_string(),
            },
            NameError::DuplicateDestination { name } => AppError::DuplicateDestination { name },
        }
    }
}

impl From<MappingError> for AppError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::Decode(e) => AppError::InvalidMapping {
                message: e.to_string(),
            },
        }
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        AppError::Usage(err.to_string())
    }
}

impl From<FeasibilityError> for AppError {
    fn from(err: FeasibilityError) -> Self {
        match err {
            FeasibilityError::SourceNotFound(path) => AppError::SourceNotFound { path },
            FeasibilityError::DestinationExists(path) => AppError::DestinationExists { path },
            other => AppError::Other(other.to_string()),
        }
    }
}

impl From<Vec<FeasibilityError>> for AppError {
    fn from(problems: Vec<FeasibilityError>) -> Self {
        AppError::BatchInfeasible {
            problems: problems.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<ExecuteError> for AppError {
    fn from(err: ExecuteError) -> Self {
        let reason = err.to_string();
        match err {
            ExecuteError::StrandedAtTemporary {
                temp_path,
                destination_path,
                ..
            } => AppError::RenameStranded {
                temp_path,
                destination_path,
                reason,
            },
            ExecuteError::DestinationExists(path) => AppError::DestinationExists { path },
            ExecuteError::RenameFailed { from, to, .. } => AppError::RenameFailed { from, to, reason },
            ExecuteError::RemoveFailed { path, .. } | ExecuteError::TemporaryNameReserved(path) => {
                AppError::RenameFailed {
                    from: path.clone(),
                    to: path,
                    reason,
                }
            }
        }
    }
}
