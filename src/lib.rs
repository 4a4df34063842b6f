pub mod cli;
pub mod error;
pub mod fs;
pub mod lister;
pub mod logging;
pub mod mapping;
pub mod output;
pub mod rename;
pub mod ui;
pub mod validator;

pub use error::{AppError, ExitCode};
pub use fs::{Filesystem, StdFilesystem};
pub use lister::{list_child_directories, ListerError};
pub use mapping::{MappingEntry, MappingError, RenameMapping};
pub use rename::{
    check_batch, check_feasible, destination_occupied, execute_batch, plan, plan_batch,
    BatchResult, EntryOutcome, ExecuteError, ExecuteOutcome, Executor, FeasibilityError,
    RenamePlan, RenameRequest, RenameStrategy,
};
pub use validator::{validate_batch, validate_name, InvalidReason, NameError};
