mod batch;
mod executor;
mod planner;
mod types;

pub use batch::execute_batch;
pub use executor::{ExecuteError, ExecuteOutcome, Executor, StagedRename};
pub use planner::{
    check_batch, check_feasible, destination_occupied, plan, plan_batch, FeasibilityError,
    PlanError,
};
pub use types::{
    is_case_only_change, BatchEntry, BatchResult, EntryOutcome, RenamePlan, RenameRequest,
    RenameStrategy, TEMP_SUFFIX,
};
