use batch_rename::cli::{Args, Mode};
use batch_rename::lister::{self, list_child_directories};
use batch_rename::output::{
    display_batch_result, display_dry_run, display_listing, display_plan, display_single_result,
};
use batch_rename::ui::{Ui, UiConfig};
use batch_rename::{
    check_batch, check_feasible, destination_occupied, execute_batch, logging, plan_batch,
    validate_batch, validate_name, AppError, EntryOutcome, Executor, RenameMapping, RenamePlan,
    RenameRequest, StdFilesystem,
};
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    let mut ui = Ui::new(UiConfig::new(args.verbose > 0));

    debug!(?args, "Arguments parsed");

    if let Err(e) = run(&args, &mut ui) {
        error!("{}", e);
        ui.error(&e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: &Args, ui: &mut Ui) -> Result<(), AppError> {
    match args.mode()? {
        Mode::List { root } => run_list(&root),
        Mode::Batch { root, mapping } => run_batch(&root, &mapping, args, ui),
        Mode::Single { path, new_name } => run_single(&path, &new_name, args, ui),
    }
}

fn output_error(e: io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", e))
}

/// Warn about every destination that `--overwrite` is about to remove.
fn warn_replacements(plans: &[RenamePlan], ui: &mut Ui) {
    for plan in plans {
        if destination_occupied(&StdFilesystem, plan).unwrap_or(false) {
            ui.replacing(&plan.destination_path);
        }
    }
}

fn run_list(root: &Path) -> Result<(), AppError> {
    info!("Listing directories in {:?}", root);

    let names = list_child_directories(root)?;
    display_listing(&names, &mut io::stdout()).map_err(output_error)
}

fn run_single(path: &Path, new_name: &str, args: &Args, ui: &mut Ui) -> Result<(), AppError> {
    let fs = StdFilesystem;
    let mut stdout = io::stdout();

    // Step 1: Validate the name before looking at the disk
    validate_name(new_name)?;

    // Step 2: Plan and check
    let plan = RenameRequest::new(path, new_name).plan()?;
    check_feasible(&fs, &plan, args.overwrite)?;
    display_plan(std::slice::from_ref(&plan), &mut stdout).map_err(output_error)?;

    if args.dry_run {
        return display_dry_run(1, &mut stdout).map_err(output_error);
    }

    // Step 3: Execute
    if args.overwrite {
        warn_replacements(std::slice::from_ref(&plan), ui);
    }

    let outcome = Executor::new(&fs, args.overwrite).execute(&plan)?;
    display_single_result(&plan, outcome, &mut stdout).map_err(output_error)
}

fn run_batch(root: &Path, json: &str, args: &Args, ui: &mut Ui) -> Result<(), AppError> {
    let fs = StdFilesystem;
    let mut stdout = io::stdout();

    // Step 1: Decode and validate the mapping; no filesystem access yet
    let mapping = RenameMapping::from_json(json)?;
    validate_batch(&mapping)?;

    // Step 2: Plan against the root directory and show the whole plan
    lister::require_directory(root)?;
    let plans = plan_batch(root, &mapping)?;
    display_plan(&plans, &mut stdout).map_err(output_error)?;
    stdout.flush().map_err(output_error)?;

    // Step 3: Pre-flight every entry; any problem aborts before mutation
    check_batch(&fs, &plans, args.overwrite)?;

    if args.dry_run {
        return display_dry_run(plans.len(), &mut stdout).map_err(output_error);
    }

    // Step 4: Execute in order, stopping at the first failure
    if args.overwrite {
        warn_replacements(&plans, ui);
    }

    let total = plans.len();
    let result = execute_batch(&fs, plans, args.overwrite);
    display_batch_result(&result, &mut stdout).map_err(output_error)?;

    if let Some(failed) = result.first_failure() {
        let reason = match &failed.outcome {
            EntryOutcome::Failed(reason) => reason.clone(),
            _ => String::new(),
        };
        return Err(AppError::BatchIncomplete {
            renamed: result.executed_count(),
            total,
            failed_entry: format!(
                "{} -> {}",
                failed.plan.source_name, failed.plan.destination_name
            ),
            reason,
        });
    }

    ui.batch_done(result.executed_count(), total);
    Ok(())
}
