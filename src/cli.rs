use clap::Parser;
use std::path::PathBuf;

use crate::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "batch-rename")]
#[command(author, version, long_about = None)]
#[command(about = "Rename files and directories in place, singly or in batches, without clobbering anything")]
pub struct Args {
    /// File or directory to rename (single mode)
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// New name for --path; a bare name, the entry stays in its directory
    #[arg(long, value_name = "NAME")]
    pub new_name: Option<String>,

    /// Parent directory for --list-children and --mapping
    #[arg(long, value_name = "DIR")]
    pub root_dir: Option<PathBuf>,

    /// Print the names of the directories directly inside --root-dir
    #[arg(long)]
    pub list_children: bool,

    /// JSON object of current name -> new name, applied in order under --root-dir
    #[arg(long, value_name = "JSON")]
    pub mapping: Option<String>,

    /// Show the plan without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Remove an existing destination before renaming onto it
    #[arg(long)]
    pub overwrite: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What a given invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List { root: PathBuf },
    Batch { root: PathBuf, mapping: String },
    Single { path: PathBuf, new_name: String },
}

impl Args {
    /// Resolve the mode from the flags given.
    ///
    /// Listing takes precedence over a mapping, which takes precedence over a
    /// single rename.
    pub fn mode(&self) -> Result<Mode, AppError> {
        if self.list_children {
            let root = self.root_dir.clone().ok_or_else(|| {
                AppError::Usage("--list-children requires --root-dir".to_string())
            })?;
            return Ok(Mode::List { root });
        }

        if let Some(mapping) = &self.mapping {
            let root = self
                .root_dir
                .clone()
                .ok_or_else(|| AppError::Usage("--mapping requires --root-dir".to_string()))?;
            return Ok(Mode::Batch {
                root,
                mapping: mapping.clone(),
            });
        }

        match (&self.path, &self.new_name) {
            (Some(path), Some(new_name)) => Ok(Mode::Single {
                path: path.clone(),
                new_name: new_name.clone(),
            }),
            _ => Err(AppError::Usage(
                "A single rename needs both --path and --new-name \
                 (or use --list-children / --mapping with --root-dir)"
                    .to_string(),
            )),
        }
    }
}
