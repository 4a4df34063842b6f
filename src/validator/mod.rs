mod types;

pub use types::*;

use crate::mapping::RenameMapping;
use std::collections::HashSet;
use tracing::{debug, info, warn};

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Check that `name` is a single path component usable as a new name.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    let reason = if name.is_empty() {
        Some(InvalidReason::Empty)
    } else if name == "." || name == ".." {
        Some(InvalidReason::Reserved)
    } else if name.contains(SEPARATORS) {
        Some(InvalidReason::ContainsSeparator)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(NameError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate every entry of a batch mapping before anything touches the disk.
///
/// Both sides of each entry must be plain names, and no two entries may ask
/// for the same new name. Entries are checked in mapping order and the first
/// problem found is returned.
pub fn validate_batch(mapping: &RenameMapping) -> Result<(), NameError> {
    info!("Validating {} mapping entries", mapping.len());

    let mut seen: HashSet<&str> = HashSet::with_capacity(mapping.len());

    for entry in mapping.iter() {
        validate_name(&entry.current_name)?;
        validate_name(&entry.new_name)?;

        if !seen.insert(entry.new_name.as_str()) {
            warn!(name = %entry.new_name, "Duplicate destination in mapping");
            return Err(NameError::DuplicateDestination {
                name: entry.new_name.clone(),
            });
        }

        debug!(from = %entry.current_name, to = %entry.new_name, "Mapping entry valid");
    }

    Ok(())
}
