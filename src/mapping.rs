//! Decoding of the batch mapping passed on the command line.
//!
//! The mapping is a JSON object whose keys are names of existing entries
//! under the root directory and whose values are the names they should get.
//! Document order is kept because it is the order the batch runs in.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Failed to parse mapping: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One `current name -> new name` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub current_name: String,
    pub new_name: String,
}

/// Ordered batch mapping of current names to new names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMapping {
    entries: Vec<MappingEntry>,
}

impl RenameMapping {
    /// Decode a mapping from its JSON text.
    ///
    /// Anything other than an object of string values is rejected, as are
    /// repeated keys.
    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let mapping: RenameMapping = serde_json::from_str(json)?;
        debug!(entries = mapping.len(), "Decoded mapping");
        Ok(mapping)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for RenameMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(current_name, new_name)| MappingEntry {
                    current_name,
                    new_name,
                })
                .collect(),
        }
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = RenameMapping;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object mapping current names to new names")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut keys = HashSet::new();

        while let Some((current_name, new_name)) = map.next_entry::<String, String>()? {
            if !keys.insert(current_name.clone()) {
                return Err(de::Error::custom(format!(
                    "duplicate key '{}'",
                    current_name
                )));
            }
            entries.push(MappingEntry {
                current_name,
                new_name,
            });
        }

        Ok(RenameMapping { entries })
    }
}

impl<'de> Deserialize<'de> for RenameMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MappingVisitor)
    }
}
