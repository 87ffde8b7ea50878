//! Persistence adapter: a single TOML file holding all collections.
//!
//! Loading is defensive. The file is parsed into a generic TOML value first
//! and each collection is extracted independently; a key that is missing,
//! not array-shaped or otherwise undecodable is replaced by an empty
//! collection with a warning, never an error. The worst outcome of corrupt
//! data is starting with an empty store.

use crate::study::{Goal, Preparation, StudyData, Subject};
use anyhow::Result;
use chrono::NaiveDate;
use log::warn;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Load the store from disk.
    ///
    /// A missing file yields an empty store. Corrupt data degrades
    /// per collection as described in the module docs; only an unreadable
    /// file (I/O error) is reported as an error.
    pub fn load(&self) -> Result<StudyData> {
        if !self.file_path.exists() {
            return Ok(StudyData::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("study data file is not valid TOML, starting empty: {e}");
                return Ok(StudyData::new());
            }
        };

        let mut data = StudyData::new();
        data.subjects = load_collection::<Subject>(&value, "subject");
        data.goals = load_collection::<Goal>(&value, "goal");
        data.preparations = load_collection::<Preparation>(&value, "preparation");
        data.completion_days = load_collection::<NaiveDate>(&value, "completion_days")
            .into_iter()
            .collect::<BTreeSet<_>>();
        data.id_counter = value
            .get("id_counter")
            .and_then(toml::Value::as_integer)
            .map(|n| n.max(0) as u64)
            .unwrap_or(0);
        data.normalize();
        Ok(data)
    }

    pub fn save(&self, data: &StudyData) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}

/// Decode one top-level collection, substituting an empty one when the key
/// is absent, not a list, or fails to decode.
fn load_collection<T: DeserializeOwned>(value: &toml::Value, key: &str) -> Vec<T> {
    let Some(entry) = value.get(key) else {
        return Vec::new();
    };
    if !entry.is_array() {
        warn!("'{key}' in the study data file is not a list, ignoring it");
        return Vec::new();
    }
    match entry.clone().try_into() {
        Ok(items) => items,
        Err(e) => {
            warn!("could not read '{key}' from the study data file, ignoring it: {e}");
            Vec::new()
        }
    }
}
