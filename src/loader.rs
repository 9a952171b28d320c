//! This module provides the `SpecLoader` struct, responsible for loading
//! machine specifications from rule-table files and strings.
//!
//! The table format carries no header, so the blank symbol is threaded
//! through every loading call and handed to the parser out of band.

use crate::machine::MachineSpec;
use crate::parser::parse;
use crate::types::MachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension recognized when scanning a directory for rule tables.
const TABLE_EXTENSION: &str = "tm";

/// `SpecLoader` is a utility struct for loading machine specifications.
/// It provides methods to load a specification from an individual file, from
/// string content, and to discover and load all `.tm` files within a
/// specified directory.
pub struct SpecLoader;

impl SpecLoader {
    /// Loads a single machine specification from the specified file path.
    ///
    /// # Errors
    ///
    /// * [`MachineError::FileError`] if the file cannot be read.
    /// * Any parse error from the rule-table parser.
    pub fn load_spec(path: &Path, blank: &str) -> Result<MachineSpec, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content, blank)
    }

    /// Loads a machine specification from the provided string content.
    ///
    /// This is useful for tables that are not stored in files, e.g. from user
    /// input.
    pub fn load_spec_from_string(content: &str, blank: &str) -> Result<MachineSpec, MachineError> {
        parse(content, blank)
    }

    /// Loads all rule-table files (`.tm` extension) from a given directory.
    ///
    /// It iterates through the directory, attempts to load each `.tm` file,
    /// and collects the results. Directories and other files are skipped.
    pub fn load_specs(
        directory: &Path,
        blank: &str,
    ) -> Vec<Result<(PathBuf, MachineSpec), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.tm files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != TABLE_EXTENSION) {
                    return None;
                }

                match Self::load_spec(&path, blank) {
                    Ok(spec) => Some(Ok((path, spec))),
                    Err(e) => Some(Err(MachineError::FileError(format!(
                        "Failed to load rule table from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
