//! A small library of embedded, ready-to-run machines and the
//! `MachineManager` used to look them up by name or index.

use crate::machine::MachineSpec;
use crate::types::{MachineError, DEFAULT_BLANK_SYMBOL};

use std::sync::RwLock;

// Default embedded rule tables. The table format has no name header, so the
// display name lives here next to the text.
const MACHINE_TABLES: [(&str, &str); 4] = [
    ("Bit flipper", include_str!("../machines/bit-flipper.tm")),
    ("Zero sweep", include_str!("../machines/zero-sweep.tm")),
    ("Parity writer", include_str!("../machines/parity-writer.tm")),
    ("Left marker", include_str!("../machines/left-marker.tm")),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<(String, MachineSpec)>> = RwLock::new(Vec::new());
}

pub struct MachineManager;

impl MachineManager {
    /// Initialize the MachineManager with the embedded rule tables
    pub fn load() -> Result<(), MachineError> {
        let mut machines = Vec::new();

        for (name, table) in MACHINE_TABLES {
            match crate::parser::parse(table, DEFAULT_BLANK_SYMBOL) {
                Ok(spec) => machines.push((name.to_string(), spec)),
                Err(e) => eprintln!("Failed to parse machine {}: {}", name, e),
            }
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        } else {
            return Err(MachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available machines
    pub fn count() -> usize {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<(String, MachineSpec), MachineError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                MachineError::ValidationError(format!("Machine index {} out of range", index))
            })
    }

    /// Get a machine by its name
    pub fn get_by_name(name: &str) -> Result<MachineSpec, MachineError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|(machine_name, _)| machine_name == name)
            .map(|(_, spec)| spec.clone())
            .ok_or_else(|| {
                MachineError::ValidationError(format!("Machine '{}' not found", name))
            })
    }

    /// List all machine names
    pub fn list_names() -> Vec<String> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a machine by its index
    pub fn get_info(index: usize) -> Result<MachineInfo, MachineError> {
        let (name, spec) = Self::get_by_index(index)?;

        Ok(MachineInfo {
            index,
            name,
            initial_state: spec
                .default_initial_state()
                .unwrap_or_default()
                .to_string(),
            state_count: spec.states().len(),
            symbol_count: spec.symbols().len(),
            rule_count: spec.rules().len(),
        })
    }

    /// Search for machines by name
    pub fn search(query: &str) -> Vec<usize> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .enumerate()
                    .filter(|(_, (name, _))| {
                        name.to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original text of a machine's rule table by its index
    pub fn text_by_index(index: usize) -> Result<&'static str, MachineError> {
        MACHINE_TABLES
            .get(index)
            .map(|(_, table)| *table)
            .ok_or_else(|| {
                MachineError::ValidationError(format!("Machine index {} out of range", index))
            })
    }
}

/// A summary of one embedded machine.
#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    /// The trigger state of the table's first rule, the conventional state to
    /// start the machine in.
    pub initial_state: String,
    pub state_count: usize,
    pub symbol_count: usize,
    pub rule_count: usize,
}
