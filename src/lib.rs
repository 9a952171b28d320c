//! This crate provides the core engine for a single-tape Turing machine that
//! can be stepped in both directions: `step` produces the unique successor of
//! a configuration, and `invert` enumerates every configuration that could
//! have produced it one step earlier, purely from the rule table, without search.
//! It includes modules for parsing rule tables, validating configurations
//! against a table's vocabularies, and managing a collection of embedded
//! example machines.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod machines;
pub mod parser;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the analysis functions and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, analyze_configuration, AnalysisError};
/// Re-exports the `SpecLoader` struct from the loader module.
pub use loader::SpecLoader;
/// Re-exports the `MachineSpec` struct from the machine module.
pub use machine::MachineSpec;
/// Re-exports `MachineInfo`, `MachineManager`, and `MACHINES` from the machines module.
pub use machines::{MachineInfo, MachineManager, MACHINES};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core configuration and rule types from the types module.
pub use types::{
    Configuration, Direction, MachineError, StateSymbol, Transition, DEFAULT_BLANK_SYMBOL,
};
