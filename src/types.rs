//! This module defines the core data structures used throughout the engine:
//! head movement directions, transition rules, machine configurations, and
//! the crate-wide error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tape::Tape;

/// The blank symbol used when a table or tape does not declare one.
pub const DEFAULT_BLANK_SYMBOL: &str = "_";
/// Lines starting with this prefix are comments in the rule-table format.
pub const COMMENT_PREFIX: &str = "#";

/// A direction the tape head can move in, represented as a signed unit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Keep the head in the same position.
    Stay,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Returns the direction opposite to this one. `Stay` is its own opposite.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Stay => Direction::Stay,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the offset this direction applies to a head position.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Stay => 0,
            Direction::Right => 1,
        }
    }

    /// Attempts to parse a direction token, case-insensitively.
    ///
    /// Accepts `L`, `R`, and `C` or `/` for `Stay`. Any other token yields
    /// `None`; callers are expected to report the offending token themselves.
    pub fn parse(input: &str) -> Option<Direction> {
        match input.to_ascii_uppercase().as_str() {
            "L" => Some(Direction::Left),
            "C" | "/" => Some(Direction::Stay),
            "R" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A (state, symbol) pair used as the trigger or result of a read/write rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSymbol {
    /// The state in the pair.
    pub state: String,
    /// The symbol in the pair.
    pub symbol: String,
}

impl StateSymbol {
    pub fn new(state: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            symbol: symbol.into(),
        }
    }
}

/// A single transition rule.
///
/// Rules come in two shapes. A `ReadWrite` rule rewrites the symbol under the
/// head without moving it; a `Move` rule relocates the head without touching
/// tape contents. Both shapes are matched exhaustively wherever rules are
/// applied or inverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Triggered by (state, symbol under the head); writes a new symbol at the
    /// head and changes state. The head does not move.
    ReadWrite {
        trigger: StateSymbol,
        result: StateSymbol,
    },
    /// Triggered by state alone; moves the head and changes state. The symbol
    /// under the head is unchanged.
    Move {
        trigger_state: String,
        direction: Direction,
        result_state: String,
    },
}

impl Transition {
    /// Shorthand constructor for a read/write rule.
    pub fn read_write(
        trigger_state: impl Into<String>,
        trigger_symbol: impl Into<String>,
        result_symbol: impl Into<String>,
        result_state: impl Into<String>,
    ) -> Self {
        Transition::ReadWrite {
            trigger: StateSymbol::new(trigger_state, trigger_symbol),
            result: StateSymbol::new(result_state, result_symbol),
        }
    }

    /// Shorthand constructor for a move rule.
    pub fn movement(
        trigger_state: impl Into<String>,
        direction: Direction,
        result_state: impl Into<String>,
    ) -> Self {
        Transition::Move {
            trigger_state: trigger_state.into(),
            direction,
            result_state: result_state.into(),
        }
    }

    /// Whether this rule fires for the given state and symbol under the head.
    ///
    /// A move rule ignores the symbol entirely.
    pub fn matches(&self, state: &str, symbol: &str) -> bool {
        match self {
            Transition::ReadWrite { trigger, .. } => {
                trigger.state == state && trigger.symbol == symbol
            }
            Transition::Move { trigger_state, .. } => trigger_state == state,
        }
    }

    /// The state this rule triggers in.
    pub fn trigger_state(&self) -> &str {
        match self {
            Transition::ReadWrite { trigger, .. } => &trigger.state,
            Transition::Move { trigger_state, .. } => trigger_state,
        }
    }
}

/// A machine's instantaneous description: tape, state label, and whether the
/// machine has halted.
///
/// Configurations are immutable values with structural equality; every
/// transition produces a new one. Behavior lives entirely in
/// [`MachineSpec`](crate::machine::MachineSpec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    tape: Tape,
    state: String,
    halted: bool,
}

impl Configuration {
    pub fn new(tape: Tape, state: impl Into<String>, halted: bool) -> Self {
        Self {
            tape,
            state: state.into(),
            halted,
        }
    }

    /// The tape of this configuration.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The state label of this configuration.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Whether this configuration is terminal.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

/// Represents the errors that can occur while parsing, validating, or
/// stepping a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A rule-table line matched neither rule shape. Carries the line verbatim.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
    /// A move rule carried an unrecognized direction token.
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
    /// A halted configuration was stepped forward. Halted configurations have
    /// no successor; callers must check `is_halted` first.
    #[error("Cannot step a halted configuration")]
    HaltedConfiguration,
    /// A specification or configuration failed vocabulary validation.
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// A file could not be read while loading a rule table.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Stay.opposite(), Direction::Stay);
    }

    #[test]
    fn test_direction_offset() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Stay.offset(), 0);
        assert_eq!(Direction::Right.offset(), 1);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("L"), Some(Direction::Left));
        assert_eq!(Direction::parse("r"), Some(Direction::Right));
        assert_eq!(Direction::parse("c"), Some(Direction::Stay));
        assert_eq!(Direction::parse("/"), Some(Direction::Stay));
        assert_eq!(Direction::parse("x"), None);
        assert_eq!(Direction::parse("LL"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_read_write_rule_matches() {
        let rule = Transition::read_write("a", "1", "0", "b");

        assert!(rule.matches("a", "1"));
        assert!(!rule.matches("a", "0"));
        assert!(!rule.matches("b", "1"));
        assert_eq!(rule.trigger_state(), "a");
    }

    #[test]
    fn test_move_rule_matches_any_symbol() {
        let rule = Transition::movement("b", Direction::Right, "a");

        assert!(rule.matches("b", "0"));
        assert!(rule.matches("b", "anything"));
        assert!(!rule.matches("a", "0"));
        assert_eq!(rule.trigger_state(), "b");
    }

    #[test]
    fn test_configuration_equality() {
        let tape = Tape::parse("1,0", DEFAULT_BLANK_SYMBOL, 0);

        let first = Configuration::new(tape.clone(), "a", false);
        let second = Configuration::new(tape.clone(), "a", false);
        let halted = Configuration::new(tape, "a", true);

        assert_eq!(first, second);
        assert_ne!(first, halted);
    }

    #[test]
    fn test_configuration_serialization_round_trip() {
        let config = Configuration::new(Tape::parse("1,1,0", "_", 1), "scan", false);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Configuration = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::InvalidRule("x ->> y".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid rule"));
        assert!(error_msg.contains("x ->> y"));
    }
}
