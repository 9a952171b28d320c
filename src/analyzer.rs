//! This module provides vocabulary validation for machine specifications and
//! the configurations users run against them. The matching logic in
//! [`crate::machine`] never consults the vocabularies; these checks exist to
//! catch mistakes before a simulation starts, such as a user-chosen initial
//! state that no rule table declares.

use crate::machine::MachineSpec;
use crate::types::{Configuration, MachineError, Transition};

/// Represents the findings a vocabulary analysis can surface.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The configuration's state is not in the declared state vocabulary.
    UndeclaredState(String),
    /// The configuration's tape holds symbols outside the declared symbol
    /// vocabulary.
    UndeclaredTapeSymbols(Vec<String>),
    /// Rules trigger in or result in states outside the declared vocabulary.
    UndeclaredRuleStates(Vec<String>),
    /// Read/write rules mention symbols outside the declared vocabulary.
    UndeclaredRuleSymbols(Vec<String>),
}

impl From<AnalysisError> for MachineError {
    /// Converts an `AnalysisError` into a `MachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UndeclaredState(state) => {
                MachineError::ValidationError(format!("Undeclared state: {}", state))
            }
            AnalysisError::UndeclaredTapeSymbols(symbols) => MachineError::ValidationError(
                format!("Tape contains undeclared symbols: {:?}", symbols),
            ),
            AnalysisError::UndeclaredRuleStates(states) => MachineError::ValidationError(format!(
                "Rules reference undeclared states: {:?}",
                states
            )),
            AnalysisError::UndeclaredRuleSymbols(symbols) => MachineError::ValidationError(
                format!("Rules reference undeclared symbols: {:?}", symbols),
            ),
        }
    }
}

/// Analyzes a specification for internal vocabulary consistency: every state
/// and symbol a rule mentions must be declared.
///
/// Specifications built by the parser satisfy this by construction; the check
/// matters for programmatically assembled ones.
pub fn analyze(spec: &MachineSpec) -> Result<(), MachineError> {
    if let Some(error) = [check_rule_states, check_rule_symbols]
        .iter()
        .filter_map(|check| check(spec).err())
        .next()
    {
        return Err(error.into());
    }

    Ok(())
}

/// Analyzes a caller-supplied configuration against a specification: its
/// state and every stored tape symbol must be declared.
pub fn analyze_configuration(
    spec: &MachineSpec,
    config: &Configuration,
) -> Result<(), MachineError> {
    if let Some(error) = [check_configuration_state, check_tape_symbols]
        .iter()
        .filter_map(|check| check(spec, config).err())
        .next()
    {
        return Err(error.into());
    }

    Ok(())
}

/// Checks that rules only trigger in and result in declared states.
fn check_rule_states(spec: &MachineSpec) -> Result<(), AnalysisError> {
    let mut undeclared = Vec::new();

    for rule in spec.rules() {
        let (trigger, result) = match rule {
            Transition::ReadWrite { trigger, result } => (&trigger.state, &result.state),
            Transition::Move {
                trigger_state,
                result_state,
                ..
            } => (trigger_state, result_state),
        };

        for state in [trigger, result] {
            if !spec.states().contains(state) {
                undeclared.push(state.clone());
            }
        }
    }

    finding(undeclared, AnalysisError::UndeclaredRuleStates)
}

/// Checks that read/write rules only mention declared symbols.
fn check_rule_symbols(spec: &MachineSpec) -> Result<(), AnalysisError> {
    let mut undeclared = Vec::new();

    for rule in spec.rules() {
        if let Transition::ReadWrite { trigger, result } = rule {
            for symbol in [&trigger.symbol, &result.symbol] {
                if !spec.symbols().contains(symbol) {
                    undeclared.push(symbol.clone());
                }
            }
        }
    }

    finding(undeclared, AnalysisError::UndeclaredRuleSymbols)
}

/// Checks that the configuration's state is declared.
fn check_configuration_state(
    spec: &MachineSpec,
    config: &Configuration,
) -> Result<(), AnalysisError> {
    if !spec.states().contains(config.state()) {
        return Err(AnalysisError::UndeclaredState(config.state().to_string()));
    }

    Ok(())
}

/// Checks that every stored tape symbol is declared. The blank symbol never
/// occupies a stored cell, so only written symbols are examined.
fn check_tape_symbols(spec: &MachineSpec, config: &Configuration) -> Result<(), AnalysisError> {
    let undeclared = config
        .tape()
        .cells()
        .values()
        .filter(|symbol| !spec.symbols().contains(*symbol))
        .cloned()
        .collect();

    finding(undeclared, AnalysisError::UndeclaredTapeSymbols)
}

/// Sorts and deduplicates a list of findings so diagnostics are
/// deterministic, then wraps any remainder in the given error constructor.
fn finding(
    mut items: Vec<String>,
    error: fn(Vec<String>) -> AnalysisError,
) -> Result<(), AnalysisError> {
    if items.is_empty() {
        return Ok(());
    }

    items.sort();
    items.dedup();
    Err(error(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Tape;
    use crate::types::Direction;
    use std::collections::HashSet;

    fn parsed_spec() -> MachineSpec {
        MachineSpec::parse("a, 1 -> 0, b\nb -> R, a", "_").unwrap()
    }

    #[test]
    fn test_analyze_accepts_parsed_spec() {
        assert!(analyze(&parsed_spec()).is_ok());
    }

    #[test]
    fn test_analyze_reports_undeclared_rule_states() {
        let spec = MachineSpec::new(
            HashSet::new(),
            HashSet::new(),
            vec![Transition::movement("a", Direction::Right, "b")],
        );

        let error = analyze(&spec).unwrap_err();

        assert_eq!(
            error,
            MachineError::ValidationError(
                "Rules reference undeclared states: [\"a\", \"b\"]".to_string()
            )
        );
    }

    #[test]
    fn test_analyze_reports_undeclared_rule_symbols() {
        let spec = MachineSpec::new(
            HashSet::from(["a".to_string(), "b".to_string()]),
            HashSet::new(),
            vec![Transition::read_write("a", "1", "0", "b")],
        );

        let error = analyze(&spec).unwrap_err();

        assert_eq!(
            error,
            MachineError::ValidationError(
                "Rules reference undeclared symbols: [\"0\", \"1\"]".to_string()
            )
        );
    }

    #[test]
    fn test_analyze_configuration_accepts_declared_state() {
        let spec = parsed_spec();
        let config = Configuration::new(Tape::parse("1,0", "_", 0), "a", false);

        assert!(analyze_configuration(&spec, &config).is_ok());
    }

    #[test]
    fn test_analyze_configuration_rejects_undeclared_state() {
        let spec = parsed_spec();
        let config = Configuration::new(Tape::empty("_", 0), "nowhere", false);

        let error = analyze_configuration(&spec, &config).unwrap_err();

        assert_eq!(
            error,
            MachineError::ValidationError("Undeclared state: nowhere".to_string())
        );
    }

    #[test]
    fn test_analyze_configuration_rejects_undeclared_tape_symbols() {
        let spec = parsed_spec();
        let config = Configuration::new(Tape::parse("1,x,y,x", "_", 0), "a", false);

        let error = analyze_configuration(&spec, &config).unwrap_err();

        assert_eq!(
            error,
            MachineError::ValidationError(
                "Tape contains undeclared symbols: [\"x\", \"y\"]".to_string()
            )
        );
    }

    #[test]
    fn test_analysis_error_conversion() {
        let error: MachineError = AnalysisError::UndeclaredState("q".to_string()).into();

        assert!(matches!(error, MachineError::ValidationError(_)));
        assert!(error.to_string().contains("q"));
    }
}
