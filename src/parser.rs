//! This module provides the parser for the line-oriented rule-table format,
//! utilizing the `pest` crate. Each non-blank, non-comment line is one rule:
//!
//! ```text
//! state, symbol -> symbol, state    (read/write rule)
//! state -> direction, state         (move rule)
//! ```
//!
//! Lines starting with `#` are comments and are ignored. Parsing is
//! all-or-nothing: any line matching neither shape fails the whole table,
//! naming the offending line verbatim.

use crate::machine::MachineSpec;
use crate::types::{Direction, MachineError, Transition, COMMENT_PREFIX};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the rule-line grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct RuleTableParser;

/// Parses a rule-table text into a [`MachineSpec`].
///
/// Rules keep their declared order; order is part of the machine's semantics
/// since matching is first-match-wins. Every state and symbol mentioned by a
/// rule is accumulated into the vocabularies, and the blank symbol is seeded
/// into the symbol vocabulary.
///
/// # Errors
///
/// * [`MachineError::InvalidRule`] for a line matching neither rule shape,
///   carrying the line verbatim.
/// * [`MachineError::InvalidDirection`] for a move line whose direction token
///   is not one `Direction::parse` accepts, carrying the token.
///
/// No partial specification is ever returned on failure.
pub fn parse(input: &str, blank: &str) -> Result<MachineSpec, MachineError> {
    let mut states: HashSet<String> = HashSet::new();
    let mut symbols: HashSet<String> = HashSet::from([blank.to_string()]);
    let mut rules: Vec<Transition> = Vec::new();

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let parsed = RuleTableParser::parse(Rule::line, line)
            .map_err(|_| MachineError::InvalidRule(line.to_string()))?
            .next()
            .unwrap();

        // The read/write shape is tried first; the shapes cannot overlap
        // because only one of them has a comma before the arrow.
        let rule = parsed.into_inner().next().unwrap();
        match rule.as_rule() {
            Rule::read_write => rules.push(parse_read_write(rule, &mut states, &mut symbols)),
            Rule::movement => rules.push(parse_movement(rule, &mut states)?),
            _ => unreachable!("a parsed line holds a read_write or movement pair"),
        }
    }

    Ok(MachineSpec::new(states, symbols, rules))
}

/// Builds a read/write rule from a `Pair<Rule::read_write>`, recording its
/// states and symbols in the vocabularies.
fn parse_read_write(
    pair: Pair<Rule>,
    states: &mut HashSet<String>,
    symbols: &mut HashSet<String>,
) -> Transition {
    let mut tokens = pair.into_inner().map(|p| p.as_str().to_string());

    let trigger_state = tokens.next().unwrap();
    let trigger_symbol = tokens.next().unwrap();
    let result_symbol = tokens.next().unwrap();
    let result_state = tokens.next().unwrap();

    states.insert(trigger_state.clone());
    states.insert(result_state.clone());
    symbols.insert(trigger_symbol.clone());
    symbols.insert(result_symbol.clone());

    Transition::read_write(trigger_state, trigger_symbol, result_symbol, result_state)
}

/// Builds a move rule from a `Pair<Rule::movement>`, recording its states in
/// the vocabulary.
fn parse_movement(
    pair: Pair<Rule>,
    states: &mut HashSet<String>,
) -> Result<Transition, MachineError> {
    let mut tokens = pair.into_inner().map(|p| p.as_str().to_string());

    let trigger_state = tokens.next().unwrap();
    let direction_token = tokens.next().unwrap();
    let result_state = tokens.next().unwrap();

    let direction = Direction::parse(&direction_token)
        .ok_or(MachineError::InvalidDirection(direction_token))?;

    states.insert(trigger_state.clone());
    states.insert(result_state.clone());

    Ok(Transition::movement(trigger_state, direction, result_state))
}
