//! This module defines the `MachineSpec` struct: an ordered rule table plus
//! the declared state/symbol vocabularies. It implements the two engine entry
//! points: `step`, which produces the unique successor of a configuration,
//! and `invert`, which enumerates every configuration that could have
//! produced it one step earlier.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{Configuration, MachineError, Transition};

/// A Turing machine specification: rules, states, and symbols.
///
/// The rule list is ordered and the order is part of the semantics: matching
/// is first-match-wins, so overlapping rules are resolved by position. The
/// vocabularies are validation aids (see [`crate::analyzer`]) and are never
/// consulted by the matching logic itself.
///
/// A `MachineSpec` is read-only once built; `step` and `invert` are pure
/// functions, so a single spec can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
    states: HashSet<String>,
    symbols: HashSet<String>,
    rules: Vec<Transition>,
}

impl MachineSpec {
    /// Creates a specification from already-built parts.
    pub fn new(states: HashSet<String>, symbols: HashSet<String>, rules: Vec<Transition>) -> Self {
        Self {
            states,
            symbols,
            rules,
        }
    }

    /// Parses a rule-table text into a specification. See [`crate::parser`]
    /// for the line format; parsing is all-or-nothing.
    pub fn parse(input: &str, blank: &str) -> Result<Self, MachineError> {
        crate::parser::parse(input, blank)
    }

    /// The declared state vocabulary.
    pub fn states(&self) -> &HashSet<String> {
        &self.states
    }

    /// The declared symbol vocabulary.
    pub fn symbols(&self) -> &HashSet<String> {
        &self.symbols
    }

    /// The rules, in declared order.
    pub fn rules(&self) -> &[Transition] {
        &self.rules
    }

    /// The trigger state of the first rule, used as the conventional starting
    /// state for tables that carry no explicit one.
    pub fn default_initial_state(&self) -> Option<&str> {
        self.rules.first().map(Transition::trigger_state)
    }

    /// Finds the first rule (by declared order) matching the given state and
    /// symbol under the head. Later matching rules are never consulted.
    pub fn matching_rule(&self, state: &str, symbol: &str) -> Option<&Transition> {
        self.rules.iter().find(|rule| rule.matches(state, symbol))
    }

    /// Steps a configuration forward, producing its unique successor.
    ///
    /// A read/write rule rewrites the symbol under the head; a move rule
    /// relocates the head. If no rule matches, the machine halts: the result
    /// keeps the same tape and state with the halted flag set. That fallback
    /// is the machine's halting condition, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::HaltedConfiguration`] if `curr` is already
    /// halted; a halted configuration has no successor.
    pub fn step(&self, curr: &Configuration) -> Result<Configuration, MachineError> {
        if curr.is_halted() {
            return Err(MachineError::HaltedConfiguration);
        }

        let symbol = curr.tape().symbol_at_head();

        match self.matching_rule(curr.state(), symbol) {
            Some(Transition::ReadWrite { result, .. }) => Ok(Configuration::new(
                curr.tape().write_at_head(&result.symbol),
                result.state.clone(),
                false,
            )),
            Some(Transition::Move {
                direction,
                result_state,
                ..
            }) => Ok(Configuration::new(
                curr.tape().shift(*direction),
                result_state.clone(),
                false,
            )),
            None => Ok(Configuration::new(curr.tape().clone(), curr.state(), true)),
        }
    }

    /// Enumerates every configuration whose `step` would produce `curr`.
    ///
    /// Each rule is inverted independently from local information only; there
    /// is no search. A read/write rule applies when its result state and
    /// result symbol match the current state and head symbol, and its
    /// inversion restores the trigger symbol under the head. A move rule
    /// applies when its result state matches, and its inversion walks the
    /// head back in the opposite direction; move rules never constrain
    /// symbols because they never alter tape contents.
    ///
    /// Predecessors are emitted in rule order and are not deduplicated:
    /// structurally identical predecessors appear once per rule justifying
    /// them. Callers wanting a deduplicated frontier must fold with
    /// `Configuration` equality themselves.
    ///
    /// A halted configuration has exactly one predecessor: itself, one step
    /// earlier, right before the halting check: same tape and state with the
    /// halted flag cleared.
    pub fn invert(&self, curr: &Configuration) -> Vec<Configuration> {
        if curr.is_halted() {
            return vec![Configuration::new(curr.tape().clone(), curr.state(), false)];
        }

        let mut predecessors = Vec::new();

        for rule in &self.rules {
            match rule {
                Transition::ReadWrite { trigger, result } => {
                    if result.state != curr.state()
                        || result.symbol != curr.tape().symbol_at_head()
                    {
                        continue;
                    }

                    predecessors.push(Configuration::new(
                        curr.tape().write_at_head(&trigger.symbol),
                        trigger.state.clone(),
                        false,
                    ));
                }
                Transition::Move {
                    trigger_state,
                    direction,
                    result_state,
                } => {
                    if result_state != curr.state() {
                        continue;
                    }

                    predecessors.push(Configuration::new(
                        curr.tape().shift(direction.opposite()),
                        trigger_state.clone(),
                        false,
                    ));
                }
            }
        }

        predecessors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Tape;
    use crate::types::Direction;

    /// Rules: (a, 0 -> 0, b), (a, 1 -> 0, b), (b -> R, a).
    fn sample_spec() -> MachineSpec {
        MachineSpec::new(
            HashSet::from(["a".to_string(), "b".to_string()]),
            HashSet::from(["0".to_string(), "1".to_string(), "_".to_string()]),
            vec![
                Transition::read_write("a", "0", "0", "b"),
                Transition::read_write("a", "1", "0", "b"),
                Transition::movement("b", Direction::Right, "a"),
            ],
        )
    }

    fn sample_tape() -> Tape {
        Tape::parse("1,1,1,0,1,0", "_", 0)
    }

    #[test]
    fn test_step_applies_read_write_rule() {
        let spec = sample_spec();
        let config = Configuration::new(sample_tape(), "a", false);

        let next = spec.step(&config).unwrap();

        // (a, 1 -> 0, b): cell 0 rewritten, head unmoved.
        assert_eq!(next.state(), "b");
        assert!(!next.is_halted());
        assert_eq!(next.tape().symbol_at(0), "0");
        assert_eq!(next.tape().head(), 0);
    }

    #[test]
    fn test_step_applies_move_rule() {
        let spec = sample_spec();
        let config = Configuration::new(sample_tape(), "a", false);

        let after_write = spec.step(&config).unwrap();
        let after_move = spec.step(&after_write).unwrap();

        assert_eq!(after_move.state(), "a");
        assert_eq!(after_move.tape().head(), 1);
        assert_eq!(after_move.tape().cells(), after_write.tape().cells());
    }

    #[test]
    fn test_step_halts_when_no_rule_matches() {
        let spec = sample_spec();
        let config = Configuration::new(Tape::empty("_", 0), "a", false);

        // State a has rules for 0 and 1 only; the head reads the blank.
        let next = spec.step(&config).unwrap();

        assert!(next.is_halted());
        assert_eq!(next.state(), "a");
        assert_eq!(next.tape(), config.tape());
    }

    #[test]
    fn test_step_rejects_halted_configuration() {
        let spec = sample_spec();
        let config = Configuration::new(sample_tape(), "a", true);

        assert_eq!(spec.step(&config), Err(MachineError::HaltedConfiguration));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Two rules with the same trigger but different results: the earlier
        // one must be applied, in both orders.
        let overlapping = |first: Transition, second: Transition| {
            MachineSpec::new(HashSet::new(), HashSet::new(), vec![first, second])
        };
        let config = Configuration::new(Tape::parse("1", "_", 0), "a", false);

        let spec = overlapping(
            Transition::read_write("a", "1", "0", "b"),
            Transition::read_write("a", "1", "9", "c"),
        );
        assert_eq!(spec.step(&config).unwrap().state(), "b");

        let spec = overlapping(
            Transition::read_write("a", "1", "9", "c"),
            Transition::read_write("a", "1", "0", "b"),
        );
        assert_eq!(spec.step(&config).unwrap().state(), "c");
    }

    #[test]
    fn test_move_rule_never_alters_cells() {
        let spec = MachineSpec::new(
            HashSet::new(),
            HashSet::new(),
            vec![Transition::movement("a", Direction::Left, "a")],
        );
        let tape = Tape::parse("1,0,1", "_", 1);
        let config = Configuration::new(tape.clone(), "a", false);

        let next = spec.step(&config).unwrap();

        assert_eq!(next.tape().cells(), tape.cells());
        assert_eq!(next.tape().head(), 0);
    }

    #[test]
    fn test_invert_halted_returns_unhalted_twin() {
        let spec = sample_spec();
        let tape = sample_tape();
        let halted = Configuration::new(tape.clone(), "a", true);

        let predecessors = spec.invert(&halted);

        assert_eq!(
            predecessors,
            vec![Configuration::new(tape, "a", false)]
        );
    }

    #[test]
    fn test_invert_read_write_rule_restores_symbol() {
        let spec = sample_spec();
        // Head reads 0 in state b: both (a, 0 -> 0, b) and (a, 1 -> 0, b)
        // could have produced this.
        let tape = Tape::parse("0,1", "_", 0);
        let config = Configuration::new(tape.clone(), "b", false);

        let predecessors = spec.invert(&config);

        assert!(predecessors.contains(&Configuration::new(tape.write_at_head("1"), "a", false)));
        assert!(predecessors.contains(&Configuration::new(tape.write_at_head("0"), "a", false)));
    }

    #[test]
    fn test_invert_read_write_rule_checks_head_symbol() {
        let spec = sample_spec();
        // Head reads 1 in state b: no read/write rule results in 1, so only
        // move-rule inversions may appear.
        let config = Configuration::new(Tape::parse("1", "_", 0), "b", false);

        let predecessors = spec.invert(&config);

        assert!(predecessors.is_empty());
    }

    #[test]
    fn test_invert_move_rule_walks_head_back() {
        let spec = sample_spec();
        let tape = Tape::parse("0,1", "_", 1);
        let config = Configuration::new(tape.clone(), "a", false);

        let predecessors = spec.invert(&config);

        // Only (b -> R, a) results in state a; its inversion moves the head
        // left and leaves every cell alone.
        assert_eq!(predecessors.len(), 1);
        assert_eq!(predecessors[0].state(), "b");
        assert_eq!(predecessors[0].tape().head(), 0);
        assert_eq!(predecessors[0].tape().cells(), tape.cells());
    }

    #[test]
    fn test_invert_keeps_duplicates() {
        // Two identical move rules independently justify the same
        // predecessor; both must be emitted.
        let spec = MachineSpec::new(
            HashSet::new(),
            HashSet::new(),
            vec![
                Transition::movement("b", Direction::Right, "a"),
                Transition::movement("b", Direction::Right, "a"),
            ],
        );
        let config = Configuration::new(Tape::parse("1", "_", 1), "a", false);

        let predecessors = spec.invert(&config);

        assert_eq!(predecessors.len(), 2);
        assert_eq!(predecessors[0], predecessors[1]);
    }

    #[test]
    fn test_step_then_invert_round_trip() {
        let spec = sample_spec();
        let mut config = Configuration::new(sample_tape(), "a", false);

        // Walk a few steps; each non-halted successor must list its actual
        // predecessor among the inversions.
        for _ in 0..6 {
            let next = spec.step(&config).unwrap();
            if next.is_halted() {
                break;
            }

            assert!(
                spec.invert(&next).contains(&config),
                "predecessor not found for state {}",
                next.state()
            );
            config = next;
        }
    }

    #[test]
    fn test_default_initial_state() {
        assert_eq!(sample_spec().default_initial_state(), Some("a"));
        assert_eq!(
            MachineSpec::new(HashSet::new(), HashSet::new(), Vec::new())
                .default_initial_state(),
            None
        );
    }
}
