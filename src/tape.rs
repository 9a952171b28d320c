//! This module defines the `Tape` struct: an immutable, sparse, bi-infinite
//! sequence of symbols with a head position and a blank symbol filling every
//! unwritten cell.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Direction;

/// An immutable Turing machine tape.
///
/// Only cells holding a non-blank symbol are stored; every position in `i64`
/// is addressable and reads as the blank symbol when absent. This sparsity is
/// an invariant, not an optimization: any write that would set a cell back to
/// the blank symbol removes the entry instead of storing it, which keeps the
/// representation canonical and makes the derived structural equality exact.
///
/// Every mutating operation returns a new `Tape`; no operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    cells: HashMap<i64, String>,
    blank: String,
    head: i64,
}

impl Tape {
    /// Creates a tape from raw cell contents.
    ///
    /// Entries holding the blank symbol are dropped to uphold the sparsity
    /// invariant regardless of what the caller passed in.
    pub fn new(cells: HashMap<i64, String>, blank: impl Into<String>, head: i64) -> Self {
        let blank = blank.into();
        let cells = cells
            .into_iter()
            .filter(|(_, symbol)| *symbol != blank)
            .collect();

        Self { cells, blank, head }
    }

    /// Creates a tape with no written cells.
    pub fn empty(blank: impl Into<String>, head: i64) -> Self {
        Self {
            cells: HashMap::new(),
            blank: blank.into(),
            head,
        }
    }

    /// Parses a comma-separated token list as a tape, index 0 at the leftmost
    /// token. Tokens are trimmed; tokens equal to the blank symbol are omitted
    /// from storage. The head position is supplied by the caller.
    ///
    /// An all-whitespace input parses as the empty tape.
    pub fn parse(input: &str, blank: &str, head: i64) -> Self {
        let mut cells = HashMap::new();
        let trimmed = input.trim();

        if !trimmed.is_empty() {
            for (index, raw) in trimmed.split(',').enumerate() {
                let symbol = raw.trim();
                if symbol != blank {
                    cells.insert(index as i64, symbol.to_string());
                }
            }
        }

        Self {
            cells,
            blank: blank.to_string(),
            head,
        }
    }

    /// Returns the symbol at the given tape index, or the blank symbol if the
    /// cell was never written.
    pub fn symbol_at(&self, index: i64) -> &str {
        self.cells
            .get(&index)
            .map(String::as_str)
            .unwrap_or(&self.blank)
    }

    /// Returns the symbol at the head.
    pub fn symbol_at_head(&self) -> &str {
        self.symbol_at(self.head)
    }

    /// Writes a symbol at the current head, then moves the head in the given
    /// direction. Returns a new `Tape`.
    pub fn write_and_move(&self, symbol: &str, dir: Direction) -> Tape {
        let mut cells = self.cells.clone();
        Self::store(&mut cells, &self.blank, self.head, symbol);

        Tape {
            cells,
            blank: self.blank.clone(),
            head: self.head + dir.offset(),
        }
    }

    /// Moves the head in the given direction, then writes a symbol at the new
    /// head. Returns a new `Tape`.
    pub fn move_and_write(&self, dir: Direction, symbol: &str) -> Tape {
        let mut cells = self.cells.clone();
        let head = self.head + dir.offset();
        Self::store(&mut cells, &self.blank, head, symbol);

        Tape {
            cells,
            blank: self.blank.clone(),
            head,
        }
    }

    /// Moves the head in the given direction, leaving tape contents unchanged.
    /// Returns a new `Tape`.
    pub fn shift(&self, dir: Direction) -> Tape {
        self.write_and_move(self.symbol_at_head(), dir)
    }

    /// Writes a symbol at the head without moving it. Returns a new `Tape`.
    pub fn write_at_head(&self, symbol: &str) -> Tape {
        self.write_and_move(symbol, Direction::Stay)
    }

    /// The head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// The blank symbol of this tape.
    pub fn blank(&self) -> &str {
        &self.blank
    }

    /// The stored (non-blank) cells.
    pub fn cells(&self) -> &HashMap<i64, String> {
        &self.cells
    }

    /// The smallest and largest written index, or `None` for an empty tape.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let min = *self.cells.keys().min()?;
        let max = *self.cells.keys().max()?;
        Some((min, max))
    }

    /// Single write path: writing the blank symbol deletes the cell.
    fn store(cells: &mut HashMap<i64, String>, blank: &str, index: i64, symbol: &str) {
        if symbol == blank {
            cells.remove(&index);
        } else {
            cells.insert(index, symbol.to_string());
        }
    }
}
