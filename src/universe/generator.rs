//! Exhaustive generation of grammar-valid sequences
//!
//! Depth-first search over positions carrying the current height, pruned with
//! the same rule the validator uses. Output is in (Up, Flat, Down) priority
//! order.

use super::RESERVED_NON_ANSWER;
use crate::core::{Grammar, Sequence, Symbol};

/// Enumerate every grammar-valid sequence, in search order
///
/// # Examples
/// ```
/// use brackle::core::Grammar;
/// use brackle::universe::all_valid;
///
/// // Motzkin paths of length 4 with height at most 2
/// let all = all_valid(Grammar::new(2));
/// assert_eq!(all.len(), 9);
/// assert_eq!(all[0].to_string(), "(())");
/// ```
#[must_use]
pub fn all_valid(grammar: Grammar) -> Vec<Sequence> {
    let mut out = Vec::new();
    let mut prefix = Vec::with_capacity(grammar.seq_len());
    extend(grammar, 0, &mut prefix, &mut out);
    out
}

fn extend(grammar: Grammar, height: i32, prefix: &mut Vec<Symbol>, out: &mut Vec<Sequence>) {
    let position = prefix.len();
    if position == grammar.seq_len() {
        if height == 0 {
            out.push(Sequence::new(prefix.clone()));
        }
        return;
    }

    for symbol in Symbol::SEARCH_ORDER {
        // Down needs something to close
        if symbol == Symbol::Down && height == 0 {
            continue;
        }
        let next = height + symbol.delta();
        if grammar.height_allowed(position, next) {
            prefix.push(symbol);
            extend(grammar, next, prefix, out);
            prefix.pop();
        }
    }
}

/// Whether a sequence is too trivial to be a daily answer
///
/// Removes the all-flat sequence, every sequence with a single Up/Down pair,
/// and the reserved alternating sequence. Not configurable.
#[must_use]
pub fn is_boring(sequence: &Sequence) -> bool {
    match sequence.up_count() {
        0 | 1 => true,
        _ => sequence.to_string() == RESERVED_NON_ANSWER,
    }
}
