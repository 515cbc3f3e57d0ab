//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::rules::{advance, RuleSet, StandardChess};
use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
///
/// Interior nodes skip the check and mate bookkeeping; only the move
/// generator and the legality filter are exercised.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = StandardChess.legal_moves(state);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        nodes += perft(&advance(state, *m), depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = StandardChess.legal_moves(state);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let nodes = if depth > 1 {
            perft(&advance(state, *m), depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
