//! Perft: exhaustive move-tree node counting at a fixed depth, used to
//! validate move generation against known reference values. A wrong count at
//! any depth points at a bug in generation or in make/unmake pairing.
//!
//! Reference: <https://www.chessprogramming.org/Perft>

use std::collections::HashMap;

use crate::board::{Board, Color, Move};
use crate::error::EngineError;

/// How the last ply is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Count the final ply from the generated move list without playing the
    /// moves. Equivalent in leaf count to `NonBulk` because no legality
    /// filtering happens below move generation.
    Bulk,
    /// Play every move down to depth 0.
    NonBulk,
}

/// Counters accumulated by one perft run.
#[derive(Debug, Clone)]
pub struct PerftResult {
    leaf_nodes: u64,
    searched_nodes: u64,
    divide: HashMap<Move, u64>,
}

impl PerftResult {
    /// Leaf nodes at the requested depth.
    pub fn leaf_nodes(&self) -> u64 {
        self.leaf_nodes
    }

    /// Nodes entered during the search, internal nodes and leaves alike.
    pub fn searched_nodes(&self) -> u64 {
        self.searched_nodes
    }

    /// Per-move leaf counts of the first ply, for localizing generator bugs.
    pub fn divide(&self) -> &HashMap<Move, u64> {
        &self.divide
    }
}

/// Count move-tree nodes on `board` to `depth` plies, `side` moving first.
/// The board is mutated during the search and restored before returning.
pub fn perft(
    board: &mut Board,
    depth: u32,
    mode: Mode,
    side: Color,
) -> Result<PerftResult, EngineError> {
    if depth == 0 {
        return Err(EngineError::InvalidDepth);
    }
    let mut result = PerftResult {
        leaf_nodes: 0,
        searched_nodes: 0,
        divide: HashMap::new(),
    };
    result.leaf_nodes = descend(board, &mut result, depth, depth, mode, side)?;
    Ok(result)
}

fn descend(
    board: &mut Board,
    result: &mut PerftResult,
    depth: u32,
    original_depth: u32,
    mode: Mode,
    side: Color,
) -> Result<u64, EngineError> {
    result.searched_nodes += 1;
    if depth == 0 {
        return Ok(1);
    }
    let moves = board.generate_moves(side);
    if depth == 1 && mode == Mode::Bulk {
        // Every generated move is a leaf; skip playing them out.
        return Ok(moves.len() as u64);
    }
    let mut leaf_nodes = 0;
    for mv in moves {
        board.make_move(mv)?;
        let count = descend(board, result, depth - 1, original_depth, mode, side.opposite())?;
        board.unmake_move()?;
        if depth == original_depth {
            result.divide.insert(mv, count);
        }
        leaf_nodes += count;
    }
    Ok(leaf_nodes)
}
