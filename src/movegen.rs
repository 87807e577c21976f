// Per-piece pseudo-legal move generation.
//
// Every movement pattern reduces to one of three shapes: a fixed set of
// destination deltas (king, knight), rays walked until the first occupant
// (bishop, rook, queen), or the pawn's asymmetric advance-and-capture rules.
// The sentinel padding around the grid makes all of them branch-free at the
// board edge: an off-board probe reads as an uncapturable occupant.

use crate::board::{Color, Move, Occupant, Piece};
use crate::square::{
    Square, DIRECTIONS, EAST, KNIGHT_DELTAS, NORTH, NORTH_EAST, NORTH_WEST, SOUTH, SOUTH_EAST,
    SOUTH_WEST, WEST,
};

/// Read-only view the generators scan. Deliberately narrower than `Board`:
/// a generator can probe occupancy and ranks but cannot mutate mid-scan.
pub trait Explorable {
    fn occupant(&self, square: Square) -> Option<Occupant>;
    fn rank(&self, square: Square) -> i32;
}

pub const ROOK_DIRECTIONS: [Square; 4] = [NORTH, SOUTH, EAST, WEST];
pub const BISHOP_DIRECTIONS: [Square; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];

#[derive(Clone, Copy)]
enum Pattern {
    Leaper(&'static [Square; 8]),
    Slider(&'static [Square]),
    Pawn {
        advance: Square,
        captures: [Square; 2],
        start_rank: i32,
    },
}

/// A move generator for one piece identity: its movement pattern with the
/// color baked in. Instances live in a process-wide table built at compile
/// time; they carry no mutable state.
pub struct Generator {
    color: Color,
    pattern: Pattern,
}

impl Generator {
    /// Append every pseudo-legal move from `from` to `moves`. The caller
    /// guarantees `from` is a playable square holding the matching piece.
    pub fn generate<E: Explorable>(&self, moves: &mut Vec<Move>, board: &E, from: Square) {
        match self.pattern {
            Pattern::Leaper(deltas) => self.leaper_moves(moves, board, from, deltas),
            Pattern::Slider(directions) => self.slider_moves(moves, board, from, directions),
            Pattern::Pawn {
                advance,
                captures,
                start_rank,
            } => self.pawn_moves(moves, board, from, advance, captures, start_rank),
        }
    }

    fn leaper_moves<E: Explorable>(
        &self,
        moves: &mut Vec<Move>,
        board: &E,
        from: Square,
        deltas: &[Square; 8],
    ) {
        for &delta in deltas {
            let to = from + delta;
            match board.occupant(to) {
                None => moves.push(Move::new_unchecked(from, to)),
                Some(occupant) if occupant.can_be_captured_by(self.color) => {
                    moves.push(Move::new_unchecked(from, to))
                }
                Some(_) => {}
            }
        }
    }

    fn slider_moves<E: Explorable>(
        &self,
        moves: &mut Vec<Move>,
        board: &E,
        from: Square,
        directions: &[Square],
    ) {
        for &delta in directions {
            let mut to = from + delta;
            loop {
                match board.occupant(to) {
                    None => {
                        moves.push(Move::new_unchecked(from, to));
                        to += delta;
                    }
                    Some(occupant) => {
                        // The ray ends here either way; the blocking square
                        // itself is a destination only if it can be taken.
                        if occupant.can_be_captured_by(self.color) {
                            moves.push(Move::new_unchecked(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn pawn_moves<E: Explorable>(
        &self,
        moves: &mut Vec<Move>,
        board: &E,
        from: Square,
        advance: Square,
        captures: [Square; 2],
        start_rank: i32,
    ) {
        let mut to = from + advance;
        if board.occupant(to).is_none() {
            moves.push(Move::new_unchecked(from, to));
            // The double step needs the home rank and both squares free;
            // a blocked first square always blocks it.
            to += advance;
            if board.rank(from) == start_rank && board.occupant(to).is_none() {
                moves.push(Move::new_unchecked(from, to));
            }
        }
        for delta in captures {
            let to = from + delta;
            if let Some(occupant) = board.occupant(to) {
                if occupant.can_be_captured_by(self.color) {
                    moves.push(Move::new_unchecked(from, to));
                }
            }
        }
    }
}

// One generator per piece identity, indexed by `Piece::index()`:
// white pawn..king, then black pawn..king.
static GENERATORS: [Generator; 12] = [
    Generator {
        color: Color::White,
        pattern: Pattern::Pawn {
            advance: NORTH,
            captures: [NORTH_WEST, NORTH_EAST],
            start_rank: 1,
        },
    },
    Generator {
        color: Color::White,
        pattern: Pattern::Leaper(&KNIGHT_DELTAS),
    },
    Generator {
        color: Color::White,
        pattern: Pattern::Slider(&BISHOP_DIRECTIONS),
    },
    Generator {
        color: Color::White,
        pattern: Pattern::Slider(&ROOK_DIRECTIONS),
    },
    Generator {
        color: Color::White,
        pattern: Pattern::Slider(&DIRECTIONS),
    },
    Generator {
        color: Color::White,
        pattern: Pattern::Leaper(&DIRECTIONS),
    },
    Generator {
        color: Color::Black,
        pattern: Pattern::Pawn {
            advance: SOUTH,
            captures: [SOUTH_WEST, SOUTH_EAST],
            start_rank: 6,
        },
    },
    Generator {
        color: Color::Black,
        pattern: Pattern::Leaper(&KNIGHT_DELTAS),
    },
    Generator {
        color: Color::Black,
        pattern: Pattern::Slider(&BISHOP_DIRECTIONS),
    },
    Generator {
        color: Color::Black,
        pattern: Pattern::Slider(&ROOK_DIRECTIONS),
    },
    Generator {
        color: Color::Black,
        pattern: Pattern::Slider(&DIRECTIONS),
    },
    Generator {
        color: Color::Black,
        pattern: Pattern::Leaper(&DIRECTIONS),
    },
];

/// The generator matching a piece's movement pattern and color.
#[inline]
pub fn generator_for(piece: Piece) -> &'static Generator {
    &GENERATORS[piece.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::square;
    use std::collections::HashSet;

    // Generate moves for the piece sitting on `from` and compare the
    // destination set against a space-separated list of UCI squares.
    fn assert_generated(placement: &str, from: &str, expected: &str) {
        let board = Board::from_fen(placement).expect("valid placement");
        let from_sq = square::parse_square(from).expect("valid square");
        let piece = board.piece_at(from_sq).expect("piece on origin square");

        let mut moves = Vec::new();
        generator_for(piece).generate(&mut moves, &board, from_sq);

        let got: HashSet<String> = moves.iter().map(|m| m.to_string()).collect();
        let want: HashSet<String> = expected
            .split_whitespace()
            .map(|to| format!("{from}{to}"))
            .collect();
        assert_eq!(got, want, "moves for {} on {from}", piece.code());
        assert_eq!(moves.len(), want.len(), "duplicate moves for {from}");
    }

    #[test]
    fn king_in_corner() {
        assert_generated("8/8/8/8/8/8/8/K7", "a1", "b1 a2 b2");
    }

    #[test]
    fn king_in_center() {
        assert_generated("8/8/8/4K3/8/8/8/8", "e5", "d4 e4 f4 d5 f5 d6 e6 f6");
    }

    #[test]
    fn king_skips_own_pieces_and_takes_enemies() {
        // Black king on e5: e4/f4/f5 hold its own pieces, d4 a white pawn.
        assert_generated("K7/8/8/4kr2/3Ppn2/8/8/8", "e5", "d4 d5 d6 e6 f6");
    }

    #[test]
    fn rook_in_corner() {
        assert_generated(
            "8/8/8/8/8/8/8/R7",
            "a1",
            "a2 a3 a4 a5 a6 a7 a8 b1 c1 d1 e1 f1 g1 h1",
        );
    }

    #[test]
    fn rook_ray_stops_at_own_piece() {
        assert_generated("8/8/8/8/8/2P5/2R5/8", "c2", "b2 a2 d2 e2 f2 g2 h2 c1");
    }

    #[test]
    fn bishop_ray_includes_first_enemy_only() {
        // North-east ray stops on the black pawn at d4 and includes it;
        // the a3 pawn blocks north-west without being a destination.
        assert_generated("1k6/8/8/8/3p4/P7/1B6/K7", "b2", "c3 d4 c1");
    }

    #[test]
    fn knight_in_corner() {
        assert_generated("8/8/8/8/8/8/8/N7", "a1", "c2 b3");
    }

    #[test]
    fn knight_in_center() {
        assert_generated("8/8/8/3N4/8/8/8/8", "d5", "b4 f4 c3 e3 f6 b6 c7 e7");
    }

    #[test]
    fn knight_skips_own_pieces_and_takes_enemies() {
        assert_generated("4k3/8/8/n1P5/3K4/1N6/3P4/8", "b3", "a1 a5 c1");
    }

    #[test]
    fn white_pawn_double_step_from_home_rank() {
        assert_generated("8/8/8/8/8/8/P7/8", "a2", "a3 a4");
    }

    #[test]
    fn black_pawn_double_step_from_home_rank() {
        assert_generated("1k6/p7/8/8/8/8/3K4/8", "a7", "a6 a5");
    }

    #[test]
    fn white_pawn_advance_and_capture() {
        assert_generated("8/8/1p6/2P5/8/8/8/8", "c5", "c6 b6");
    }

    #[test]
    fn black_pawn_advance_and_capture() {
        assert_generated("8/8/8/8/2p5/1P6/8/8", "c4", "c3 b3");
    }

    #[test]
    fn blocked_pawn_has_no_moves() {
        assert_generated("8/8/8/8/8/2P5/2P5/8", "c2", "");
    }

    #[test]
    fn pawn_double_step_blocked_on_second_square() {
        // First square free, second occupied: only the single advance.
        assert_generated("8/8/8/8/2p5/8/2P5/8", "c2", "c3");
    }

    #[test]
    fn pawn_off_home_rank_has_no_double_step() {
        assert_generated("8/8/8/8/8/2P5/8/8", "c3", "c4");
    }

    #[test]
    fn pawn_does_not_capture_forward() {
        // An enemy pawn straight ahead blocks without being capturable.
        assert_generated("8/8/8/8/2p5/2P5/8/8", "c3", "");
    }
}
