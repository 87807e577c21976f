// Board representation: a 120-slot mailbox grid with sentinel padding,
// plus the move history and capture stacks that make moves reversible.
//
// This is a deliberately small core. It knows piece movement and occupancy
// rules but nothing about king safety: the moves it produces and accepts are
// pseudo-legal. Castling, en passant and promotion are out of scope.

use std::fmt;

use crate::error::EngineError;
use crate::movegen::{self, Explorable};
use crate::square::{self, Square, GRID_SIZE, ROW_WIDTH};

/// Piece placement field of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

/// One of the 12 real pieces. Pieces are plain values with no per-instance
/// state; the movement pattern for each is looked up in a static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    // Index into the generator table: white pieces 0-5, black pieces 6-11.
    #[inline]
    pub const fn index(self) -> usize {
        (self.color as usize) * 6 + (self.kind as usize)
    }

    /// FEN letter, uppercase for white and lowercase for black.
    pub const fn code(self) -> char {
        let code = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match self.color {
            Color::White => code,
            Color::Black => code.to_ascii_lowercase(),
        }
    }

    /// Piece for a FEN letter; `None` for anything else. The blocker sentinel
    /// has no letter and can never appear in a placement string.
    pub fn from_code(code: char) -> Option<Piece> {
        let kind = match code.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        let color = if code.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

/// What a grid cell can hold besides being empty: a real piece, or the
/// blocker sentinel that fills every padding cell. The blocker never moves
/// and can never be captured, so to the generators the board edge looks
/// like any other uncapturable occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Piece(Piece),
    Blocker,
}

impl Occupant {
    #[inline]
    pub fn can_be_captured_by(self, color: Color) -> bool {
        match self {
            Occupant::Piece(piece) => piece.color != color,
            Occupant::Blocker => false,
        }
    }
}

/// An immutable (from, to) pair over playable squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Build a move, rejecting padding squares and null moves.
    pub fn new(from: Square, to: Square) -> Result<Self, EngineError> {
        if !square::is_playable(from) || !square::is_playable(to) || from == to {
            return Err(EngineError::InvalidMove(format!("({from}, {to})")));
        }
        Ok(Self { from, to })
    }

    // Generators emit only destinations reached from a playable origin, so
    // they skip the validation.
    #[inline]
    pub(crate) const fn new_unchecked(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parse the 4-character UCI form, e.g. `"e2e4"`.
    pub fn from_uci(uci: &str) -> Result<Self, EngineError> {
        if uci.len() != 4 || !uci.is_ascii() {
            return Err(EngineError::InvalidMove(uci.to_string()));
        }
        let from = square::parse_square(&uci[..2])?;
        let to = square::parse_square(&uci[2..])?;
        Move::new(from, to)
    }

    #[inline]
    pub fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(self) -> Square {
        self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square::to_uci(self.from), square::to_uci(self.to))
    }
}

/// The board: owning grid plus parallel history and capture stacks.
///
/// `make_move`/`unmake_move` mutate in place under a strict stack discipline,
/// so a single board must never be driven by more than one search path at a
/// time. Parallel strategies clone the board instead; a clone owns its grid
/// and both stacks and shares nothing with the original.
#[derive(Clone)]
pub struct Board {
    cells: [Option<Occupant>; GRID_SIZE],
    played_moves: Vec<Move>,
    captures: Vec<Option<Piece>>,
}

impl Board {
    /// Build a board from the piece placement field of a FEN string,
    /// ranks 8 down to 1, files a to h.
    pub fn from_fen(placement: &str) -> Result<Self, EngineError> {
        let mut board = Self {
            cells: [None; GRID_SIZE],
            played_moves: Vec::new(),
            captures: Vec::new(),
        };
        board.fill_blockers();

        let mut rank: i32 = 7;
        let mut file: i32 = 0;
        for c in placement.chars() {
            match c {
                '1'..='8' => {
                    let count = c as i32 - '0' as i32;
                    if count > 8 - file {
                        return Err(EngineError::InvalidFen(format!(
                            "too many files on rank {}",
                            rank + 1
                        )));
                    }
                    file += count;
                }
                '/' => {
                    if file != 8 {
                        return Err(EngineError::InvalidFen(format!(
                            "missing files on rank {}",
                            rank + 1
                        )));
                    }
                    if rank == 0 {
                        return Err(EngineError::InvalidFen("too many ranks".to_string()));
                    }
                    file = 0;
                    rank -= 1;
                }
                _ => {
                    let piece = Piece::from_code(c).ok_or_else(|| {
                        EngineError::InvalidFen(format!("unknown piece '{c}'"))
                    })?;
                    if file > 7 {
                        return Err(EngineError::InvalidFen(format!(
                            "too many files on rank {}",
                            rank + 1
                        )));
                    }
                    board.cells[square::square_at(file, rank) as usize] =
                        Some(Occupant::Piece(piece));
                    file += 1;
                }
            }
        }
        if file != 8 {
            return Err(EngineError::InvalidFen(format!(
                "missing files on rank {}",
                rank + 1
            )));
        }
        if rank != 0 {
            return Err(EngineError::InvalidFen("missing ranks".to_string()));
        }
        Ok(board)
    }

    // Seed every padding cell with the sentinel: the two border rows at each
    // end and the two padding columns flanking each playable rank.
    fn fill_blockers(&mut self) {
        for cell in &mut self.cells[..20] {
            *cell = Some(Occupant::Blocker);
        }
        for cell in &mut self.cells[100..] {
            *cell = Some(Occupant::Blocker);
        }
        for rank in 0..8 {
            let row = (20 + rank * ROW_WIDTH) as usize;
            self.cells[row] = Some(Occupant::Blocker);
            self.cells[row + 9] = Some(Occupant::Blocker);
        }
    }

    /// Occupant of any grid cell; indices outside the grid read as blocked.
    #[inline]
    pub fn occupant_at(&self, square: Square) -> Option<Occupant> {
        if square >= 0 && (square as usize) < GRID_SIZE {
            self.cells[square as usize]
        } else {
            Some(Occupant::Blocker)
        }
    }

    /// The real piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        match self.occupant_at(square) {
            Some(Occupant::Piece(piece)) => Some(piece),
            _ => None,
        }
    }

    /// All pseudo-legal moves for `color`, scanning origin squares in
    /// ascending row-major order. The order within one origin follows the
    /// piece's delta table and is stable across runs.
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for sq in square::PLAYABLE_MIN..=square::PLAYABLE_MAX {
            if let Some(Occupant::Piece(piece)) = self.cells[sq as usize] {
                if piece.color == color {
                    movegen::generator_for(piece).generate(&mut moves, self, sq);
                }
            }
        }
        moves
    }

    /// Apply a pseudo-legal move. The origin must hold a piece and the
    /// destination must be empty or hold an enemy piece; everything is
    /// checked before the first write, so a rejected move leaves the board
    /// untouched. No king-safety validation happens here.
    pub fn make_move(&mut self, mv: Move) -> Result<(), EngineError> {
        let mover = match self.cells[mv.from() as usize] {
            Some(Occupant::Piece(piece)) => piece,
            _ => {
                return Err(EngineError::IllegalMove {
                    mv: mv.to_string(),
                    reason: "no piece on the origin square",
                })
            }
        };
        let captured = match self.cells[mv.to() as usize] {
            None => None,
            Some(Occupant::Piece(piece)) if piece.color != mover.color => Some(piece),
            Some(_) => {
                return Err(EngineError::IllegalMove {
                    mv: mv.to_string(),
                    reason: "destination square cannot be captured",
                })
            }
        };

        self.captures.push(captured);
        self.cells[mv.to() as usize] = self.cells[mv.from() as usize];
        self.cells[mv.from() as usize] = None;
        self.played_moves.push(mv);
        Ok(())
    }

    /// Undo the most recent move by popping the history and capture stacks.
    /// This exactly inverts `make_move` as long as makes and unmakes pair up.
    pub fn unmake_move(&mut self) -> Result<(), EngineError> {
        let (Some(mv), Some(captured)) = (self.played_moves.pop(), self.captures.pop()) else {
            return Err(EngineError::NothingToUnmake);
        };
        self.cells[mv.from() as usize] = self.cells[mv.to() as usize];
        self.cells[mv.to() as usize] = captured.map(Occupant::Piece);
        Ok(())
    }

    /// Number of moves currently on the history stack.
    pub fn played_moves(&self) -> usize {
        self.played_moves.len()
    }
}

impl Explorable for Board {
    #[inline]
    fn occupant(&self, square: Square) -> Option<Occupant> {
        self.occupant_at(square)
    }

    #[inline]
    fn rank(&self, square: Square) -> i32 {
        square::rank_of(square)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(square::square_at(file, rank)) {
                    Some(piece) => write!(f, "{}", piece.code())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
