use crate::error::{EngineError, EngineResult};
use super::{Color, CastleSide, Move, Piece, PromotionBase, Type, ZOBRIST};

/// Standard starting position, FEN-encoded.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Which king/rook pairs still retain the right to castle. A flag never goes
/// from `false` back to `true` — losing a right is permanent, which is what
/// lets the Zobrist hash XOR a right's key out without ever XORing it back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    fn get(&self, color: Color, king_side: bool) -> bool {
        match (color, king_side) {
            (Color::White, true) => self.white_king_side,
            (Color::White, false) => self.white_queen_side,
            (Color::Black, true) => self.black_king_side,
            (Color::Black, false) => self.black_queen_side,
        }
    }

    fn clear(&mut self, color: Color, king_side: bool) {
        let slot = match (color, king_side) {
            (Color::White, true) => &mut self.white_king_side,
            (Color::White, false) => &mut self.white_queen_side,
            (Color::Black, true) => &mut self.black_king_side,
            (Color::Black, false) => &mut self.black_queen_side,
        };
        *slot = false;
    }
}

/// Result of applying a move that was legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Ok,
    Check,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone)]
pub struct MoveTransition {
    pub position: Position,
    pub status: MoveStatus,
}

/// A chess position. Immutable: every transition produces a new `Position`
/// rather than mutating one in place, so a search tree is just a tree of
/// values with no undo-move bookkeeping.
///
/// Squares are numbered a8=0 .. h1=63 (file = `sq % 8`, rank-from-top = `sq / 8`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Piece; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant_target: Option<u8>,
    parent_move: Move,
    zobrist_hash: u64,
    white_king_square: u8,
    black_king_square: u8,
    halfmove_clock: u16,
    fullmove_number: u16,
    legal_moves: Vec<Move>,
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl Position {
    pub fn starting_position() -> Position {
        Position::from_fen(STARTING_FEN).expect("STARTING_FEN is well-formed")
    }

    pub fn squares(&self) -> &[Piece; 64] {
        &self.squares
    }

    pub fn piece_at(&self, square: u8) -> Piece {
        self.squares[square as usize]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_target(&self) -> Option<u8> {
        self.en_passant_target
    }

    pub fn parent_move(&self) -> Move {
        self.parent_move
    }

    pub fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    pub fn king_square(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white_king_square,
            Color::Black => self.black_king_square,
        }
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Legal moves for the side to move, computed once when the position was built.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }

    pub fn from_fen(fen: &str) -> EngineResult<Position> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = parts.first().ok_or_else(|| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: "missing piece placement field".to_string(),
        })?;

        let mut squares = [Piece::none(); 64];
        let mut idx: usize = 0;
        for c in placement.chars() {
            match c {
                '/' => continue,
                '1'..='8' => {
                    idx += c.to_digit(10).unwrap() as usize;
                }
                _ => {
                    if idx >= 64 {
                        return Err(EngineError::InvalidFen {
                            fen: fen.to_string(),
                            reason: "piece placement overruns the board".to_string(),
                        });
                    }
                    squares[idx] = Piece::from_char(c);
                    idx += 1;
                }
            }
        }
        if idx != 64 {
            return Err(EngineError::InvalidFen {
                fen: fen.to_string(),
                reason: format!("piece placement covers {idx} squares, expected 64"),
            });
        }

        let side_to_move = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(EngineError::InvalidFen {
                    fen: fen.to_string(),
                    reason: format!("unknown side to move \"{other}\""),
                })
            }
        };

        let mut castling = CastlingRights::default();
        match parts.get(2).copied().unwrap_or("-") {
            "-" => {}
            rights => {
                for c in rights.chars() {
                    match c {
                        'K' => castling.white_king_side = true,
                        'Q' => castling.white_queen_side = true,
                        'k' => castling.black_king_side = true,
                        'q' => castling.black_queen_side = true,
                        other => {
                            return Err(EngineError::InvalidFen {
                                fen: fen.to_string(),
                                reason: format!("unknown castling flag '{other}'"),
                            })
                        }
                    }
                }
            }
        }

        let en_passant_target = match parts.get(3).copied().unwrap_or("-") {
            "-" => None,
            square => Some(parse_algebraic(square).ok_or_else(|| EngineError::InvalidFen {
                fen: fen.to_string(),
                reason: format!("invalid en passant square \"{square}\""),
            })?),
        };

        let halfmove_clock = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        let fullmove_number = parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        let white_king_square = find_king(&squares, Color::White).ok_or_else(|| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: "no white king on the board".to_string(),
        })?;
        let black_king_square = find_king(&squares, Color::Black).ok_or_else(|| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: "no black king on the board".to_string(),
        })?;

        let zobrist_hash = full_zobrist_hash(&squares, side_to_move, castling, en_passant_target);

        Ok(Position::build(
            squares,
            side_to_move,
            castling,
            en_passant_target,
            Move::NullMove,
            zobrist_hash,
            white_king_square,
            black_king_square,
            halfmove_clock,
            fullmove_number,
        ))
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in 0..8 {
            let mut empty = 0;
            for file in 0..8 {
                let piece = self.squares[rank * 8 + file];
                if piece.is_none() {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    fen.push_str(&empty.to_string());
                    empty = 0;
                }
                fen.push(piece.to_char());
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        fen.push(' ');
        let mut any_rights = false;
        for (held, c) in [
            (self.castling.white_king_side, 'K'),
            (self.castling.white_queen_side, 'Q'),
            (self.castling.black_king_side, 'k'),
            (self.castling.black_queen_side, 'q'),
        ] {
            if held {
                fen.push(c);
                any_rights = true;
            }
        }
        if !any_rights {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_target {
            Some(sq) => fen.push_str(&algebraic(sq)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// Applies a move, failing if it is not one of `self.legal_moves()`.
    /// `Move::NullMove` can never be applied here — null-move pruning flips
    /// the side to move procedurally via [`Position::apply_null_move`]
    /// instead of ever constructing a `NullMove` value to execute.
    pub fn apply(&self, mv: Move) -> EngineResult<MoveTransition> {
        if mv.is_null() {
            panic!("Move::NullMove cannot be applied via Position::apply; use apply_null_move");
        }

        if !self.legal_moves.contains(&mv) {
            if self.pseudo_legal_moves().contains(&mv) {
                return Err(EngineError::MoveLeavesKingInCheck);
            }
            return Err(EngineError::IllegalMove);
        }

        let new_position = self.apply_unchecked(mv);
        let in_check = new_position.is_in_check(new_position.side_to_move);
        let status = if new_position.legal_moves.is_empty() {
            if in_check {
                MoveStatus::Checkmate
            } else {
                MoveStatus::Stalemate
            }
        } else if in_check {
            MoveStatus::Check
        } else {
            MoveStatus::Ok
        };

        Ok(MoveTransition { position: new_position, status })
    }

    /// Flips the side to move without moving a piece, for null-move pruning.
    /// Callers must never invoke this while the side to move is in check.
    pub fn apply_null_move(&self) -> Position {
        debug_assert!(!self.is_in_check(self.side_to_move), "null move while in check");

        let mut hash = self.zobrist_hash ^ ZOBRIST.side_to_move;
        if let Some(file) = self.en_passant_target.map(|sq| sq % 8) {
            hash ^= ZOBRIST.en_passant_key(file);
        }

        Position::build(
            self.squares,
            self.side_to_move.opposite(),
            self.castling,
            None,
            Move::NullMove,
            hash,
            self.white_king_square,
            self.black_king_square,
            self.halfmove_clock + 1,
            self.fullmove_number + if self.side_to_move == Color::Black { 1 } else { 0 },
        )
    }

    fn apply_unchecked(&self, mv: Move) -> Position {
        let mut squares = self.squares;
        let mut hash = self.zobrist_hash;
        let mut castling = self.castling;
        let color = mv.color().expect("non-null move has a color");
        let mut white_king_square = self.white_king_square;
        let mut black_king_square = self.black_king_square;
        let is_capture_or_pawn_move = mv.is_capture() || mv.moving_kind() == Some(Type::Pawn);

        let move_piece = |squares: &mut [Piece; 64], hash: &mut u64, piece: Piece, from: u8, to: u8| {
            *hash ^= ZOBRIST.piece_key(piece.color, piece.piece_type, from);
            *hash ^= ZOBRIST.piece_key(piece.color, piece.piece_type, to);
            squares[from as usize] = Piece::none();
            squares[to as usize] = piece;
        };

        let remove_captured = |squares: &mut [Piece; 64], hash: &mut u64, square: u8| {
            let captured = squares[square as usize];
            if !captured.is_none() {
                *hash ^= ZOBRIST.piece_key(captured.color, captured.piece_type, square);
                squares[square as usize] = Piece::none();
            }
        };

        let mut new_en_passant_target = None;

        match mv {
            Move::QuietMove { piece, from, to }
            | Move::CaptureMove { piece, from, to, .. }
            | Move::PawnPush { piece, from, to } => {
                remove_captured(&mut squares, &mut hash, to);
                move_piece(&mut squares, &mut hash, piece, from, to);
            }
            Move::PawnCapture { piece, from, to, .. } => {
                remove_captured(&mut squares, &mut hash, to);
                move_piece(&mut squares, &mut hash, piece, from, to);
            }
            Move::PawnDoubleStep { piece, from, to } => {
                remove_captured(&mut squares, &mut hash, to);
                move_piece(&mut squares, &mut hash, piece, from, to);
                new_en_passant_target = Some(((from as i32 + to as i32) / 2) as u8);
            }
            Move::EnPassantCapture { piece, from, to, captured_square } => {
                remove_captured(&mut squares, &mut hash, captured_square);
                move_piece(&mut squares, &mut hash, piece, from, to);
            }
            Move::Castle { king_from, king_to, rook_from, rook_to, .. } => {
                let king = squares[king_from as usize];
                let rook = squares[rook_from as usize];
                move_piece(&mut squares, &mut hash, king, king_from, king_to);
                move_piece(&mut squares, &mut hash, rook, rook_from, rook_to);
            }
            Move::Promotion { base, color, promoted_kind } => {
                let (from, to) = match base {
                    PromotionBase::Push { from, to } => (from, to),
                    PromotionBase::Capture { from, to, .. } => (from, to),
                };
                remove_captured(&mut squares, &mut hash, to);
                hash ^= ZOBRIST.piece_key(color, Type::Pawn, from);
                squares[from as usize] = Piece::none();
                let promoted = Piece { color, piece_type: promoted_kind };
                hash ^= ZOBRIST.piece_key(color, promoted_kind, to);
                squares[to as usize] = promoted;
            }
            Move::NullMove => unreachable!("apply_unchecked never receives a null move"),
        }

        if let Some(file) = self.en_passant_target.map(|sq| sq % 8) {
            hash ^= ZOBRIST.en_passant_key(file);
        }
        if let Some(file) = new_en_passant_target.map(|sq| sq % 8) {
            hash ^= ZOBRIST.en_passant_key(file);
        }

        if let Some(from) = mv.from_square() {
            if mv.moving_kind() == Some(Type::King) {
                for king_side in [true, false] {
                    if castling.get(color, king_side) {
                        hash ^= ZOBRIST.castling_key(color, king_side);
                        castling.clear(color, king_side);
                    }
                }
            }
            clear_rook_right(&mut castling, &mut hash, color, from);
        }
        if let Some(to) = mv.to_square() {
            clear_rook_right(&mut castling, &mut hash, color.opposite(), to);
        }

        if mv.moving_kind() == Some(Type::King) {
            match color {
                Color::White => white_king_square = mv.to_square().unwrap(),
                Color::Black => black_king_square = mv.to_square().unwrap(),
            }
        }

        hash ^= ZOBRIST.side_to_move;

        let halfmove_clock = if is_capture_or_pawn_move { 0 } else { self.halfmove_clock + 1 };
        let fullmove_number = self.fullmove_number + if color == Color::Black { 1 } else { 0 };

        Position::build(
            squares,
            color.opposite(),
            castling,
            new_en_passant_target,
            mv,
            hash,
            white_king_square,
            black_king_square,
            halfmove_clock,
            fullmove_number,
        )
    }

    /// Shared constructor: fills in the derived fields (legal moves, cached
    /// king squares are passed in already) that every position-producing path
    /// needs, so `from_fen`/`apply_unchecked`/`apply_null_move` agree exactly
    /// on what a fully-built `Position` looks like.
    #[allow(clippy::too_many_arguments)]
    fn build(
        squares: [Piece; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant_target: Option<u8>,
        parent_move: Move,
        zobrist_hash: u64,
        white_king_square: u8,
        black_king_square: u8,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Position {
        let mut position = Position {
            squares,
            side_to_move,
            castling,
            en_passant_target,
            parent_move,
            zobrist_hash,
            white_king_square,
            black_king_square,
            halfmove_clock,
            fullmove_number,
            legal_moves: Vec::new(),
        };
        position.legal_moves = position
            .pseudo_legal_moves()
            .into_iter()
            .filter(|&mv| position.leaves_own_king_safe(mv))
            .collect();
        position
    }

    fn leaves_own_king_safe(&self, mv: Move) -> bool {
        let color = mv.color().expect("non-null move has a color");
        let after = self.apply_unchecked(mv);
        !after.is_in_check(color)
    }

    fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for sq in 0u8..64 {
            let piece = self.squares[sq as usize];
            if piece.is_none() || piece.color != self.side_to_move {
                continue;
            }
            match piece.piece_type {
                Type::Pawn => self.pawn_moves_into(sq, &mut moves),
                Type::Knight => self.knight_moves_into(sq, &mut moves),
                Type::Bishop => self.bishop_moves_into(sq, &mut moves),
                Type::Rook => self.rook_moves_into(sq, &mut moves),
                Type::Queen => self.queen_moves_into(sq, &mut moves),
                Type::King => self.king_moves_into(sq, &mut moves),
                Type::None => {}
            }
        }
        self.generate_castle_moves(&mut moves);
        moves
    }

    fn generate_castle_moves(&self, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let layout = CastleLayout::for_color(color);

        if self.is_square_attacked(layout.king_from, color.opposite()) {
            return;
        }

        if self.castling.get(color, true)
            && layout.king_side_between.iter().all(|&sq| self.squares[sq as usize].is_none())
            && layout.king_side_path.iter().all(|&sq| !self.is_square_attacked(sq, color.opposite()))
        {
            moves.push(Move::Castle {
                kind: CastleSide::KingSide,
                color,
                king_from: layout.king_from,
                king_to: layout.king_side_king_to,
                rook_from: layout.king_side_rook,
                rook_to: layout.king_side_rook_to,
            });
        }

        if self.castling.get(color, false)
            && layout.queen_side_between.iter().all(|&sq| self.squares[sq as usize].is_none())
            && layout.queen_side_path.iter().all(|&sq| !self.is_square_attacked(sq, color.opposite()))
        {
            moves.push(Move::Castle {
                kind: CastleSide::QueenSide,
                color,
                king_from: layout.king_from,
                king_to: layout.queen_side_king_to,
                rook_from: layout.queen_side_rook,
                rook_to: layout.queen_side_rook_to,
            });
        }
    }

    /// Whether `square` is attacked by any piece of `by_color`.
    pub fn is_square_attacked(&self, square: u8, by_color: Color) -> bool {
        let sq_x = (square % 8) as i32;
        let sq_y = (square / 8) as i32;

        let pawn_dy = if by_color == Color::White { 1 } else { -1 };
        for dx in [-1, 1] {
            let (x, y) = (sq_x + dx, sq_y + pawn_dy);
            if (0..8).contains(&x) && (0..8).contains(&y) {
                let piece = self.squares[(y * 8 + x) as usize];
                if piece.piece_type == Type::Pawn && piece.color == by_color {
                    return true;
                }
            }
        }

        const KNIGHT_OFFSETS: [(i32, i32); 8] =
            [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
        for (dx, dy) in KNIGHT_OFFSETS {
            let (x, y) = (sq_x + dx, sq_y + dy);
            if (0..8).contains(&x) && (0..8).contains(&y) {
                let piece = self.squares[(y * 8 + x) as usize];
                if piece.piece_type == Type::Knight && piece.color == by_color {
                    return true;
                }
            }
        }

        const KING_OFFSETS: [(i32, i32); 8] =
            [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];
        for (dx, dy) in KING_OFFSETS {
            let (x, y) = (sq_x + dx, sq_y + dy);
            if (0..8).contains(&x) && (0..8).contains(&y) {
                let piece = self.squares[(y * 8 + x) as usize];
                if piece.piece_type == Type::King && piece.color == by_color {
                    return true;
                }
            }
        }

        const DIAGONAL_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        for (dx, dy) in DIAGONAL_DIRS {
            let (mut x, mut y) = (sq_x + dx, sq_y + dy);
            while (0..8).contains(&x) && (0..8).contains(&y) {
                let piece = self.squares[(y * 8 + x) as usize];
                if !piece.is_none() {
                    if piece.color == by_color && matches!(piece.piece_type, Type::Bishop | Type::Queen) {
                        return true;
                    }
                    break;
                }
                x += dx;
                y += dy;
            }
        }

        const ORTHOGONAL_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        for (dx, dy) in ORTHOGONAL_DIRS {
            let (mut x, mut y) = (sq_x + dx, sq_y + dy);
            while (0..8).contains(&x) && (0..8).contains(&y) {
                let piece = self.squares[(y * 8 + x) as usize];
                if !piece.is_none() {
                    if piece.color == by_color && matches!(piece.piece_type, Type::Rook | Type::Queen) {
                        return true;
                    }
                    break;
                }
                x += dx;
                y += dy;
            }
        }

        false
    }

    /// Node count at `depth`, for move-generator validation (perft).
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        if depth == 1 {
            return self.legal_moves.len() as u64;
        }
        self.legal_moves
            .iter()
            .map(|&mv| self.apply_unchecked(mv).perft(depth - 1))
            .sum()
    }
}

struct CastleLayout {
    king_from: u8,
    king_side_rook: u8,
    king_side_king_to: u8,
    king_side_rook_to: u8,
    king_side_between: &'static [u8],
    king_side_path: &'static [u8],
    queen_side_rook: u8,
    queen_side_king_to: u8,
    queen_side_rook_to: u8,
    queen_side_between: &'static [u8],
    queen_side_path: &'static [u8],
}

impl CastleLayout {
    fn for_color(color: Color) -> CastleLayout {
        match color {
            Color::White => CastleLayout {
                king_from: 60,
                king_side_rook: 63,
                king_side_king_to: 62,
                king_side_rook_to: 61,
                king_side_between: &[61, 62],
                king_side_path: &[61, 62],
                queen_side_rook: 56,
                queen_side_king_to: 58,
                queen_side_rook_to: 59,
                queen_side_between: &[57, 58, 59],
                queen_side_path: &[58, 59],
            },
            Color::Black => CastleLayout {
                king_from: 4,
                king_side_rook: 7,
                king_side_king_to: 6,
                king_side_rook_to: 5,
                king_side_between: &[5, 6],
                king_side_path: &[5, 6],
                queen_side_rook: 0,
                queen_side_king_to: 2,
                queen_side_rook_to: 3,
                queen_side_between: &[1, 2, 3],
                queen_side_path: &[2, 3],
            },
        }
    }
}

fn clear_rook_right(castling: &mut CastlingRights, hash: &mut u64, color: Color, square: u8) {
    let layout = CastleLayout::for_color(color);
    if square == layout.king_side_rook && castling.get(color, true) {
        *hash ^= ZOBRIST.castling_key(color, true);
        castling.clear(color, true);
    }
    if square == layout.queen_side_rook && castling.get(color, false) {
        *hash ^= ZOBRIST.castling_key(color, false);
        castling.clear(color, false);
    }
}

fn find_king(squares: &[Piece; 64], color: Color) -> Option<u8> {
    squares
        .iter()
        .position(|p| p.piece_type == Type::King && p.color == color)
        .map(|idx| idx as u8)
}

fn full_zobrist_hash(
    squares: &[Piece; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant_target: Option<u8>,
) -> u64 {
    let mut hash = 0u64;
    for (sq, piece) in squares.iter().enumerate() {
        if !piece.is_none() {
            hash ^= ZOBRIST.piece_key(piece.color, piece.piece_type, sq as u8);
        }
    }
    for (held, color, king_side) in [
        (castling.white_king_side, Color::White, true),
        (castling.white_queen_side, Color::White, false),
        (castling.black_king_side, Color::Black, true),
        (castling.black_queen_side, Color::Black, false),
    ] {
        if held {
            hash ^= ZOBRIST.castling_key(color, king_side);
        }
    }
    if let Some(sq) = en_passant_target {
        hash ^= ZOBRIST.en_passant_key(sq % 8);
    }
    if side_to_move == Color::Black {
        hash ^= ZOBRIST.side_to_move;
    }
    hash
}

/// File/rank algebraic notation for a square (a8=0 .. h1=63).
pub fn algebraic(square: u8) -> String {
    let file = (b'a' + square % 8) as char;
    let rank = 8 - square / 8;
    format!("{file}{rank}")
}

fn parse_algebraic(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    let file = file as u8 - b'a';
    let rank_from_top = 8 - (rank as u8 - b'0');
    Some(rank_from_top * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let pos = Position::starting_position();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn fen_round_trips() {
        let pos = Position::starting_position();
        assert_eq!(pos.to_fen(), STARTING_FEN);
    }

    #[test]
    fn algebraic_matches_corners() {
        assert_eq!(algebraic(0), "a8");
        assert_eq!(algebraic(63), "h1");
        assert_eq!(algebraic(parse_algebraic("e4").unwrap()), "e4");
    }

    #[test]
    fn white_double_step_sets_en_passant_target() {
        let pos = Position::starting_position();
        let mv = pos
            .legal_moves()
            .iter()
            .find(|m| matches!(m, Move::PawnDoubleStep { from, .. } if algebraic(*from) == "e2"))
            .copied()
            .unwrap();
        let after = pos.apply(mv).unwrap().position;
        assert_eq!(after.en_passant_target().map(algebraic), Some("e3".to_string()));
    }

    #[test]
    fn invalid_fen_is_rejected() {
        assert!(Position::from_fen("not a fen").is_err());
    }

    #[test]
    fn null_move_cannot_be_applied_through_apply() {
        let pos = Position::starting_position();
        let result = std::panic::catch_unwind(|| pos.apply(Move::NullMove));
        assert!(result.is_err());
    }

    #[test]
    fn incremental_hash_matches_full_recompute() {
        let pos = Position::starting_position();
        let mv = pos.legal_moves()[0];
        let after = pos.apply(mv).unwrap().position;
        let recomputed = full_zobrist_hash(
            after.squares(),
            after.side_to_move(),
            after.castling(),
            after.en_passant_target(),
        );
        assert_eq!(after.zobrist_hash(), recomputed);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut pos = Position::starting_position();
        for mv_str in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let from = parse_algebraic(&mv_str[0..2]).unwrap();
            let to = parse_algebraic(&mv_str[2..4]).unwrap();
            let mv = *pos
                .legal_moves()
                .iter()
                .find(|m| m.from_square() == Some(from) && m.to_square() == Some(to))
                .unwrap_or_else(|| panic!("{mv_str} not legal in {}", pos.to_fen()));
            let transition = pos.apply(mv).unwrap();
            pos = transition.position;
        }
        assert_eq!(pos.legal_moves().len(), 0);
        assert!(pos.is_in_check(Color::White));
    }

    #[test]
    fn perft_starting_position_depth_two() {
        let pos = Position::starting_position();
        assert_eq!(pos.perft(1), 20);
        assert_eq!(pos.perft(2), 400);
    }
}
