/// Piece kind, independent of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    None,
}

impl Type {
    /// Base material value in centipawns, per §3 of the position model.
    pub fn base_value(&self) -> i32 {
        match self {
            Type::Pawn => 100,
            Type::Knight => 300,
            Type::Bishop => 300,
            Type::Rook => 500,
            Type::Queen => 900,
            Type::King => 10000,
            Type::None => 0,
        }
    }

    /// Integer SEE value {P:1, N:3, B:3, R:5, Q:9}, king treated as infinite.
    pub fn see_value(&self) -> i32 {
        match self {
            Type::Pawn => 1,
            Type::Knight => 3,
            Type::Bishop => 3,
            Type::Rook => 5,
            Type::Queen => 9,
            Type::King => i32::MAX,
            Type::None => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Forward step in square index: WHITE advances toward rank 8 (square 0..7),
    /// so its forward direction is -8; BLACK advances toward rank 1, +8.
    pub fn forward(&self) -> i32 {
        match self {
            Color::White => -8,
            Color::Black => 8,
        }
    }

    /// Promotion rank: the rank a pawn of this color promotes on.
    /// WHITE promotes on rank 8 (squares 0..7), BLACK on rank 1 (squares 56..63).
    pub fn promotion_rank_start(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 56,
        }
    }

    /// Starting rank (second rank from the back) for a double pawn push.
    pub fn pawn_start_rank_start(&self) -> usize {
        match self {
            Color::White => 48,
            Color::Black => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: Type,
}

impl Default for Piece {
    fn default() -> Self {
        Self {
            color: Color::White,
            piece_type: Type::None,
        }
    }
}

impl Piece {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.piece_type == Type::None
    }

    pub fn from_char(c: char) -> Self {
        match c {
            'p' => Self { color: Color::Black, piece_type: Type::Pawn },
            'n' => Self { color: Color::Black, piece_type: Type::Knight },
            'b' => Self { color: Color::Black, piece_type: Type::Bishop },
            'r' => Self { color: Color::Black, piece_type: Type::Rook },
            'q' => Self { color: Color::Black, piece_type: Type::Queen },
            'k' => Self { color: Color::Black, piece_type: Type::King },
            'P' => Self { color: Color::White, piece_type: Type::Pawn },
            'N' => Self { color: Color::White, piece_type: Type::Knight },
            'B' => Self { color: Color::White, piece_type: Type::Bishop },
            'R' => Self { color: Color::White, piece_type: Type::Rook },
            'Q' => Self { color: Color::White, piece_type: Type::Queen },
            'K' => Self { color: Color::White, piece_type: Type::King },
            _ => panic!("invalid FEN piece character: {c}"),
        }
    }

    pub fn to_char(&self) -> char {
        let c = match self.piece_type {
            Type::King => 'k',
            Type::Queen => 'q',
            Type::Rook => 'r',
            Type::Bishop => 'b',
            Type::Knight => 'n',
            Type::Pawn => 'p',
            Type::None => return ' ',
        };
        if self.color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is(&self, color: Color) -> bool {
        self.color == color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color_round_trips() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite().opposite(), Color::Black);
    }

    #[test]
    fn from_char_roundtrips_to_char() {
        for c in ['p', 'n', 'b', 'r', 'q', 'k', 'P', 'N', 'B', 'R', 'Q', 'K'] {
            assert_eq!(Piece::from_char(c).to_char(), c);
        }
    }

    #[test]
    fn base_values_match_spec() {
        assert_eq!(Type::Pawn.base_value(), 100);
        assert_eq!(Type::Knight.base_value(), 300);
        assert_eq!(Type::Bishop.base_value(), 300);
        assert_eq!(Type::Rook.base_value(), 500);
        assert_eq!(Type::Queen.base_value(), 900);
        assert_eq!(Type::King.base_value(), 10000);
    }
}
