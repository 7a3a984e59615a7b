use super::{Color, Type};
use std::sync::LazyLock;

/// Zobrist hashing keys for chess positions.
///
/// Random 64-bit numbers represent each possible piece-square combination,
/// side to move, castling right, and en-passant file, so a position's
/// fingerprint is the XOR of the keys for its actual features. A fixed seed
/// makes the table — and therefore every hash — reproducible across
/// processes.
pub struct ZobristKeys {
    /// `[color][kind][square]`
    pub pieces: [[[u64; 64]; 6]; 2],
    /// `[W king-side, W queen-side, B king-side, B queen-side]`
    pub castling_rights: [u64; 4],
    /// `[file]`, 0..8
    pub en_passant_file: [u64; 8],
    pub side_to_move: u64,
}

impl ZobristKeys {
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x517cc1b727220a95);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in &mut pieces {
            for kind in color {
                for square in kind {
                    *square = rng.gen();
                }
            }
        }

        let mut castling_rights = [0u64; 4];
        for key in &mut castling_rights {
            *key = rng.gen();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.gen();
        }

        Self { pieces, castling_rights, en_passant_file, side_to_move: rng.gen() }
    }

    #[inline]
    pub fn piece_index(kind: Type) -> usize {
        match kind {
            Type::Pawn => 0,
            Type::Knight => 1,
            Type::Bishop => 2,
            Type::Rook => 3,
            Type::Queen => 4,
            Type::King => 5,
            Type::None => panic!("cannot hash Type::None"),
        }
    }

    #[inline]
    fn color_index(color: Color) -> usize {
        match color {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub fn piece_key(&self, color: Color, kind: Type, square: u8) -> u64 {
        self.pieces[Self::color_index(color)][Self::piece_index(kind)][square as usize]
    }

    /// Index into `castling_rights`: 0 = W king-side, 1 = W queen-side,
    /// 2 = B king-side, 3 = B queen-side.
    #[inline]
    pub fn castling_key(&self, color: Color, king_side: bool) -> u64 {
        let base = if color == Color::White { 0 } else { 2 };
        self.castling_rights[base + if king_side { 0 } else { 1 }]
    }

    #[inline]
    pub fn en_passant_key(&self, file: u8) -> u64 {
        self.en_passant_file[file as usize]
    }
}

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::generate);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_instances() {
        let a = ZobristKeys::generate();
        let b = ZobristKeys::generate();
        assert_eq!(a.pieces, b.pieces);
        assert_eq!(a.castling_rights, b.castling_rights);
        assert_eq!(a.en_passant_file, b.en_passant_file);
        assert_eq!(a.side_to_move, b.side_to_move);
    }

    #[test]
    fn piece_keys_are_distinct_per_square() {
        let keys = ZobristKeys::generate();
        assert_ne!(
            keys.piece_key(Color::White, Type::Pawn, 8),
            keys.piece_key(Color::White, Type::Pawn, 9)
        );
    }

    #[test]
    fn global_table_is_shared_and_nonzero() {
        assert_ne!(ZOBRIST.side_to_move, 0);
    }
}
