//! Static exchange evaluation: the net material gain of a capture once every
//! recapture on the destination square is played out.
//!
//! The donor has no SEE of any kind — its quiescence search orders captures
//! with plain MVV-LVA (`agent/ai/quiescence.rs::score_capture`) and never asks
//! whether a capture is actually safe. DESIGN.md records the resolved Open
//! Question: this is the standard "recompute attackers, swap off the least
//! valuable one each time" algorithm (Chess Programming Wiki's iterative SEE),
//! grounded stylistically on the donor's MVV-LVA ordering in spirit — same
//! idea of valuing a capture by what it nets, just carried all the way
//! through the exchange instead of stopping at the first pair.
//!
//! Pins are ignored, as in virtually every engine's SEE: an attacker pinned to
//! its own king is still treated as able to recapture. Getting this exactly
//! right would require full legality checking at every step of the swap,
//! which defeats the point of SEE being cheap.

use crate::game_repr::{Color, Move, Piece, Position, Type};

/// Net material swing of `mv`, in centipawns, from the mover's perspective.
/// Zero for non-captures (quiet moves have nothing to swap off).
pub fn see(position: &Position, mv: Move) -> i32 {
    if !mv.is_capture() {
        return 0;
    }
    let (Some(from), Some(to), Some(mover_color)) = (mv.from_square(), mv.to_square(), mv.color()) else {
        return 0;
    };

    let mut board = *position.squares();
    let mut gain = [0i32; 32];
    let mut depth = 0usize;

    let initial_victim = board[to as usize];
    gain[0] = initial_victim.piece_type.see_value();

    let mut occupying = board[from as usize];
    board[from as usize] = Piece::none();
    board[to as usize] = occupying;

    let mut side = mover_color.opposite();
    loop {
        let Some((attacker_square, attacker_piece)) = least_valuable_attacker(&board, to, side) else {
            break;
        };
        depth += 1;
        if depth >= gain.len() {
            break;
        }
        gain[depth] = occupying.piece_type.see_value() - gain[depth - 1];

        // Standard early-out: once the running best-case for the side to move
        // at this ply can't beat what's already banked, the rest of the
        // exchange can't change the minimax result.
        if gain[depth].max(-gain[depth - 1]) < 0 {
            break;
        }

        board[attacker_square as usize] = Piece::none();
        board[to as usize] = attacker_piece;
        occupying = attacker_piece;
        side = side.opposite();
    }

    while depth > 0 {
        gain[depth - 1] = -((-gain[depth - 1]).max(gain[depth]));
        depth -= 1;
    }
    gain[0]
}

/// True iff some piece of `defender_color` attacks `square` — i.e. whether a
/// capture landing there could be recaptured by that color. Used by move
/// ordering to prioritize captures of undefended ("hanging") pieces ahead of
/// a full SEE pass.
pub fn is_piece_defended(position: &Position, square: u8, defender_color: Color) -> bool {
    position.is_square_attacked(square, defender_color)
}

fn least_valuable_attacker(board: &[Piece; 64], square: u8, attacker_color: Color) -> Option<(u8, Piece)> {
    let file = (square % 8) as i32;
    let rank = (square / 8) as i32;

    // Pawns: attack diagonally toward `square` from the rank behind it
    // relative to the attacker's own forward direction.
    let pawn_forward = attacker_color.forward();
    let pawn_rank = rank - pawn_forward / 8;
    for df in [-1, 1] {
        let pf = file + df;
        if (0..8).contains(&pf) && (0..8).contains(&pawn_rank) {
            let sq = (pawn_rank * 8 + pf) as u8;
            let piece = board[sq as usize];
            if piece.piece_type == Type::Pawn && piece.color == attacker_color {
                return Some((sq, piece));
            }
        }
    }

    const KNIGHT_STEPS: [(i32, i32); 8] =
        [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
    for &(df, dr) in &KNIGHT_STEPS {
        let (nf, nr) = (file + df, rank + dr);
        if (0..8).contains(&nf) && (0..8).contains(&nr) {
            let sq = (nr * 8 + nf) as u8;
            let piece = board[sq as usize];
            if piece.piece_type == Type::Knight && piece.color == attacker_color {
                return Some((sq, piece));
            }
        }
    }

    // Bishops/diagonal-queens and rooks/orthogonal-queens are scanned
    // independently, then compared by value: a diagonal queen must not be
    // returned ahead of a cheaper orthogonal rook just because the diagonal
    // scan runs first.
    const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    let diagonal = sliding_attacker(board, file, rank, &BISHOP_DIRS, attacker_color, &[Type::Bishop, Type::Queen]);
    let orthogonal = sliding_attacker(board, file, rank, &ROOK_DIRS, attacker_color, &[Type::Rook, Type::Queen]);
    match (diagonal, orthogonal) {
        (Some(d), Some(o)) => {
            return Some(if d.1.piece_type.see_value() <= o.1.piece_type.see_value() { d } else { o });
        }
        (Some(d), None) => return Some(d),
        (None, Some(o)) => return Some(o),
        (None, None) => {}
    }

    const KING_STEPS: [(i32, i32); 8] =
        [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
    for &(df, dr) in &KING_STEPS {
        let (nf, nr) = (file + df, rank + dr);
        if (0..8).contains(&nf) && (0..8).contains(&nr) {
            let sq = (nr * 8 + nf) as u8;
            let piece = board[sq as usize];
            if piece.piece_type == Type::King && piece.color == attacker_color {
                return Some((sq, piece));
            }
        }
    }

    None
}

/// Nearest sliding attacker of one of `kinds` along `dirs`, stopping at the
/// first occupied square in each direction (it blocks anything further out).
fn sliding_attacker(
    board: &[Piece; 64],
    file: i32,
    rank: i32,
    dirs: &[(i32, i32)],
    attacker_color: Color,
    kinds: &[Type],
) -> Option<(u8, Piece)> {
    for &(df, dr) in dirs {
        let mut f = file + df;
        let mut r = rank + dr;
        while (0..8).contains(&f) && (0..8).contains(&r) {
            let sq = (r * 8 + f) as u8;
            let piece = board[sq as usize];
            if !piece.is_none() {
                if piece.color == attacker_color && kinds.contains(&piece.piece_type) {
                    return Some((sq, piece));
                }
                break;
            }
            f += df;
            r += dr;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Position;

    #[test]
    fn undefended_capture_gains_full_victim_value() {
        // White rook takes an undefended black knight sitting on the a-file.
        let pos = Position::from_fen("4k3/8/8/n7/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = pos
            .legal_moves()
            .iter()
            .copied()
            .find(|m| m.from_square() == Some(56) && m.to_square() == Some(24))
            .expect("Ra1xa5 should be legal");
        assert_eq!(see(&pos, mv), Type::Knight.see_value());
    }

    #[test]
    fn losing_capture_has_negative_see() {
        // White queen captures a pawn that's defended by a rook on the same file.
        let pos = Position::from_fen("3rk3/8/8/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        let mv = pos
            .legal_moves()
            .iter()
            .copied()
            .find(|m| m.is_capture() && m.to_square() == Some(27))
            .expect("Qxd5 should be legal");
        assert!(see(&pos, mv) < 0);
    }

    #[test]
    fn non_capture_has_zero_see() {
        let pos = Position::starting_position();
        let mv = pos.legal_moves()[0];
        if !mv.is_capture() {
            assert_eq!(see(&pos, mv), 0);
        }
    }
}
