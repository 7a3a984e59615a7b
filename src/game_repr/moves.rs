use super::{Color, Piece, Type};

/// Which side a castle move is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// The non-promoting half of a promoting pawn move: a promotion always wraps
/// either a straight push onto the promotion rank or a diagonal capture onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionBase {
    Push { from: u8, to: u8 },
    Capture { from: u8, to: u8, captured: Piece },
}

/// A chess move, as a tagged variant rather than a class hierarchy: each kind
/// carries exactly the data `apply` needs, and dispatch is a `match`, not
/// virtual calls.
///
/// Equality is (from, to, moved piece), extended by captured piece for
/// captures and by rook endpoints for castles — two `Move`s are the same
/// move iff they'd produce the same transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    QuietMove { piece: Piece, from: u8, to: u8 },
    CaptureMove { piece: Piece, from: u8, to: u8, captured: Piece },
    PawnPush { piece: Piece, from: u8, to: u8 },
    PawnCapture { piece: Piece, from: u8, to: u8, captured: Piece },
    PawnDoubleStep { piece: Piece, from: u8, to: u8 },
    EnPassantCapture { piece: Piece, from: u8, to: u8, captured_square: u8 },
    Castle {
        kind: CastleSide,
        color: Color,
        king_from: u8,
        king_to: u8,
        rook_from: u8,
        rook_to: u8,
    },
    /// Wraps a pawn push/capture landing on the promotion rank. The core
    /// fixes `promoted_kind = QUEEN`; under-promotion is an open question
    /// left undone (see DESIGN.md).
    Promotion { base: PromotionBase, color: Color, promoted_kind: Type },
    /// Sentinel for "no parent move" (the root position). Never executable;
    /// null-move pruning itself flips side-to-move procedurally in the search
    /// without ever constructing this variant, keeping the two roles distinct.
    NullMove,
}

impl Move {
    pub fn from_square(&self) -> Option<u8> {
        match self {
            Move::QuietMove { from, .. }
            | Move::CaptureMove { from, .. }
            | Move::PawnPush { from, .. }
            | Move::PawnCapture { from, .. }
            | Move::PawnDoubleStep { from, .. }
            | Move::EnPassantCapture { from, .. } => Some(*from),
            Move::Castle { king_from, .. } => Some(*king_from),
            Move::Promotion { base, .. } => Some(match base {
                PromotionBase::Push { from, .. } => *from,
                PromotionBase::Capture { from, .. } => *from,
            }),
            Move::NullMove => None,
        }
    }

    pub fn to_square(&self) -> Option<u8> {
        match self {
            Move::QuietMove { to, .. }
            | Move::CaptureMove { to, .. }
            | Move::PawnPush { to, .. }
            | Move::PawnCapture { to, .. }
            | Move::PawnDoubleStep { to, .. }
            | Move::EnPassantCapture { to, .. } => Some(*to),
            Move::Castle { king_to, .. } => Some(*king_to),
            Move::Promotion { base, .. } => Some(match base {
                PromotionBase::Push { to, .. } => *to,
                PromotionBase::Capture { to, .. } => *to,
            }),
            Move::NullMove => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Move::QuietMove { piece, .. }
            | Move::CaptureMove { piece, .. }
            | Move::PawnPush { piece, .. }
            | Move::PawnCapture { piece, .. }
            | Move::PawnDoubleStep { piece, .. }
            | Move::EnPassantCapture { piece, .. } => Some(piece.color),
            Move::Castle { color, .. } => Some(*color),
            Move::Promotion { color, .. } => Some(*color),
            Move::NullMove => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(
            self,
            Move::CaptureMove { .. } | Move::PawnCapture { .. } | Move::EnPassantCapture { .. }
        ) || matches!(self, Move::Promotion { base: PromotionBase::Capture { .. }, .. })
    }

    pub fn captured_piece(&self, color: Color) -> Option<Piece> {
        match self {
            Move::CaptureMove { captured, .. } | Move::PawnCapture { captured, .. } => Some(*captured),
            Move::EnPassantCapture { .. } => Some(Piece { color: color.opposite(), piece_type: Type::Pawn }),
            Move::Promotion { base: PromotionBase::Capture { captured, .. }, .. } => Some(*captured),
            _ => None,
        }
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    pub fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Move::NullMove)
    }

    /// The piece kind doing the moving (the pawn for promotions, the king for castles).
    pub fn moving_kind(&self) -> Option<Type> {
        match self {
            Move::QuietMove { piece, .. }
            | Move::CaptureMove { piece, .. }
            | Move::PawnPush { piece, .. }
            | Move::PawnCapture { piece, .. }
            | Move::PawnDoubleStep { piece, .. }
            | Move::EnPassantCapture { piece, .. } => Some(piece.piece_type),
            Move::Castle { .. } => Some(Type::King),
            Move::Promotion { .. } => Some(Type::Pawn),
            Move::NullMove => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_move_reports_endpoints() {
        let mv = Move::QuietMove { piece: Piece { color: Color::White, piece_type: Type::Knight }, from: 1, to: 18 };
        assert_eq!(mv.from_square(), Some(1));
        assert_eq!(mv.to_square(), Some(18));
        assert!(!mv.is_capture());
    }

    #[test]
    fn capture_reports_captured_piece() {
        let captured = Piece { color: Color::Black, piece_type: Type::Queen };
        let mv = Move::CaptureMove {
            piece: Piece { color: Color::White, piece_type: Type::Rook },
            from: 0,
            to: 8,
            captured,
        };
        assert!(mv.is_capture());
        assert_eq!(mv.captured_piece(Color::White), Some(captured));
    }

    #[test]
    fn en_passant_captured_piece_is_opposite_color_pawn() {
        let mv = Move::EnPassantCapture {
            piece: Piece { color: Color::White, piece_type: Type::Pawn },
            from: 27,
            to: 19,
            captured_square: 26,
        };
        assert_eq!(mv.captured_piece(Color::White), Some(Piece { color: Color::Black, piece_type: Type::Pawn }));
    }

    #[test]
    fn null_move_has_no_endpoints() {
        assert_eq!(Move::NullMove.from_square(), None);
        assert_eq!(Move::NullMove.to_square(), None);
        assert!(Move::NullMove.is_null());
    }

    #[test]
    fn promotion_wraps_push_or_capture() {
        let push = Move::Promotion {
            base: PromotionBase::Push { from: 8, to: 0 },
            color: Color::White,
            promoted_kind: Type::Queen,
        };
        assert!(push.is_promotion());
        assert!(!push.is_capture());

        let capture = Move::Promotion {
            base: PromotionBase::Capture { from: 8, to: 1, captured: Piece { color: Color::Black, piece_type: Type::Rook } },
            color: Color::White,
            promoted_kind: Type::Queen,
        };
        assert!(capture.is_capture());
    }
}
