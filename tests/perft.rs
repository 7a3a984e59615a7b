//! Standard perft fixtures (the chess-programming-wiki "Position 1-6" set),
//! grounded on the donor's `game_repr/tests/perft/*.rs`. Square indexing
//! changed entirely when the donor's model was reindexed to the a8=0
//! convention, but perft only counts legal-move counts reachable from a FEN,
//! a property that's convention-independent; the expected counts below are
//! the same well-known values the donor checked against.

use chess_core::game_repr::Position;

fn perft_position(fen: &str) -> Position {
    Position::from_fen(fen).expect("fixture FEN should parse")
}

#[test]
fn starting_position_perft() {
    let pos = Position::starting_position();
    assert_eq!(pos.perft(1), 20);
    assert_eq!(pos.perft(2), 400);
    assert_eq!(pos.perft(3), 8902);
    assert_eq!(pos.perft(4), 197_281);
}

#[test]
fn kiwipete_perft() {
    // Position 2: castling, en passant, promotions all reachable quickly.
    let pos = perft_position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(pos.perft(1), 48);
    assert_eq!(pos.perft(2), 2039);
    assert_eq!(pos.perft(3), 97_862);
}

#[test]
fn endgame_en_passant_and_promotion_perft() {
    // Position 3.
    let pos = perft_position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    assert_eq!(pos.perft(1), 14);
    assert_eq!(pos.perft(2), 191);
    assert_eq!(pos.perft(3), 2812);
    assert_eq!(pos.perft(4), 43_238);
}

#[test]
fn complex_promotions_perft() {
    // Position 4: promotion captures and underpromotion.
    let pos = perft_position("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(pos.perft(1), 6);
    assert_eq!(pos.perft(2), 264);
    assert_eq!(pos.perft(3), 9467);
}

#[test]
fn middle_game_promotion_perft() {
    // Position 5.
    let pos = perft_position("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(pos.perft(1), 44);
    assert_eq!(pos.perft(2), 1486);
    assert_eq!(pos.perft(3), 62_379);
}

#[test]
fn symmetrical_middle_game_perft() {
    // Position 6.
    let pos = perft_position("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10");
    assert_eq!(pos.perft(1), 46);
    assert_eq!(pos.perft(2), 2079);
    assert_eq!(pos.perft(3), 89_890);
}
