// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use chess_room::board::{Board, Cell, Tone};
use chess_room::coord::SquareIdx;
use chess_room::piece::PieceRef;


#[allow(dead_code)]
pub fn sq(idx: u8) -> SquareIdx { SquareIdx::from_zero_based(idx) }

// Empty board with the given pieces placed; tones follow the regular checkered layout.
#[allow(dead_code)]
pub fn board_with(pieces: &[(u8, &str)]) -> Board {
    let mut board = Board::empty();
    for &(idx, piece) in pieces {
        let tone = board[sq(idx)].tone;
        board.overwrite(sq(idx), Cell::new(tone, Some(PieceRef::new(piece))));
    }
    board
}

#[allow(dead_code)]
pub fn piece_at(board: &Board, idx: u8) -> Option<&str> {
    board[sq(idx)].piece.as_ref().map(PieceRef::as_str)
}

#[allow(dead_code)]
pub fn tone_at(board: &Board, idx: u8) -> Tone { board[sq(idx)].tone }
