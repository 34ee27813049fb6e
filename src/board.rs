use std::ops;

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::coord::{NUM_COLS, NUM_SQUARES, SquareIdx};
use crate::piece::{Force, PieceKind, PieceRef};


const_assert_eq!(NUM_SQUARES, 64);

// Background palette. String forms are the server color tags; the CSS class is `bg-<tag>`.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, AsRefStr, Display,
    Serialize, Deserialize,
)]
pub enum Tone {
    #[strum(serialize = "white/35")]
    #[serde(rename = "white/35")]
    Light,
    #[strum(serialize = "white/15")]
    #[serde(rename = "white/15")]
    Dark,
    // Drop target under the cursor while dragging.
    #[strum(serialize = "black")]
    #[serde(rename = "black")]
    Highlight,
}

impl Tone {
    pub fn for_square(idx: SquareIdx) -> Self {
        if (idx.row() + idx.col()) % 2 == 0 { Tone::Light } else { Tone::Dark }
    }
    pub fn css_class(self) -> String { format!("bg-{}", self.as_ref()) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    pub tone: Tone,
    pub piece: Option<PieceRef>,
}

impl Cell {
    pub fn new(tone: Tone, piece: Option<PieceRef>) -> Self { Self { tone, piece } }
    pub fn empty(tone: Tone) -> Self { Self { tone, piece: None } }

    // Empty cells cannot be picked up. They can still be dropped onto.
    pub fn is_unswappable(&self) -> bool { self.piece.is_none() }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: std::array::from_fn(|i| {
                Cell::empty(Tone::for_square(SquareIdx::from_zero_based(i as u8)))
            }),
        }
    }

    pub fn from_cells(cells: [Cell; NUM_SQUARES]) -> Self { Self { cells } }

    pub fn starting_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; NUM_COLS as usize] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for col in 0..NUM_COLS {
            let back_kind = BACK_RANK[col as usize];
            for (row, kind, force) in [
                (0, back_kind, Force::White),
                (1, Pawn, Force::White),
                (6, Pawn, Force::Black),
                (7, back_kind, Force::Black),
            ] {
                board[SquareIdx::from_row_col(row, col)].piece = Some(PieceRef::standard(kind, force));
            }
        }
        board
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = (SquareIdx, &Cell)> {
        self.cells.iter().enumerate().map(|(i, cell)| (SquareIdx::from_zero_based(i as u8), cell))
    }

    // Tones are exchanged first and then the cells trade positions, so the tones end up where
    // they started and only the contents move. Swapping a square with itself does nothing.
    pub fn swap(&mut self, a: SquareIdx, b: SquareIdx) {
        if a == b {
            return;
        }
        let (ta, tb) = (self[a].tone, self[b].tone);
        self[a].tone = tb;
        self[b].tone = ta;
        self.cells.swap(a.to_usize(), b.to_usize());
    }

    pub fn overwrite(&mut self, idx: SquareIdx, cell: Cell) { self[idx] = cell; }
}

impl ops::Index<SquareIdx> for Board {
    type Output = Cell;
    fn index(&self, idx: SquareIdx) -> &Self::Output { &self.cells[idx.to_usize()] }
}

impl ops::IndexMut<SquareIdx> for Board {
    fn index_mut(&mut self, idx: SquareIdx) -> &mut Self::Output {
        &mut self.cells[idx.to_usize()]
    }
}
