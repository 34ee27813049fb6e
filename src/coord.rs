use std::fmt;

use serde::{Deserialize, Serialize};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;
pub const NUM_SQUARES: usize = NUM_ROWS as usize * NUM_COLS as usize;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IndexOutOfRange(pub i64);

// Board square in row-major order: 0 is the top-left square as rendered, 63 the bottom-right.
//
// This is also the order of the board container children in the DOM.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SquareIdx {
    idx: u8, // 0-based
}

impl SquareIdx {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!((idx as usize) < NUM_SQUARES);
        Self { idx }
    }
    pub fn new(idx: i64) -> Result<Self, IndexOutOfRange> {
        match u8::try_from(idx) {
            Ok(v) if (v as usize) < NUM_SQUARES => Ok(Self { idx: v }),
            _ => Err(IndexOutOfRange(idx)),
        }
    }
    pub const fn from_row_col(row: u8, col: u8) -> Self {
        assert!(row < NUM_ROWS && col < NUM_COLS);
        Self::from_zero_based(row * NUM_COLS + col)
    }

    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_usize(self) -> usize { self.idx as usize }
    pub const fn row(self) -> u8 { self.idx / NUM_COLS }
    pub const fn col(self) -> u8 { self.idx % NUM_COLS }

    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_SQUARES as u8).map(Self::from_zero_based)
    }
}

impl TryFrom<i64> for SquareIdx {
    type Error = IndexOutOfRange;
    fn try_from(idx: i64) -> Result<Self, Self::Error> { Self::new(idx) }
}

impl From<SquareIdx> for i64 {
    fn from(idx: SquareIdx) -> Self { idx.idx.into() }
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "square index {} is not in 0..{}", self.0, NUM_SQUARES)
    }
}

impl fmt::Debug for SquareIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SquareIdx({})", self.idx)
    }
}

impl fmt::Display for SquareIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.idx) }
}
