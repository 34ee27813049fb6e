use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;


pub const PIECE_IMAGE_BASE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum Force {
    White,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// Opaque piece identifier as sent by the server: an image path relative to
// `PIECE_IMAGE_BASE_URL`. The client never interprets it beyond rendering.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceRef(String);

impl PieceRef {
    pub fn new(path: impl Into<String>) -> Self { Self(path.into()) }

    // The server sends an empty string for an empty square.
    pub fn from_wire(path: Option<String>) -> Option<Self> {
        path.filter(|p| !p.is_empty()).map(Self)
    }

    pub fn standard(kind: PieceKind, force: Force) -> Self {
        Self::new(standard_piece_path(kind, force))
    }

    pub fn as_str(&self) -> &str { &self.0 }
    pub fn image_url(&self) -> String { format!("{PIECE_IMAGE_BASE_URL}{}", self.0) }
}

impl fmt::Debug for PieceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "PieceRef({})", self.0) }
}

impl fmt::Display for PieceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

pub fn standard_piece_path(kind: PieceKind, force: Force) -> &'static str {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, kind) {
        (White, Pawn) => "4/45/Chess_plt45.svg",
        (White, Knight) => "7/70/Chess_nlt45.svg",
        (White, Bishop) => "b/b1/Chess_blt45.svg",
        (White, Rook) => "7/72/Chess_rlt45.svg",
        (White, Queen) => "1/15/Chess_qlt45.svg",
        (White, King) => "4/42/Chess_klt45.svg",
        (Black, Pawn) => "c/c7/Chess_pdt45.svg",
        (Black, Knight) => "e/ef/Chess_ndt45.svg",
        (Black, Bishop) => "9/98/Chess_bdt45.svg",
        (Black, Rook) => "f/ff/Chess_rdt45.svg",
        (Black, Queen) => "4/47/Chess_qdt45.svg",
        (Black, King) => "f/f0/Chess_kdt45.svg",
    }
}
