#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod chat;
pub mod client;
pub mod coord;
pub mod dirty;
pub mod display;
pub mod event;
pub mod lobby;
pub mod network;
pub mod piece;
pub mod test_util;

pub use board::{Board, Cell, Tone};
pub use client::{
    BoardSyncAgent, EventError, MoveIntent, NotableEvent, ServerCorrection, SwapError, SyncState,
};
pub use coord::SquareIdx;
pub use event::{ClientEvent, ServerEvent, ServerMessage};
pub use piece::PieceRef;
