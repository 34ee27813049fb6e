// Helpers shared by unit and integration tests.

use std::sync::mpsc;

use itertools::Itertools;
use serde_json::json;

use crate::board::{Board, Tone};
use crate::client::BoardSyncAgent;
use crate::event::{ClientEvent, WireSquare};


pub fn new_agent(board: Board) -> (BoardSyncAgent, mpsc::Receiver<ClientEvent>) {
    let (tx, rx) = mpsc::channel();
    (BoardSyncAgent::new(board, tx), rx)
}

pub fn drain_outgoing(rx: &mpsc::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    rx.try_iter().collect_vec()
}

pub fn move_frame(src: u8, dst: u8) -> String {
    json!({"author": "opponent", "content": {"type": "move", "src": src, "dst": dst}}).to_string()
}

pub fn capture_frame(src: u8, dst: u8) -> String {
    json!({
        "author": "opponent",
        "content": {"type": "move", "src": src.to_string(), "dst": dst.to_string(), "taken": "true"}
    })
    .to_string()
}

pub fn take_ack_frame(src: u8, dst: u8) -> String {
    json!({
        "author": "me",
        "content": {"type": "take-ack", "src": src.to_string(), "dst": dst.to_string()}
    })
    .to_string()
}

pub fn castle_frame(k_src: u8, r_src: u8, k_dst: u8, r_dst: u8) -> String {
    json!({
        "author": "me",
        "content": {
            "type": "castle",
            "k_src": k_src.to_string(),
            "r_src": r_src.to_string(),
            "k_dst": k_dst.to_string(),
            "r_dst": r_dst.to_string(),
        }
    })
    .to_string()
}

// Mirrors the server, which sends every value in `content` as a string and uses "" for no piece.
pub fn correction_frame(
    src: u8, src_piece: Option<&str>, src_color: Tone, dst: u8, dst_piece: Option<&str>,
    dst_color: Tone,
) -> String {
    json!({
        "author": "me",
        "content": {
            "type": "error",
            "msg": "not your turn",
            "src": src.to_string(),
            "src_piece": src_piece.unwrap_or(""),
            "src_color": src_color,
            "dst": dst.to_string(),
            "dst_piece": dst_piece.unwrap_or(""),
            "dst_color": dst_color,
        }
    })
    .to_string()
}

pub fn cmd_frame(author: &str, msg: &str) -> String {
    json!({"author": author, "content": {"type": "cmd", "msg": msg}}).to_string()
}

pub fn reset_ack_frame(author: &str, board: &Board) -> String {
    let squares = board
        .cells()
        .map(|(_, cell)| WireSquare {
            color: cell.tone,
            piece: Some(cell.piece.as_ref().map(|p| p.as_str().to_owned()).unwrap_or_default()),
        })
        .collect_vec();
    let board_json = json!(squares).to_string();
    json!({
        "author": author,
        "content": {"type": "cmd", "msg": "reset-ack", "board": board_json}
    })
    .to_string()
}
