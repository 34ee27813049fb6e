// Wire format of the chess room socket. All frames are JSON text.
//
// Inbound frames are wrapped as `{"author": ..., "content": {"type": ..., ...}}`. The server
// stringifies every value in `content`, so integer fields are accepted both as numbers and as
// decimal strings.

use serde::{Deserialize, Deserializer, Serialize};

use crate::board::Tone;
use crate::coord::SquareIdx;


#[derive(Clone, Debug, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub author: Option<String>,
    pub content: ServerEvent,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerCommand {
    Connected,
    Acknowledge,
    Disconnected,
    ResetReq,
    ResetAck,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    // Opponent's committed move. With `taken` the piece on `dst` was captured and `src` ends up
    // empty rather than holding it.
    Move {
        #[serde(deserialize_with = "wire_square")]
        src: SquareIdx,
        #[serde(deserialize_with = "wire_square")]
        dst: SquareIdx,
        #[serde(default, deserialize_with = "wire_bool")]
        taken: bool,
    },
    // A rejected move carries the authoritative contents of both squares. Other errors (e.g. a
    // denied reset) carry only the message.
    Error {
        msg: String,
        #[serde(default, deserialize_with = "wire_square_opt")]
        src: Option<SquareIdx>,
        #[serde(default)]
        src_piece: Option<String>,
        #[serde(default)]
        src_color: Option<Tone>,
        #[serde(default, deserialize_with = "wire_square_opt")]
        dst: Option<SquareIdx>,
        #[serde(default)]
        dst_piece: Option<String>,
        #[serde(default)]
        dst_color: Option<Tone>,
    },
    Cmd {
        msg: ServerCommand,
        // JSON-encoded `Vec<WireSquare>`; only with `reset-ack`.
        #[serde(default)]
        board: Option<String>,
    },
    // Our own capture went through.
    TakeAck {
        #[serde(deserialize_with = "wire_square")]
        src: SquareIdx,
        #[serde(deserialize_with = "wire_square")]
        dst: SquareIdx,
    },
    Castle {
        #[serde(deserialize_with = "wire_square")]
        k_src: SquareIdx,
        #[serde(deserialize_with = "wire_square")]
        r_src: SquareIdx,
        #[serde(deserialize_with = "wire_square")]
        k_dst: SquareIdx,
        #[serde(deserialize_with = "wire_square")]
        r_dst: SquareIdx,
    },
    Checkmate {
        color: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WireSquare {
    pub color: Tone,
    #[serde(default)]
    pub piece: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientCommand {
    Acknowledge,
    ResetReq,
    ResetAck,
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    Move { from: SquareIdx, to: SquareIdx },
    Cmd { msg: ClientCommand },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireInt {
    Number(i64),
    Text(String),
}

fn wire_square<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SquareIdx, D::Error> {
    use serde::de::Error;
    let value = match WireInt::deserialize(deserializer)? {
        WireInt::Number(v) => v,
        WireInt::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected square index, got \"{s}\"")))?,
    };
    SquareIdx::new(value).map_err(D::Error::custom)
}

fn wire_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    use serde::de::Error;
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireBool {
        Bool(bool),
        Text(String),
    }
    match WireBool::deserialize(deserializer)? {
        WireBool::Bool(v) => Ok(v),
        WireBool::Text(s) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(D::Error::custom(format!("expected boolean, got \"{s}\""))),
        },
    }
}

fn wire_square_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SquareIdx>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "wire_square")] SquareIdx);
    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(idx)| idx))
}


#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn sq(idx: u8) -> SquareIdx { SquareIdx::from_zero_based(idx) }

    #[test]
    fn outgoing_move_shape() {
        let event = ClientEvent::Move { from: sq(12), to: sq(28) };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, serde_json::json!({"from": 12, "to": 28, "type": "move"}));
    }

    #[test]
    fn outgoing_ack_shape() {
        let event = ClientEvent::Cmd { msg: ClientCommand::Acknowledge };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, serde_json::json!({"type": "cmd", "msg": "acknowledge"}));
    }

    #[test]
    fn move_accepts_numbers_and_strings() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"content": {"type": "move", "src": 12, "dst": "28"}}"#)
                .unwrap();
        assert!(matches!(
            msg.content,
            ServerEvent::Move { src, dst, taken: false } if src == sq(12) && dst == sq(28)
        ));
        assert_eq!(msg.author, None);
    }

    #[test]
    fn capture_flag() {
        let msg: ServerMessage = serde_json::from_str(
            r#"{"content": {"type": "move", "src": "12", "dst": "21", "taken": "true"}}"#,
        )
        .unwrap();
        assert!(matches!(msg.content, ServerEvent::Move { taken: true, .. }));
        let msg: ServerMessage = serde_json::from_str(
            r#"{"content": {"type": "move", "src": "12", "dst": "20", "taken": "false"}}"#,
        )
        .unwrap();
        assert!(matches!(msg.content, ServerEvent::Move { taken: false, .. }));
        assert!(
            serde_json::from_str::<ServerMessage>(
                r#"{"content": {"type": "move", "src": 1, "dst": 2, "taken": "maybe"}}"#
            )
            .is_err()
        );
    }

    #[test]
    fn correction_with_null_piece() {
        let msg: ServerMessage = serde_json::from_str(indoc! {r#"
            {
                "author": "u1",
                "content": {
                    "type": "error", "msg": "not your turn",
                    "src": "4", "src_piece": null, "src_color": "white/35",
                    "dst": 60, "dst_piece": "f/f0/Chess_kdt45.svg", "dst_color": "white/15"
                }
            }
        "#})
        .unwrap();
        let ServerEvent::Error { msg, src, src_piece, src_color, dst, dst_piece, dst_color } =
            msg.content
        else {
            panic!("expected error");
        };
        assert_eq!(msg, "not your turn");
        assert_eq!(src, Some(sq(4)));
        assert_eq!(src_piece, None);
        assert_eq!(src_color, Some(Tone::Light));
        assert_eq!(dst, Some(sq(60)));
        assert_eq!(dst_piece.as_deref(), Some("f/f0/Chess_kdt45.svg"));
        assert_eq!(dst_color, Some(Tone::Dark));
    }

    #[test]
    fn plain_error_has_no_squares() {
        let msg: ServerMessage = serde_json::from_str(
            r#"{"content": {"type": "error", "msg": "reset denied, not enough players"}}"#,
        )
        .unwrap();
        assert!(matches!(msg.content, ServerEvent::Error { src: None, dst: None, .. }));
    }

    #[test]
    fn unknown_command_is_tolerated() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"author": "a", "content": {"type": "cmd", "msg": "dance"}}"#)
                .unwrap();
        assert!(matches!(msg.content, ServerEvent::Cmd { msg: ServerCommand::Unknown, .. }));
    }

    #[test]
    fn unknown_type_is_tolerated() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"content": {"type": "teleport", "to": 3}}"#).unwrap();
        assert!(matches!(msg.content, ServerEvent::Unknown));
    }

    #[test]
    fn malformed_frames_fail() {
        for frame in [
            "not json",
            r#"{"content": {"type": "move", "src": 12}}"#,
            r#"{"content": {"type": "move", "src": 12, "dst": 64}}"#,
            r#"{"content": {"type": "move", "src": "x", "dst": 1}}"#,
            r#"{"content": {"type": "error", "msg": "m", "src_color": "purple"}}"#,
            r#"{"author": "a"}"#,
        ] {
            assert!(serde_json::from_str::<ServerMessage>(frame).is_err(), "{frame}");
        }
    }
}
