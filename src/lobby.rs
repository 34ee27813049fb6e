// Menu page: the server answers "create"/"join" form posts with a small JSON object, and the
// client either redirects into the room or reports why it can't.

use serde::Deserialize;

use crate::network::{RoomKind, page_url};


#[derive(Clone, Debug, Deserialize)]
pub struct JoinResponse {
    #[serde(rename = "type")]
    pub kind: Option<RoomKind>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    // Chess join failures use `message` instead of `error`.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum JoinOutcome {
    Redirect { kind: RoomKind, notice: &'static str, url: String },
    Rejected { kind: RoomKind, reason: String },
    // Responses that don't name a room kind aren't meant for the join forms.
    Ignored,
}

#[derive(Clone, Debug)]
pub enum JoinError {
    MalformedResponse(String),
}

impl JoinOutcome {
    // Id of the form input to clear once the response is handled.
    pub fn input_id(&self) -> Option<&'static str> {
        let kind = match self {
            JoinOutcome::Redirect { kind, .. } | JoinOutcome::Rejected { kind, .. } => *kind,
            JoinOutcome::Ignored => return None,
        };
        Some(match kind {
            RoomKind::Chat => "iroomid",
            RoomKind::Chess => "ichessid",
        })
    }
}

pub fn parse_join_response(body: &str) -> Result<JoinOutcome, JoinError> {
    let response: JoinResponse =
        serde_json::from_str(body).map_err(|err| JoinError::MalformedResponse(err.to_string()))?;
    join_outcome(response)
}

pub fn join_outcome(response: JoinResponse) -> Result<JoinOutcome, JoinError> {
    let JoinResponse { kind, room, id, error, message } = response;
    let Some(kind) = kind else {
        return Ok(JoinOutcome::Ignored);
    };
    if let Some(reason) = error {
        return Ok(JoinOutcome::Rejected { kind, reason });
    }
    match (room, id) {
        (Some(room), Some(id)) => {
            let notice = match kind {
                RoomKind::Chat => "Joined room",
                RoomKind::Chess => "Joined game",
            };
            Ok(JoinOutcome::Redirect { kind, notice, url: page_url(kind, &room, &id) })
        }
        _ => match message {
            Some(reason) => Ok(JoinOutcome::Rejected { kind, reason }),
            None => Err(JoinError::MalformedResponse("missing room or id".to_owned())),
        },
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn chess_join_redirects() {
        let outcome =
            parse_join_response(r#"{"room": "r1", "id": "c1", "type": "chess"}"#).unwrap();
        assert_eq!(outcome, JoinOutcome::Redirect {
            kind: RoomKind::Chess,
            notice: "Joined game",
            url: "/chess?room=r1&user=c1".to_owned(),
        });
        assert_eq!(outcome.input_id(), Some("ichessid"));
    }

    #[test]
    fn chat_join_redirects() {
        let outcome = parse_join_response(r#"{"room": "r", "id": "u", "type": "chat"}"#).unwrap();
        assert!(matches!(outcome, JoinOutcome::Redirect { kind: RoomKind::Chat, .. }));
        assert_eq!(outcome.input_id(), Some("iroomid"));
    }

    #[test]
    fn error_is_rejection() {
        let outcome =
            parse_join_response(r#"{"error": "room does not exist", "type": "chat"}"#).unwrap();
        assert_eq!(outcome, JoinOutcome::Rejected {
            kind: RoomKind::Chat,
            reason: "room does not exist".to_owned(),
        });
        assert_eq!(outcome.input_id(), Some("iroomid"));
    }

    #[test]
    fn untyped_response_is_ignored() {
        let outcome = parse_join_response(r#"{"error": "room does not exist"}"#).unwrap();
        assert_eq!(outcome, JoinOutcome::Ignored);
        assert_eq!(outcome.input_id(), None);
    }

    #[test]
    fn chess_message_is_rejection() {
        let outcome = parse_join_response(r#"{"message": "room full", "type": "chess"}"#).unwrap();
        assert_eq!(outcome, JoinOutcome::Rejected {
            kind: RoomKind::Chess,
            reason: "room full".to_owned(),
        });
    }

    #[test]
    fn garbage_is_error() {
        assert!(parse_join_response("<html>").is_err());
        assert!(parse_join_response(r#"{"type": "chess"}"#).is_err());
    }
}
