use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;


// Where the client goes whenever the room connection is lost. There is no reconnect.
pub const LANDING_PAGE: &str = "/";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Chat,
    Chess,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectionEvent {
    Opened,
    Closed,
    Failed,
}

impl RoomKind {
    pub fn page_path(self) -> &'static str {
        match self {
            RoomKind::Chat => "/room",
            RoomKind::Chess => "/chess",
        }
    }
    pub fn socket_path(self) -> &'static str {
        match self {
            RoomKind::Chat => "/room/ws",
            RoomKind::Chess => "/chess/ws",
        }
    }
}

// `page_protocol` is `window.location.protocol`, e.g. "https:".
pub fn socket_scheme(page_protocol: &str) -> &'static str {
    if page_protocol == "https:" { "wss" } else { "ws" }
}

fn room_query(room: &str, user: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("room", room)
        .append_pair("user", user)
        .finish()
}

pub fn socket_url(
    kind: RoomKind, page_protocol: &str, host: &str, room: &str, user: &str,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}://{}", socket_scheme(page_protocol), host))?;
    url.set_path(kind.socket_path());
    url.set_query(Some(&room_query(room, user)));
    Ok(url)
}

// Same-origin path of the room page, suitable for `window.location.href`.
pub fn page_url(kind: RoomKind, room: &str, user: &str) -> String {
    format!("{}?{}", kind.page_path(), room_query(room, user))
}

// Returns the page to navigate to, if any.
pub fn navigation_on(event: ConnectionEvent) -> Option<&'static str> {
    match event {
        ConnectionEvent::Opened => None,
        ConnectionEvent::Closed | ConnectionEvent::Failed => Some(LANDING_PAGE),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chess_socket_url() {
        let url = socket_url(RoomKind::Chess, "http:", "localhost:8090", "r1", "c1").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8090/chess/ws?room=r1&user=c1");
    }

    #[test]
    fn secure_page_uses_wss() {
        let url = socket_url(RoomKind::Chat, "https:", "example.org", "r", "u").unwrap();
        assert_eq!(url.as_str(), "wss://example.org/room/ws?room=r&user=u");
    }

    #[test]
    fn page_url_escapes_ids() {
        assert_eq!(page_url(RoomKind::Chess, "a b", "u&1"), "/chess?room=a+b&user=u%261");
    }

    #[test]
    fn lost_connection_goes_home() {
        assert_eq!(navigation_on(ConnectionEvent::Opened), None);
        assert_eq!(navigation_on(ConnectionEvent::Closed), Some("/"));
        assert_eq!(navigation_on(ConnectionEvent::Failed), Some("/"));
    }
}
