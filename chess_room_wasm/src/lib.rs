// Improvement potential: Let the drag layer ask `WebClient` whether a square can be picked up
//   instead of relying on the `unswappable` class filter.

pub mod web_board;
pub mod web_chat;
pub mod web_document;
pub mod web_error_handling;

use std::sync::mpsc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use chess_room::client::{BoardSyncAgent, NotableEvent, SwapError};
use chess_room::coord::SquareIdx;
use chess_room::event::ClientEvent;
use chess_room::lobby::{JoinOutcome, parse_join_response};
use chess_room::network::{ConnectionEvent, RoomKind, navigation_on, socket_url};

use crate::web_board::{apply_board_changes, board_node, read_board};
use crate::web_document::{alert, navigate, page_protocol_and_host, web_document};
use crate::web_error_handling::{JsResult, RustError, set_panic_hook};


const ROOM_ID: &str = "room-id";
const CLIENT_ID: &str = "client-id";
const OPPONENT_NAME_ID: &str = "o-name";

#[wasm_bindgen]
pub fn init_page() -> JsResult<()> {
    set_panic_hook();
    console_log::init_with_level(log::Level::Info)
        .map_err(|err| rust_error!("Error initializing logger: {}", err))
}

#[wasm_bindgen(getter_with_clone)]
pub struct JsEventOpponentJoined {
    pub name: String,
}

#[wasm_bindgen]
pub struct JsEventOpponentLeft {}

#[wasm_bindgen]
pub struct JsEventMoveMade {}

#[wasm_bindgen(getter_with_clone)]
pub struct JsEventMoveRejected {
    pub message: String,
}

#[wasm_bindgen(getter_with_clone)]
pub struct JsEventServerError {
    pub message: String,
}

#[wasm_bindgen]
pub struct JsEventResetRequested {}

#[wasm_bindgen]
pub struct JsEventBoardReset {}

#[wasm_bindgen]
pub struct JsEventCastled {}

#[wasm_bindgen(getter_with_clone)]
pub struct JsEventCheckmate {
    pub color: String,
}


#[wasm_bindgen]
pub struct WebClient {
    agent: BoardSyncAgent,
    server_rx: mpsc::Receiver<ClientEvent>,
    socket_url: String,
}

#[wasm_bindgen]
impl WebClient {
    // Picks up the room and the board that the server rendered into the page.
    pub fn new_client() -> JsResult<WebClient> {
        let document = web_document()?;
        let room = element_text(&document.get_existing_element_by_id(ROOM_ID)?);
        let user = element_text(&document.get_existing_element_by_id(CLIENT_ID)?);
        let (protocol, host) = page_protocol_and_host()?;
        let socket_url = socket_url(RoomKind::Chess, &protocol, &host, &room, &user)
            .map_err(|err| rust_error!("Bad socket URL: {}", err))?;
        let board = read_board(&board_node()?)?;
        let (server_tx, server_rx) = mpsc::channel();
        info!("Joining room {room} as {user}");
        Ok(WebClient {
            agent: BoardSyncAgent::new(board, server_tx),
            server_rx,
            socket_url: socket_url.into(),
        })
    }

    pub fn socket_url(&self) -> String { self.socket_url.clone() }

    // Returns whether the swap was accepted. Squares are zero-based children of `#board`.
    pub fn local_swap(&mut self, source: u32, dest: u32) -> JsResult<bool> {
        let source = square(source)?;
        let dest = square(dest)?;
        match self.agent.on_local_swap(source, dest) {
            Ok(()) => {
                self.update_board()?;
                Ok(true)
            }
            Err(SwapError::Unswappable(idx)) => {
                info!("Square {idx} has nothing to pick up");
                Ok(false)
            }
        }
    }

    pub fn process_server_event(&mut self, frame: &str) -> JsResult<()> {
        let result = self.agent.process_server_event(frame);
        self.update_board()?;
        self.update_opponent()?;
        result.map_err(|err| RustError::from(err).into())
    }

    pub fn next_notable_event(&mut self) -> JsResult<JsValue> {
        match self.agent.next_notable_event() {
            Some(NotableEvent::OpponentJoined(name)) => Ok(JsEventOpponentJoined { name }.into()),
            Some(NotableEvent::OpponentLeft) => Ok(JsEventOpponentLeft {}.into()),
            Some(
                NotableEvent::MoveConfirmed(_)
                | NotableEvent::OpponentMoved(_)
                | NotableEvent::PieceTaken(_),
            ) => Ok(JsEventMoveMade {}.into()),
            Some(NotableEvent::MoveRejected { message }) => {
                Ok(JsEventMoveRejected { message }.into())
            }
            Some(NotableEvent::ServerError(message)) => Ok(JsEventServerError { message }.into()),
            Some(NotableEvent::ResetRequested) => Ok(JsEventResetRequested {}.into()),
            Some(NotableEvent::BoardReset) => Ok(JsEventBoardReset {}.into()),
            Some(NotableEvent::Castled { .. }) => Ok(JsEventCastled {}.into()),
            Some(NotableEvent::Checkmate { color }) => Ok(JsEventCheckmate { color }.into()),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn next_outgoing_event(&mut self) -> JsResult<Option<String>> {
        match self.server_rx.try_recv() {
            Ok(event) => serde_json::to_string(&event)
                .map(Some)
                .map_err(|err| rust_error!("Cannot serialize {:?}: {}", event, err)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(rust_error!("Outgoing event queue disconnected"))
            }
        }
    }

    pub fn request_reset(&mut self) { self.agent.request_reset(); }
    pub fn accept_reset(&mut self) { self.agent.accept_reset(); }
    pub fn quit(&mut self) { self.agent.quit(); }

    fn update_board(&mut self) -> JsResult<()> {
        let changes = self.agent.take_board_changes();
        if changes.is_empty() {
            return Ok(());
        }
        apply_board_changes(&board_node()?, self.agent.board(), changes)
    }

    fn update_opponent(&self) -> JsResult<()> {
        let node = web_document()?.get_existing_element_by_id(OPPONENT_NAME_ID)?;
        node.set_text_content(self.agent.opponent());
        Ok(())
    }
}

#[wasm_bindgen]
pub fn socket_closed() -> JsResult<()> { on_connection_event(ConnectionEvent::Closed) }

#[wasm_bindgen]
pub fn socket_failed() -> JsResult<()> { on_connection_event(ConnectionEvent::Failed) }

fn on_connection_event(event: ConnectionEvent) -> JsResult<()> {
    match navigation_on(event) {
        Some(href) => {
            warn!("Connection lost ({event:?}), leaving the room");
            navigate(href)
        }
        None => Ok(()),
    }
}

// Handles the menu's create/join answer.
#[wasm_bindgen]
pub fn handle_join_response(body: &str) -> JsResult<()> {
    let outcome = parse_join_response(body).map_err(RustError::from)?;
    if let Some(input_id) = outcome.input_id() {
        let input = web_document()?
            .get_element_by_id(input_id)
            .and_then(|element| element.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            input.set_value("");
        }
    }
    match outcome {
        JoinOutcome::Redirect { notice, url, .. } => {
            alert(notice)?;
            navigate(&url)
        }
        JoinOutcome::Rejected { reason, .. } => alert(&reason),
        JoinOutcome::Ignored => {
            info!("Ignoring join response without a room kind");
            Ok(())
        }
    }
}

fn element_text(element: &web_sys::Element) -> String {
    element.text_content().unwrap_or_default().trim().to_owned()
}

fn square(idx: u32) -> JsResult<SquareIdx> {
    SquareIdx::new(idx.into()).map_err(|err| rust_error!("Bad square: {:?}", err))
}
