use std::collections::VecDeque;
use std::sync::mpsc;

use log::{info, warn};

use crate::board::{Board, Cell, Tone};
use crate::coord::{NUM_SQUARES, SquareIdx};
use crate::dirty::{BoardChange, DirtyBoard};
use crate::event::{
    ClientCommand, ClientEvent, ServerCommand, ServerEvent, ServerMessage, WireSquare,
};
use crate::piece::PieceRef;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveIntent {
    pub source: SquareIdx,
    pub dest: SquareIdx,
}

impl MoveIntent {
    // Swaps are symmetric, so the server echoing the move in either direction counts.
    pub fn same_squares(&self, a: SquareIdx, b: SquareIdx) -> bool {
        (self.source, self.dest) == (a, b) || (self.source, self.dest) == (b, a)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ServerCorrection {
    pub src: SquareIdx,
    pub src_piece: Option<PieceRef>,
    pub src_tone: Tone,
    pub dst: SquareIdx,
    pub dst_piece: Option<PieceRef>,
    pub dst_tone: Tone,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncState {
    Idle,
    // A local swap has been applied and sent, and the server hasn't weighed in yet.
    AwaitingConfirmation(MoveIntent),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SwapError {
    Unswappable(SquareIdx),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    OpponentJoined(String),
    OpponentLeft,
    MoveConfirmed(MoveIntent),
    OpponentMoved(MoveIntent),
    MoveRejected { message: String },
    ServerError(String),
    ResetRequested,
    BoardReset,
    PieceTaken(MoveIntent),
    Castled { king: MoveIntent, rook: MoveIntent },
    Checkmate { color: String },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    MalformedMessage(String),
    CannotApplyEvent(String),
}

// Mirrors the authoritative board kept by the server. Local gestures are applied optimistically;
// server messages either confirm them, mirror the opponent's moves, or overwrite squares.
pub struct BoardSyncAgent {
    board: Board,
    state: SyncState,
    opponent: Option<String>,
    events_tx: mpsc::Sender<ClientEvent>,
    notable_events: VecDeque<NotableEvent>,
    dirty: DirtyBoard,
}

impl BoardSyncAgent {
    pub fn new(board: Board, events_tx: mpsc::Sender<ClientEvent>) -> Self {
        BoardSyncAgent {
            board,
            state: SyncState::Idle,
            opponent: None,
            events_tx,
            notable_events: VecDeque::new(),
            dirty: DirtyBoard::new(),
        }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn state(&self) -> SyncState { self.state }
    pub fn opponent(&self) -> Option<&str> { self.opponent.as_deref() }

    pub fn next_notable_event(&mut self) -> Option<NotableEvent> { self.notable_events.pop_front() }
    pub fn take_board_changes(&mut self) -> Vec<BoardChange> { self.dirty.take() }

    pub fn on_local_swap(&mut self, source: SquareIdx, dest: SquareIdx) -> Result<(), SwapError> {
        if source == dest {
            return Ok(());
        }
        if self.board[source].is_unswappable() {
            return Err(SwapError::Unswappable(source));
        }
        self.swap(source, dest);
        self.state = SyncState::AwaitingConfirmation(MoveIntent { source, dest });
        self.send(ClientEvent::Move { from: source, to: dest });
        Ok(())
    }

    pub fn on_remote_move(&mut self, src: SquareIdx, dst: SquareIdx) {
        match self.state {
            SyncState::AwaitingConfirmation(pending) if pending.same_squares(src, dst) => {
                self.state = SyncState::Idle;
                self.notable_events.push_back(NotableEvent::MoveConfirmed(pending));
            }
            _ => {
                // The server only lets the opponent move after our move went through, so any
                // other move settles what we were waiting for.
                self.state = SyncState::Idle;
                self.swap(src, dst);
                self.notable_events
                    .push_back(NotableEvent::OpponentMoved(MoveIntent { source: src, dest: dst }));
            }
        }
    }

    pub fn on_remote_correction(&mut self, correction: ServerCorrection) {
        let ServerCorrection { src, src_piece, src_tone, dst, dst_piece, dst_tone } = correction;
        self.overwrite(src, Cell::new(src_tone, src_piece));
        self.overwrite(dst, Cell::new(dst_tone, dst_piece));
        self.state = SyncState::Idle;
    }

    // The local swap left the captured piece on the source square; the server says it's gone.
    pub fn on_capture_confirmed(&mut self, src: SquareIdx, dst: SquareIdx) {
        match self.state {
            SyncState::AwaitingConfirmation(pending) if pending.same_squares(src, dst) => {
                self.state = SyncState::Idle;
                self.clear_square(src);
                self.notable_events
                    .push_back(NotableEvent::PieceTaken(MoveIntent { source: src, dest: dst }));
            }
            _ => info!("Ignoring capture {src} -> {dst} that doesn't match the pending move"),
        }
    }

    // Places king and rook on their destinations and empties the squares they came from. The
    // king's current square depends on whether we already swapped the pair locally.
    pub fn on_castle(&mut self, king: MoveIntent, rook: MoveIntent) {
        let (king_at, rook_at) = match self.state {
            SyncState::AwaitingConfirmation(pending)
                if pending.same_squares(king.source, rook.source) =>
            {
                (rook.source, king.source)
            }
            _ => (king.source, rook.source),
        };
        let king_piece = self.board[king_at].piece.clone();
        let rook_piece = self.board[rook_at].piece.clone();
        self.clear_square(king.source);
        self.clear_square(rook.source);
        self.place(king.dest, king_piece);
        self.place(rook.dest, rook_piece);
        self.state = SyncState::Idle;
        self.notable_events.push_back(NotableEvent::Castled { king, rook });
    }

    pub fn request_reset(&mut self) { self.send_command(ClientCommand::ResetReq); }

    // The server resets without echoing the board back to whoever accepted.
    pub fn accept_reset(&mut self) {
        self.send_command(ClientCommand::ResetAck);
        self.replace_board(Board::starting_position());
    }
    pub fn quit(&mut self) { self.send_command(ClientCommand::Quit); }

    pub fn process_server_event(&mut self, frame: &str) -> Result<(), EventError> {
        serde_json::from_str::<ServerMessage>(frame)
            .map_err(|err| EventError::MalformedMessage(err.to_string()))
            .and_then(|message| self.apply_server_message(message))
            .inspect_err(|err| warn!("Rejected server message {frame:?}: {err:?}"))
    }

    pub fn apply_server_message(&mut self, message: ServerMessage) -> Result<(), EventError> {
        let ServerMessage { author, content } = message;
        match content {
            ServerEvent::Move { src, dst, taken } => {
                self.on_remote_move(src, dst);
                if taken {
                    self.clear_square(src);
                }
            }
            ServerEvent::Error { msg, src, src_piece, src_color, dst, dst_piece, dst_color } => {
                match (src, src_color, dst, dst_color) {
                    (Some(src), Some(src_tone), Some(dst), Some(dst_tone)) => {
                        info!("Move rejected: {msg}");
                        self.on_remote_correction(ServerCorrection {
                            src,
                            src_piece: PieceRef::from_wire(src_piece),
                            src_tone,
                            dst,
                            dst_piece: PieceRef::from_wire(dst_piece),
                            dst_tone,
                        });
                        self.notable_events.push_back(NotableEvent::MoveRejected { message: msg });
                    }
                    (None, None, None, None) => {
                        info!("Server error: {msg}");
                        self.notable_events.push_back(NotableEvent::ServerError(msg));
                    }
                    _ => {
                        return Err(EventError::MalformedMessage(format!(
                            "incomplete correction for error \"{msg}\""
                        )));
                    }
                }
            }
            ServerEvent::Cmd { msg, board } => self.apply_command(msg, author, board)?,
            ServerEvent::TakeAck { src, dst } => self.on_capture_confirmed(src, dst),
            ServerEvent::Castle { k_src, r_src, k_dst, r_dst } => self.on_castle(
                MoveIntent { source: k_src, dest: k_dst },
                MoveIntent { source: r_src, dest: r_dst },
            ),
            ServerEvent::Checkmate { color } => {
                info!("Checkmate: {color}");
                self.notable_events.push_back(NotableEvent::Checkmate { color });
            }
            ServerEvent::Unknown => {
                warn!("Ignoring server message of unknown type");
            }
        }
        Ok(())
    }

    fn apply_command(
        &mut self, command: ServerCommand, author: Option<String>, board: Option<String>,
    ) -> Result<(), EventError> {
        match command {
            ServerCommand::Connected => {
                self.set_opponent(author);
                self.send_command(ClientCommand::Acknowledge);
            }
            ServerCommand::Acknowledge => {
                self.set_opponent(author);
            }
            ServerCommand::Disconnected => {
                self.opponent = None;
                self.notable_events.push_back(NotableEvent::OpponentLeft);
            }
            ServerCommand::ResetReq => {
                self.notable_events.push_back(NotableEvent::ResetRequested);
            }
            ServerCommand::ResetAck => {
                let board = board.ok_or_else(|| {
                    EventError::MalformedMessage("reset-ack without board".to_owned())
                })?;
                self.reset_board(&board)?;
            }
            ServerCommand::Unknown => {
                warn!("Ignoring unknown server command");
            }
        }
        Ok(())
    }

    fn reset_board(&mut self, board_json: &str) -> Result<(), EventError> {
        let squares: Vec<WireSquare> = serde_json::from_str(board_json)
            .map_err(|err| EventError::MalformedMessage(format!("bad board: {err}")))?;
        let num_squares = squares.len();
        let cells: [Cell; NUM_SQUARES] = squares
            .into_iter()
            .map(|sq| Cell::new(sq.color, PieceRef::from_wire(sq.piece)))
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| {
                EventError::CannotApplyEvent(format!(
                    "expected {NUM_SQUARES} squares, got {num_squares}"
                ))
            })?;
        self.replace_board(Board::from_cells(cells));
        Ok(())
    }

    fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.state = SyncState::Idle;
        self.dirty.push(BoardChange::RedrawAll);
        self.notable_events.push_back(NotableEvent::BoardReset);
    }

    fn set_opponent(&mut self, author: Option<String>) {
        if let Some(name) = author {
            if self.opponent.as_deref() != Some(name.as_str()) {
                self.notable_events.push_back(NotableEvent::OpponentJoined(name.clone()));
            }
            self.opponent = Some(name);
        }
    }

    fn swap(&mut self, a: SquareIdx, b: SquareIdx) {
        self.board.swap(a, b);
        self.dirty.push(BoardChange::Swap(a, b));
    }

    fn place(&mut self, idx: SquareIdx, piece: Option<PieceRef>) {
        let tone = self.board[idx].tone;
        self.overwrite(idx, Cell::new(tone, piece));
    }

    fn clear_square(&mut self, idx: SquareIdx) { self.place(idx, None); }

    fn overwrite(&mut self, idx: SquareIdx, cell: Cell) {
        self.board.overwrite(idx, cell);
        self.dirty.push(BoardChange::Redraw(idx));
    }

    fn send_command(&mut self, msg: ClientCommand) { self.send(ClientEvent::Cmd { msg }); }

    // Fire-and-forget: a closed channel means the front end is shutting down.
    fn send(&mut self, event: ClientEvent) {
        if self.events_tx.send(event).is_err() {
            warn!("Outgoing event channel closed");
        }
    }
}
