// Client side of one server-backed game session.
//
// The state is a display model: the server is the only authority on the board, the turn and
// legality. Socket events and server messages are applied in the order they arrive; nothing is
// acknowledged, retried or reordered, and there is no reconnection.

use std::fmt;
use std::sync::mpsc;

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;

use crate::cell::Highlight;
use crate::coord::Coord;
use crate::event::{ClientAction, LegalMove, ServerMessage, present_field};
use crate::force::Force;
use crate::grid::GenericGrid;
use crate::remote::RemoteGame;
use crate::selection::{BoardView, ClickOutcome, OwnedPiece, SelectionController};


pub const ONGOING_GAME_STATE: &str = "ongoing";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionRole {
    Creator,
    Joiner,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SessionStatus {
    Connecting,
    Connected,
    Disconnected,
    Error,
    // Free-form status text from the server.
    Server(String),
    GameOver(String),
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Connecting => write!(f, "connecting"),
            SessionStatus::Connected => write!(f, "connected"),
            SessionStatus::Disconnected => write!(f, "disconnected"),
            SessionStatus::Error => write!(f, "error"),
            SessionStatus::Server(status) => write!(f, "{}", status),
            SessionStatus::GameOver(game_state) => write!(f, "Game over - {}", game_state),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    BoardUpdated,
    GameOver(String),
    // Must be shown to the user and acknowledged.
    Alert(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    MalformedMessage(String),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::MalformedMessage(message) => write!(f, "malformed message: {}", message),
        }
    }
}

pub struct ClientState<G: RemoteGame> {
    game_id: String,
    role: SessionRole,
    events_tx: mpsc::Sender<ClientAction>,
    socket_open: bool,
    status: SessionStatus,
    my_force: Option<Force>,
    current_turn: Force,
    legal_moves: Vec<LegalMove>,
    game_state: String,
    grid: GenericGrid<G::Piece>,
    selection: SelectionController,
}

impl<G: RemoteGame> ClientState<G> {
    pub fn new(game_id: String, role: SessionRole, events_tx: mpsc::Sender<ClientAction>) -> Self {
        ClientState {
            game_id,
            role,
            events_tx,
            socket_open: false,
            status: SessionStatus::Connecting,
            my_force: None,
            current_turn: G::FIRST_TO_MOVE,
            legal_moves: vec![],
            game_state: ONGOING_GAME_STATE.to_owned(),
            grid: G::initial_grid(),
            selection: SelectionController::new(),
        }
    }

    pub fn game_id(&self) -> &str { &self.game_id }
    pub fn role(&self) -> SessionRole { self.role }
    pub fn status(&self) -> &SessionStatus { &self.status }
    pub fn is_socket_open(&self) -> bool { self.socket_open }
    pub fn my_force(&self) -> Option<Force> { self.my_force }
    pub fn current_turn(&self) -> Force { self.current_turn }
    pub fn legal_moves(&self) -> &[LegalMove] { &self.legal_moves }
    pub fn game_state(&self) -> &str { &self.game_state }
    pub fn grid(&self) -> &GenericGrid<G::Piece> { &self.grid }
    pub fn selected(&self) -> Option<Coord> { self.selection.selected() }
    pub fn is_my_turn(&self) -> bool { self.my_force == Some(self.current_turn) }

    pub fn on_open(&mut self) {
        info!("{} game {}: connection established", G::NAME, self.game_id);
        self.socket_open = true;
        self.status = SessionStatus::Connected;
        match self.role {
            SessionRole::Creator => {
                self.my_force = Some(G::CREATOR_FORCE);
            }
            SessionRole::Joiner => {
                self.my_force = Some(G::CREATOR_FORCE.opponent());
                self.send(ClientAction::JoinGame);
            }
        }
        self.send(ClientAction::GetBoard);
    }

    pub fn on_error(&mut self, message: &str) {
        error!("{} game {}: connection error: {}", G::NAME, self.game_id, message);
        self.status = SessionStatus::Error;
    }

    pub fn on_close(&mut self) {
        info!("{} game {}: connection closed", G::NAME, self.game_id);
        self.socket_open = false;
        self.selection.clear();
        self.status = SessionStatus::Disconnected;
    }

    // Only text that is not a JSON object at all is an error. Bad fields are dropped one by one.
    pub fn process_server_text(&mut self, text: &str) -> Result<Vec<NotableEvent>, EventError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|err| EventError::MalformedMessage(format!("{}: {}", err, text)))?;
        if !value.is_object() {
            return Err(EventError::MalformedMessage(format!("not an object: {}", text)));
        }
        let message: ServerMessage = serde_json::from_value(value)
            .map_err(|err| EventError::MalformedMessage(format!("{}: {}", err, text)))?;
        Ok(self.process_server_message(message))
    }

    // Fields are independent: every field present is applied, in a fixed order.
    pub fn process_server_message(&mut self, message: ServerMessage) -> Vec<NotableEvent> {
        debug!("{} game {}: received {:?}", G::NAME, self.game_id, message);
        let mut events = vec![];
        match G::decode_board(&message) {
            None => {}
            Some(Ok(grid)) => {
                self.grid = grid;
                self.drop_stale_selection();
                events.push(NotableEvent::BoardUpdated);
            }
            Some(Err(err)) => {
                error!("{} game {}: cannot decode board: {}", G::NAME, self.game_id, err);
                events.push(NotableEvent::Alert(format!("Cannot display board: {}", err)));
            }
        }
        if let Some(status) = self.decode_field::<String>("status", &message.status) {
            self.status = SessionStatus::Server(status);
        }
        if let Some(turn) = self.decode_field::<Force>("turn", &message.turn) {
            self.current_turn = turn;
        }
        if let Some(legal_moves) = self.decode_field::<Vec<LegalMove>>("legalMoves", &message.legal_moves) {
            self.legal_moves = legal_moves;
        }
        if let Some(game_state) = self.decode_field::<String>("gameState", &message.game_state) {
            if game_state != ONGOING_GAME_STATE {
                info!("{} game {}: game over: {}", G::NAME, self.game_id, game_state);
                self.status = SessionStatus::GameOver(game_state.clone());
                events.push(NotableEvent::GameOver(game_state.clone()));
            }
            self.game_state = game_state;
        }
        if let Some(err) = present_field(&message.error) {
            let err = match err.as_str() {
                Some(text) => text.to_owned(),
                None => err.to_string(),
            };
            warn!("{} game {}: server error: {}", G::NAME, self.game_id, err);
            events.push(NotableEvent::Alert(format!("Error: {}", err)));
        }
        events
    }

    pub fn click(&mut self, pos: Coord) -> ClickOutcome {
        if !self.socket_open {
            debug!("Cannot make move: socket not connected");
            return ClickOutcome::Ignored;
        }
        let Some(my_force) = self.my_force else {
            return ClickOutcome::Ignored;
        };
        let view = BoardView {
            grid: &self.grid,
            my_force,
            is_my_turn: self.is_my_turn(),
            legal_moves: &self.legal_moves,
        };
        let outcome = self.selection.click(pos, &view);
        if let ClickOutcome::MoveRequested(ref turn) = outcome {
            info!("{} game {}: sending move {} -> {}", G::NAME, self.game_id, turn.from, turn.to);
            self.send(ClientAction::MakeMove { turn: turn.clone() });
        }
        outcome
    }

    pub fn highlight(&self, pos: Coord) -> Option<Highlight> {
        let view = BoardView {
            grid: &self.grid,
            my_force: self.my_force.unwrap_or(G::CREATOR_FORCE),
            is_my_turn: self.is_my_turn(),
            legal_moves: &self.legal_moves,
        };
        self.selection.highlight(pos, &view)
    }

    fn decode_field<T: DeserializeOwned>(
        &self, name: &str, field: &Option<serde_json::Value>,
    ) -> Option<T> {
        let value = present_field(field)?;
        match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!("{} game {}: ignoring field {}={}: {}", G::NAME, self.game_id, name, value, err);
                None
            }
        }
    }

    // The server may move pieces under the cursor; a selection must always point at an own piece.
    fn drop_stale_selection(&mut self) {
        if let Some(pos) = self.selection.selected() {
            let still_own = self.grid[pos].as_ref().is_some_and(|p| Some(p.owner()) == self.my_force);
            if !still_own {
                self.selection.clear();
            }
        }
    }

    fn send(&self, action: ClientAction) {
        debug!("{} game {}: sending {:?}", G::NAME, self.game_id, action);
        if self.events_tx.send(action).is_err() {
            warn!("{} game {}: cannot send, connection is gone", G::NAME, self.game_id);
        }
    }
}
