// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use game_hub::client::{ClientState, SessionRole};
use game_hub::coord::Coord;
use game_hub::event::ClientAction;
use game_hub::remote::RemoteGame;


#[allow(dead_code)]
pub fn coord<G: RemoteGame>(algebraic: &str) -> Coord {
    Coord::from_algebraic(algebraic, G::SHAPE).unwrap()
}

// A client session whose outbound messages are captured instead of going to a socket.
pub struct TestSession<G: RemoteGame> {
    pub state: ClientState<G>,
    actions_rx: mpsc::Receiver<ClientAction>,
}

impl<G: RemoteGame> TestSession<G> {
    #[allow(dead_code)]
    pub fn new(role: SessionRole) -> Self {
        let (actions_tx, actions_rx) = mpsc::channel();
        TestSession {
            state: ClientState::new("test-game".to_owned(), role, actions_tx),
            actions_rx,
        }
    }

    // Session right after the socket has opened, with the opening messages discarded.
    #[allow(dead_code)]
    pub fn connected(role: SessionRole) -> Self {
        let mut session = Self::new(role);
        session.state.on_open();
        session.sent();
        session
    }

    #[allow(dead_code)]
    pub fn sent(&mut self) -> Vec<ClientAction> { self.actions_rx.try_iter().collect() }

    #[allow(dead_code)]
    pub fn receive(&mut self, message: serde_json::Value) -> Vec<game_hub::client::NotableEvent> {
        self.state.process_server_text(&message.to_string()).unwrap()
    }
}
