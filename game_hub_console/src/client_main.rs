use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use crossterm::event::{self as term_event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Stylize};
use crossterm::{cursor, execute, terminal};
use instant::Instant;
use log::{debug, error, info};
use scopeguard::defer;

use game_hub::client::{ClientState, NotableEvent, SessionRole};
use game_hub::clobber::{ClobberGame, ClobberMoveError, ClobberStatus};
use game_hub::clobber_ai::MinimaxPlayer;
use game_hub::coord::{BoardShape, Coord};
use game_hub::force::Force;
use game_hub::hub::{GameId, Hub};
use game_hub::internal_error_message;
use game_hub::remote::{RemoteChess, RemoteClobber, RemoteGame};
use game_hub::selection::{BoardView, ClickOutcome, SelectionController};
use game_hub::tictactoe::TicTacToeGame;

use crate::client_config::ClientConfig;
use crate::network::{self, SocketEvent};
use crate::tui;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SessionStart {
    New,
    Join(String),
}

// Screen to open on startup.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LaunchTarget {
    Hub,
    Remote(GameId, SessionStart),
    // Two players on one terminal, or one player against `computer`.
    LocalClobber { computer: Option<MinimaxPlayer> },
    TicTacToe,
}

enum IncomingEvent {
    Terminal(term_event::Event),
    Tick,
    Socket { session_id: u64, event: SocketEvent },
    GameCreated { game: GameId, game_id: String },
}

struct RemoteScreen<G: RemoteGame> {
    session_id: u64,
    // Dropping the state drops the outbound sender, which closes the socket.
    state: ClientState<G>,
    cursor: Coord,
}

impl<G: RemoteGame> RemoteScreen<G> {
    fn on_socket_event(&mut self, event: SocketEvent) -> Vec<NotableEvent> {
        match event {
            SocketEvent::Opened => self.state.on_open(),
            SocketEvent::Text(text) => match self.state.process_server_text(&text) {
                Ok(events) => return events,
                Err(err) => error!("{} game {}: {}", G::NAME, self.state.game_id(), err),
            },
            SocketEvent::Error(err) => self.state.on_error(&err),
            SocketEvent::Closed => self.state.on_close(),
        }
        vec![]
    }
}

// The human moves first when playing against the computer.
const COMPUTER_FORCE: Force = Force::White;

struct LocalClobberScreen {
    game: ClobberGame,
    selection: SelectionController,
    cursor: Coord,
    computer: Option<MinimaxPlayer>,
}

fn move_result_message(result: Result<ClobberStatus, ClobberMoveError>) -> Option<String> {
    match result {
        Ok(ClobberStatus::Active) => None,
        Ok(ClobberStatus::Victory(force)) => Some(format!("Game over - {} wins", force)),
        Err(err) => Some(err.to_string()),
    }
}

impl LocalClobberScreen {
    fn new(computer: Option<MinimaxPlayer>) -> Self {
        LocalClobberScreen {
            game: ClobberGame::new(),
            selection: SelectionController::new(),
            cursor: bottom_left(BoardShape::CLOBBER),
            computer,
        }
    }

    // Returns a message for the user, if any.
    fn click(&mut self, pos: Coord) -> Option<String> {
        let legal_moves = self.game.legal_moves();
        let view = BoardView {
            grid: self.game.grid(),
            my_force: self.game.active_force(),
            is_my_turn: self.game.status() == ClobberStatus::Active,
            legal_moves: &legal_moves,
        };
        let ClickOutcome::MoveRequested(request) = self.selection.click(pos, &view) else {
            return None;
        };
        let shape = BoardShape::CLOBBER;
        let (Some(from), Some(to)) =
            (Coord::from_algebraic(&request.from, shape), Coord::from_algebraic(&request.to, shape))
        else {
            return Some(internal_error_message!("bad move request {:?}", request));
        };
        match self.game.try_move(from, to) {
            Ok(ClobberStatus::Active) => self.play_computer_move(),
            result => move_result_message(result),
        }
    }

    fn play_computer_move(&mut self) -> Option<String> {
        let computer = self.computer?;
        if self.game.active_force() != COMPUTER_FORCE {
            return None;
        }
        let (from, to) = computer.best_move(&self.game)?;
        match self.game.try_move(from, to) {
            Err(err) => Some(internal_error_message!("computer move rejected: {}", err)),
            result => move_result_message(result),
        }
    }

    // Against the computer, takes back the computer's reply as well.
    fn undo(&mut self) -> Option<String> {
        self.selection.clear();
        self.game.undo_move()?;
        if self.computer.is_some() && self.game.active_force() == COMPUTER_FORCE {
            self.game.undo_move();
        }
        None
    }
}

struct TicTacToeScreen {
    game: TicTacToeGame,
    cursor: Coord,
}

enum Screen {
    Hub,
    Controls { game: GameId },
    Chess(RemoteScreen<RemoteChess>),
    Clobber(RemoteScreen<RemoteClobber>),
    LocalClobber(LocalClobberScreen),
    TicTacToe(TicTacToeScreen),
}

struct App {
    config: ClientConfig,
    hub: Hub,
    screen: Screen,
    events_tx: mpsc::Sender<IncomingEvent>,
    next_session_id: u64,
    keyboard_input: String,
    // Informational line, replaced by the next one.
    message: Option<String>,
    // Blocks the screen until any key is pressed.
    alert: Option<String>,
    quit: bool,
}

fn bottom_left(shape: BoardShape) -> Coord { Coord::from_zero_based(shape.num_rows - 1, 0) }

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1),
            cursor::Hide
        )?;
    }
    Ok(())
}

impl App {
    fn new(config: ClientConfig, events_tx: mpsc::Sender<IncomingEvent>) -> Self {
        App {
            config,
            hub: Hub::new(),
            screen: Screen::Hub,
            events_tx,
            next_session_id: 0,
            keyboard_input: String::new(),
            message: None,
            alert: None,
            quit: false,
        }
    }

    fn launch(&mut self, target: LaunchTarget) -> anyhow::Result<()> {
        match target {
            LaunchTarget::Hub => {}
            LaunchTarget::Remote(game, SessionStart::New) => {
                self.open_game(game);
                self.request_new_game(game)?;
            }
            LaunchTarget::Remote(game, SessionStart::Join(game_id)) => {
                self.hub.mount(game);
                self.connect(game, game_id, SessionRole::Joiner)?;
            }
            LaunchTarget::LocalClobber { computer } => {
                self.hub.mount(GameId::Clobber);
                self.screen = Screen::LocalClobber(LocalClobberScreen::new(computer));
            }
            LaunchTarget::TicTacToe => self.open_game(GameId::TicTacToe),
        }
        Ok(())
    }

    fn open_game(&mut self, game: GameId) {
        self.hub.mount(game);
        self.keyboard_input.clear();
        self.message = None;
        self.screen = if game.is_networked() {
            Screen::Controls { game }
        } else {
            Screen::TicTacToe(TicTacToeScreen {
                game: TicTacToeGame::new(),
                cursor: bottom_left(TicTacToeGame::SHAPE),
            })
        };
    }

    fn back_to_hub(&mut self) {
        self.hub.unmount();
        self.keyboard_input.clear();
        self.message = None;
        self.screen = Screen::Hub;
    }

    // Creation failures are only logged: the user stays on the controls screen.
    fn request_new_game(&mut self, game: GameId) -> anyhow::Result<()> {
        let url = self.config.new_game_url()?;
        let events_tx = self.events_tx.clone();
        thread::spawn(move || match network::request_new_game(url) {
            Ok(game_id) => {
                info!("Created {:?} game {}", game, game_id);
                let _ = events_tx.send(IncomingEvent::GameCreated { game, game_id });
            }
            Err(err) => error!("Cannot create {:?} game: {:#}", game, err),
        });
        Ok(())
    }

    fn connect(&mut self, game: GameId, game_id: String, role: SessionRole) -> anyhow::Result<()> {
        self.keyboard_input.clear();
        self.message = None;
        self.screen = match game {
            GameId::Chess => Screen::Chess(self.start_session(game_id, role)?),
            GameId::Clobber => Screen::Clobber(self.start_session(game_id, role)?),
            GameId::TicTacToe => {
                return Err(anyhow!(internal_error_message!("{:?} has no server", game)));
            }
        };
        Ok(())
    }

    fn start_session<G: RemoteGame>(
        &mut self, game_id: String, role: SessionRole,
    ) -> anyhow::Result<RemoteScreen<G>> {
        let url = self.config.ws_url(&game_id)?;
        let session_id = self.next_session_id;
        self.next_session_id += 1;
        let (actions_tx, actions_rx) = mpsc::channel();
        let events_tx = self.events_tx.clone();
        network::spawn_session(url, actions_rx, move |event| {
            events_tx.send(IncomingEvent::Socket { session_id, event }).is_ok()
        });
        Ok(RemoteScreen {
            session_id,
            state: ClientState::new(game_id, role, actions_tx),
            cursor: bottom_left(G::SHAPE),
        })
    }

    fn process_event(&mut self, event: IncomingEvent) -> anyhow::Result<()> {
        match event {
            IncomingEvent::Terminal(term_event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.quit = true;
                } else if self.alert.take().is_none() {
                    self.process_key(key.code)?;
                }
            }
            IncomingEvent::Terminal(_) => {}
            IncomingEvent::Tick => {
                // Any event triggers repaint, so no additional action is required.
            }
            IncomingEvent::Socket { session_id, event } => {
                let events = match &mut self.screen {
                    Screen::Chess(screen) if screen.session_id == session_id => screen.on_socket_event(event),
                    Screen::Clobber(screen) if screen.session_id == session_id => screen.on_socket_event(event),
                    _ => {
                        debug!("Dropping event from closed session {}: {:?}", session_id, event);
                        vec![]
                    }
                };
                for event in events {
                    match event {
                        NotableEvent::BoardUpdated => {}
                        NotableEvent::GameOver(game_state) => {
                            self.message = Some(format!("Game over - {}", game_state));
                        }
                        NotableEvent::Alert(text) => self.alert = Some(text),
                    }
                }
            }
            IncomingEvent::GameCreated { game, game_id } => match self.screen {
                Screen::Controls { game: current } if current == game => {
                    self.connect(game, game_id, SessionRole::Creator)?;
                }
                _ => debug!("Ignoring created game {}: user has left the controls screen", game_id),
            },
        }
        Ok(())
    }

    fn process_key(&mut self, code: KeyCode) -> anyhow::Result<()> {
        match self.screen {
            Screen::Hub => match code {
                KeyCode::Up => self.hub.move_cursor(-1),
                KeyCode::Down => self.hub.move_cursor(1),
                KeyCode::Enter => {
                    let game = self.hub.mount_at_cursor();
                    self.open_game(game);
                }
                KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                _ => {}
            },
            Screen::Controls { game } => match code {
                KeyCode::Esc => self.back_to_hub(),
                KeyCode::Tab if game == GameId::Clobber => {
                    self.keyboard_input.clear();
                    self.screen = Screen::LocalClobber(LocalClobberScreen::new(None));
                }
                KeyCode::BackTab if game == GameId::Clobber => {
                    self.keyboard_input.clear();
                    self.screen =
                        Screen::LocalClobber(LocalClobberScreen::new(Some(MinimaxPlayer::default())));
                }
                KeyCode::Char(ch) if !ch.is_whitespace() => self.keyboard_input.push(ch),
                KeyCode::Backspace => {
                    self.keyboard_input.pop();
                }
                KeyCode::Enter => {
                    let game_id = self.keyboard_input.trim().to_owned();
                    if game_id.is_empty() {
                        self.request_new_game(game)?;
                    } else {
                        self.connect(game, game_id, SessionRole::Joiner)?;
                    }
                }
                _ => {}
            },
            _ => self.process_board_key(code),
        }
        Ok(())
    }

    fn process_board_key(&mut self, code: KeyCode) {
        let shape = self.board_shape();
        match code {
            KeyCode::Esc => self.back_to_hub(),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(' ') => self.click_at_cursor(),
            KeyCode::Char('r') => self.restart_local(),
            KeyCode::Char('u') => self.undo_local(),
            KeyCode::Char(ch) if ch.is_ascii_alphanumeric() => self.keyboard_input.push(ch),
            KeyCode::Backspace => {
                self.keyboard_input.pop();
            }
            KeyCode::Enter if self.keyboard_input.is_empty() => self.click_at_cursor(),
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.keyboard_input);
                match Coord::from_algebraic(&input, shape) {
                    Some(pos) => {
                        self.set_cursor(pos);
                        self.click_at_cursor();
                    }
                    None => self.message = Some(format!("Unknown square: '{}'", input)),
                }
            }
            _ => {}
        }
    }

    fn board_shape(&self) -> BoardShape {
        match self.screen {
            Screen::Chess(_) => RemoteChess::SHAPE,
            Screen::Clobber(_) | Screen::LocalClobber(_) => BoardShape::CLOBBER,
            Screen::TicTacToe(_) => TicTacToeGame::SHAPE,
            Screen::Hub | Screen::Controls { .. } => BoardShape::CHESS,
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut Coord> {
        match &mut self.screen {
            Screen::Chess(screen) => Some(&mut screen.cursor),
            Screen::Clobber(screen) => Some(&mut screen.cursor),
            Screen::LocalClobber(screen) => Some(&mut screen.cursor),
            Screen::TicTacToe(screen) => Some(&mut screen.cursor),
            Screen::Hub | Screen::Controls { .. } => None,
        }
    }

    fn set_cursor(&mut self, pos: Coord) {
        if let Some(cursor) = self.cursor_mut() {
            *cursor = pos;
        }
    }

    fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        let shape = self.board_shape();
        if let Some(cursor) = self.cursor_mut() {
            if let Some(pos) = cursor.offset(d_row, d_col, shape) {
                *cursor = pos;
            }
        }
    }

    fn click_at_cursor(&mut self) {
        self.message = match &mut self.screen {
            Screen::Chess(screen) => {
                screen.state.click(screen.cursor);
                None
            }
            Screen::Clobber(screen) => {
                screen.state.click(screen.cursor);
                None
            }
            Screen::LocalClobber(screen) => screen.click(screen.cursor),
            Screen::TicTacToe(screen) => match screen.game.try_place(screen.cursor) {
                Ok(_) => None,
                Err(err) => Some(err.to_string()),
            },
            Screen::Hub | Screen::Controls { .. } => None,
        };
    }

    fn restart_local(&mut self) {
        match &mut self.screen {
            Screen::LocalClobber(screen) => {
                screen.game.reset();
                screen.selection.clear();
            }
            Screen::TicTacToe(screen) => screen.game.reset(),
            _ => return,
        }
        self.message = None;
    }

    fn undo_local(&mut self) {
        if let Screen::LocalClobber(screen) = &mut self.screen {
            self.message = screen.undo();
        }
    }

    fn render(&self, stdout: &mut io::Stdout, app_start_time: Instant) -> io::Result<()> {
        execute!(stdout, cursor::MoveTo(0, 0))?;
        let body = match &self.screen {
            Screen::Hub => tui::render_hub(&self.hub),
            Screen::Controls { game } => tui::render_controls(&game.entry(), *game == GameId::Clobber),
            Screen::Chess(screen) => tui::render_remote(&screen.state, screen.cursor),
            Screen::Clobber(screen) => tui::render_remote(&screen.state, screen.cursor),
            Screen::LocalClobber(screen) => {
                tui::render_local_clobber(&screen.game, &screen.selection, screen.cursor, screen.computer)
            }
            Screen::TicTacToe(screen) => tui::render_tic_tac_toe(&screen.game, screen.cursor),
        };
        writeln_raw(stdout, format!("{}\n", body))?;

        if !matches!(self.screen, Screen::Hub) {
            // Simulate cursor: real cursor blinking is broken with Show/Hide.
            let show_cursor = app_start_time.elapsed().as_millis() % 1000 >= 500;
            let cursor = if show_cursor { '▂' } else { ' ' };
            writeln_raw(stdout, format!("> {}{}\n", self.keyboard_input, cursor))?;
        }
        if let Some(ref msg) = self.message {
            writeln_raw(stdout, msg.clone().with(style::Color::Magenta))?;
        }
        if let Some(ref alert) = self.alert {
            writeln_raw(stdout, alert.clone().with(style::Color::Red))?;
            writeln_raw(stdout, "Press any key to continue".with(style::Color::DarkGrey))?;
        }
        execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        Ok(())
    }
}

pub fn run(config: ClientConfig, target: LaunchTarget) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(config, tx.clone());
    app.launch(target)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    };
    let app_start_time = Instant::now();

    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        loop {
            match term_event::read() {
                Ok(ev) => {
                    if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    error!("Cannot read terminal input: {}", err);
                    break;
                }
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(100));
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    app.render(&mut stdout, app_start_time)?;
    for event in rx {
        app.process_event(event)?;
        if app.quit {
            return Ok(());
        }
        app.render(&mut stdout, app_start_time)?;
    }
    Err(anyhow!(internal_error_message!("unexpected end of events stream")))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> IncomingEvent {
        IncomingEvent::Terminal(term_event::Event::Key(term_event::KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn app() -> (App, mpsc::Receiver<IncomingEvent>) {
        let (tx, rx) = mpsc::channel();
        // Nothing listens there, so sessions fail to connect in the background.
        let config = ClientConfig { server_address: "127.0.0.1:1".to_owned(), ..ClientConfig::default() };
        (App::new(config, tx), rx)
    }

    #[test]
    fn hub_navigation() {
        let (mut app, _rx) = app();
        app.process_event(key(KeyCode::Down)).unwrap();
        app.process_event(key(KeyCode::Down)).unwrap();
        app.process_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.hub.mounted(), Some(GameId::TicTacToe));
        assert!(matches!(app.screen, Screen::TicTacToe(_)));
        app.process_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.hub.mounted(), None);
        assert!(matches!(app.screen, Screen::Hub));
        app.process_event(key(KeyCode::Char('q'))).unwrap();
        assert!(app.quit);
    }

    #[test]
    fn typed_squares_place_marks() {
        let (mut app, _rx) = app();
        app.launch(LaunchTarget::TicTacToe).unwrap();
        for ch in "c3".chars() {
            app.process_event(key(KeyCode::Char(ch))).unwrap();
        }
        app.process_event(key(KeyCode::Enter)).unwrap();
        // Space clicks the cursor, which has moved to the typed square.
        app.process_event(key(KeyCode::Char(' '))).unwrap();
        let Screen::TicTacToe(screen) = &app.screen else { panic!() };
        assert_eq!(screen.cursor, Coord::from_zero_based(2, 2));
        assert!(screen.game.grid()[Coord::from_zero_based(2, 2)].is_some());
        assert_eq!(app.message.as_deref(), Some("square is already taken"));
    }

    #[test]
    fn local_clobber_move() {
        let (mut app, _rx) = app();
        app.launch(LaunchTarget::LocalClobber { computer: None }).unwrap();
        // Black moves first: a1 is black and a2 above it is white.
        for input in ["a1", "a2"] {
            for ch in input.chars() {
                app.process_event(key(KeyCode::Char(ch))).unwrap();
            }
            app.process_event(key(KeyCode::Enter)).unwrap();
        }
        let Screen::LocalClobber(screen) = &app.screen else { panic!() };
        assert_eq!(screen.game.active_force(), Force::White);
        assert_eq!(screen.game.grid()[bottom_left(BoardShape::CLOBBER)], None);
    }

    #[test]
    fn stale_session_events_are_dropped() {
        let (mut app, _rx) = app();
        app.launch(LaunchTarget::Remote(GameId::Chess, SessionStart::Join("g1".to_owned()))).unwrap();
        let Screen::Chess(screen) = &app.screen else { panic!() };
        let session_id = screen.session_id;
        app.process_event(IncomingEvent::Socket { session_id: session_id + 1, event: SocketEvent::Opened })
            .unwrap();
        let Screen::Chess(screen) = &app.screen else { panic!() };
        assert!(!screen.state.is_socket_open());
        app.process_event(IncomingEvent::Socket { session_id, event: SocketEvent::Opened }).unwrap();
        let Screen::Chess(screen) = &app.screen else { panic!() };
        assert!(screen.state.is_socket_open());
    }

    #[test]
    fn server_error_blocks_until_key() {
        let (mut app, _rx) = app();
        app.launch(LaunchTarget::Remote(GameId::Clobber, SessionStart::Join("g1".to_owned()))).unwrap();
        let text = SocketEvent::Text(r#"{"error": "Not your turn"}"#.to_owned());
        app.process_event(IncomingEvent::Socket { session_id: 0, event: text }).unwrap();
        assert_eq!(app.alert.as_deref(), Some("Error: Not your turn"));
        app.process_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.alert, None);
        // The key only dismissed the alert.
        assert!(matches!(app.screen, Screen::Clobber(_)));
    }

    #[test]
    fn created_game_is_joined_as_creator() {
        let (mut app, _rx) = app();
        app.open_game(GameId::Chess);
        app.process_event(IncomingEvent::GameCreated { game: GameId::Clobber, game_id: "x".to_owned() })
            .unwrap();
        assert!(matches!(app.screen, Screen::Controls { .. }));
        app.process_event(IncomingEvent::GameCreated { game: GameId::Chess, game_id: "x".to_owned() })
            .unwrap();
        let Screen::Chess(screen) = &app.screen else { panic!() };
        assert_eq!(screen.state.role(), SessionRole::Creator);
        assert_eq!(screen.state.game_id(), "x");
    }

    fn type_square(app: &mut App, square: &str) {
        for ch in square.chars() {
            app.process_event(key(KeyCode::Char(ch))).unwrap();
        }
        app.process_event(key(KeyCode::Enter)).unwrap();
    }

    #[test]
    fn computer_replies_and_undo_takes_back_both() {
        let (mut app, _rx) = app();
        app.launch(LaunchTarget::LocalClobber { computer: Some(MinimaxPlayer::default()) }).unwrap();
        type_square(&mut app, "a1");
        type_square(&mut app, "a2");
        let Screen::LocalClobber(screen) = &app.screen else { panic!() };
        assert_eq!(screen.game.num_moves(), 2);
        assert_eq!(screen.game.active_force(), Force::Black);

        app.process_event(key(KeyCode::Char('u'))).unwrap();
        let Screen::LocalClobber(screen) = &app.screen else { panic!() };
        assert_eq!(screen.game.num_moves(), 0);
        assert_eq!(screen.game.grid(), ClobberGame::new().grid());
        assert_eq!(app.message, None);
    }

    #[test]
    fn controls_open_game_against_computer() {
        let (mut app, _rx) = app();
        app.open_game(GameId::Clobber);
        app.process_event(key(KeyCode::BackTab)).unwrap();
        let Screen::LocalClobber(screen) = &app.screen else { panic!() };
        assert_eq!(screen.computer, Some(MinimaxPlayer::default()));
    }
}
