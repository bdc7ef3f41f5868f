// Improvement potential: Support `wss://` and `https://` servers.

use std::fmt;
use std::io;
use std::net::{Shutdown, TcpStream};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use log::{debug, info, warn};
use serde::Serialize;
use tungstenite::handshake::HandshakeError;
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};
use url::Url;

use game_hub::event::{ClientAction, NewGameResponse};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SocketEvent {
    Opened,
    Text(String),
    Error(String),
    Closed,
}

#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    Protocol(String),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Socket(err) => write!(f, "socket error: {}", err),
            CommunicationError::Serde(err) => write!(f, "serialization error: {}", err),
            CommunicationError::Protocol(err) => write!(f, "protocol error: {}", err),
        }
    }
}

impl std::error::Error for CommunicationError {}

pub fn write_obj<T, S>(socket: &mut WebSocket<S>, obj: &T) -> Result<(), CommunicationError>
where
    T: Serialize,
    S: io::Read + io::Write,
{
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    socket.send(Message::text(serialized)).map_err(CommunicationError::Socket)
}

// Returns `None` for control frames, which need no handling beyond what tungstenite does.
pub fn read_text<S>(socket: &mut WebSocket<S>) -> Result<Option<String>, CommunicationError>
where
    S: io::Read + io::Write,
{
    match socket.read().map_err(CommunicationError::Socket)? {
        Message::Text(text) => Ok(Some(text.as_str().to_owned())),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(None),
        Message::Close(frame) => {
            debug!("Received close frame: {:?}", frame);
            Ok(None)
        }
        msg @ Message::Binary(_) => {
            Err(CommunicationError::Protocol(format!("Expected text, got {:?}", msg)))
        }
    }
}

// TODO: Instead of cloning the socket, consider calling TcpStream.set_nonblocking on the
//   underlying stream and doing read/writes in the same thread.
pub fn clone_websocket(socket: &WebSocket<TcpStream>) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = socket.get_config().clone();
    Ok(WebSocket::from_raw_socket(stream, Role::Client, Some(config)))
}

fn open_websocket(url: &Url) -> Result<WebSocket<TcpStream>, CommunicationError> {
    let host = url
        .host_str()
        .ok_or_else(|| CommunicationError::Protocol(format!("No host in {}", url)))?;
    let port = url.port_or_known_default().unwrap_or(80);
    let stream = TcpStream::connect((host, port))
        .map_err(|err| CommunicationError::Socket(tungstenite::Error::Io(err)))?;
    match tungstenite::client(url.clone(), stream) {
        Ok((socket, _)) => Ok(socket),
        Err(HandshakeError::Failure(err)) => Err(CommunicationError::Socket(err)),
        Err(HandshakeError::Interrupted(_)) => {
            Err(CommunicationError::Protocol("WebSocket handshake interrupted".to_owned()))
        }
    }
}

// Runs a WebSocket session in background threads: a reader that reports every socket event via
// `notify`, and a writer that sends `actions` until the sender side is dropped and then closes
// the socket. `notify` returns false once nobody listens anymore.
pub fn spawn_session<F>(url: Url, actions: mpsc::Receiver<ClientAction>, notify: F)
where
    F: Fn(SocketEvent) -> bool + Send + 'static,
{
    thread::spawn(move || {
        info!("Connecting to {}...", url);
        let connected = open_websocket(&url).and_then(|socket_in| {
            let socket_out = clone_websocket(&socket_in)
                .map_err(|err| CommunicationError::Socket(tungstenite::Error::Io(err)))?;
            Ok((socket_in, socket_out))
        });
        let (mut socket_in, mut socket_out) = match connected {
            Ok(sockets) => sockets,
            Err(err) => {
                warn!("Cannot connect to {}: {}", url, err);
                notify(SocketEvent::Error(err.to_string()));
                notify(SocketEvent::Closed);
                return;
            }
        };
        notify(SocketEvent::Opened);

        thread::spawn(move || {
            for action in actions {
                if let Err(err) = write_obj(&mut socket_out, &action) {
                    warn!("Cannot send {:?}: {}", action, err);
                    break;
                }
            }
            debug!("Session over, closing socket");
            if let Err(err) = socket_out.close(None) {
                debug!("Cannot send close frame: {}", err);
            }
            if let Err(err) = socket_out.flush() {
                debug!("Cannot flush socket: {}", err);
            }
            if let Err(err) = socket_out.get_ref().shutdown(Shutdown::Both) {
                debug!("Cannot shut down socket: {}", err);
            }
        });

        loop {
            match read_text(&mut socket_in) {
                Ok(Some(text)) => {
                    if !notify(SocketEvent::Text(text)) {
                        break;
                    }
                }
                Ok(None) => {}
                Err(CommunicationError::Socket(
                    tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed,
                )) => {
                    notify(SocketEvent::Closed);
                    break;
                }
                Err(err @ CommunicationError::Protocol(_)) => {
                    warn!("Ignoring message: {}", err);
                }
                Err(err) => {
                    notify(SocketEvent::Error(err.to_string()));
                    notify(SocketEvent::Closed);
                    break;
                }
            }
        }
    });
}

pub fn request_new_game(url: Url) -> anyhow::Result<String> {
    let response = reqwest::blocking::get(url.clone())
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()?;
    let NewGameResponse { game_id } = response.json().context("Cannot parse new game response")?;
    Ok(game_id)
}


#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    fn server_frames(f: impl FnOnce(&mut WebSocket<io::Cursor<Vec<u8>>>)) -> WebSocket<io::Cursor<Vec<u8>>> {
        let mut server = WebSocket::from_raw_socket(io::Cursor::new(Vec::new()), Role::Server, None);
        f(&mut server);
        let bytes = server.get_ref().get_ref().clone();
        WebSocket::from_raw_socket(io::Cursor::new(bytes), Role::Client, None)
    }

    #[test]
    fn reads_text_frames() {
        let mut client = server_frames(|server| {
            write_obj(server, &ClientAction::GetBoard).unwrap();
        });
        assert_eq!(read_text(&mut client).unwrap(), Some(r#"{"action":"get_board"}"#.to_owned()));
    }

    #[test]
    fn binary_is_a_protocol_error() {
        let mut client = server_frames(|server| {
            server.send(Message::binary(vec![1, 2, 3])).unwrap();
        });
        assert!(matches!(read_text(&mut client), Err(CommunicationError::Protocol(_))));
    }

    fn session_url(port: u16) -> Url { Url::parse(&format!("ws://127.0.0.1:{}/ws/test", port)).unwrap() }

    fn spawn_test_session(url: Url) -> (mpsc::Sender<ClientAction>, mpsc::Receiver<SocketEvent>) {
        let (actions_tx, actions_rx) = mpsc::channel();
        let (events_tx, events_rx) = mpsc::channel();
        spawn_session(url, actions_rx, move |event| events_tx.send(event).is_ok());
        (actions_tx, events_rx)
    }

    fn next_event(events: &mpsc::Receiver<SocketEvent>) -> SocketEvent {
        events.recv_timeout(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn session_lifecycle() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut socket = tungstenite::accept(stream).unwrap();
            socket.send(Message::text(r#"{"turn":"white"}"#)).unwrap();
            let mut received = vec![];
            loop {
                let msg = socket.read().unwrap();
                let is_close = msg.is_close();
                received.push(msg);
                if is_close {
                    break;
                }
            }
            received
        });

        let (actions_tx, events) = spawn_test_session(session_url(port));
        assert_eq!(next_event(&events), SocketEvent::Opened);
        assert_eq!(next_event(&events), SocketEvent::Text(r#"{"turn":"white"}"#.to_owned()));

        actions_tx.send(ClientAction::GetBoard).unwrap();
        drop(actions_tx);
        assert_eq!(
            server.join().unwrap(),
            vec![Message::text(r#"{"action":"get_board"}"#), Message::Close(None)]
        );
        // The reader may see either a clean close or a reset, but it always ends with `Closed`.
        loop {
            match next_event(&events) {
                SocketEvent::Closed => break,
                SocketEvent::Error(_) => {}
                event => panic!("unexpected event {:?}", event),
            }
        }
    }

    #[test]
    fn connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let (_actions_tx, events) = spawn_test_session(session_url(port));
        assert!(matches!(next_event(&events), SocketEvent::Error(_)));
        assert_eq!(next_event(&events), SocketEvent::Closed);
    }
}
