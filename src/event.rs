// Wire messages exchanged with the game server. The server contract is external: only the
// fields the client consumes are modeled, everything else is ignored when reading.

use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::Value;


#[derive(Clone, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct LegalMove {
    pub from: String,
    pub to: String,
}

#[derive(Clone, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientAction {
    JoinGame,
    GetBoard,
    MakeMove {
        #[serde(rename = "move")]
        turn: MoveRequest,
    },
}

// Every field is optional and several may arrive in one message. Fields are kept as raw JSON so
// that a field of the wrong type spoils only itself; the client decodes each one separately.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    // Chess board: FEN string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<Value>,
    // Clobber board: rows of cell codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_moves: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

// Null, `false`, zero and the empty string count as a missing field.
pub fn present_field(field: &Option<Value>) -> Option<&Value> {
    let value = field.as_ref()?;
    let is_blank = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if is_blank { None } else { Some(value) }
}

// Response to `GET /new_game/`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub game_id: String,
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn outbound_shapes() {
        assert_eq!(serde_json::to_value(ClientAction::JoinGame).unwrap(), json!({"action": "join_game"}));
        assert_eq!(serde_json::to_value(ClientAction::GetBoard).unwrap(), json!({"action": "get_board"}));
        let promote = ClientAction::MakeMove {
            turn: MoveRequest::new("e7".to_owned(), "e8".to_owned(), Some("Q".to_owned())),
        };
        assert_eq!(
            serde_json::to_value(promote).unwrap(),
            json!({"action": "make_move", "move": {"from": "e7", "to": "e8", "promotion": "Q"}})
        );
        let quiet = ClientAction::MakeMove {
            turn: MoveRequest::new("e2".to_owned(), "e4".to_owned(), None),
        };
        assert_eq!(
            serde_json::to_value(quiet).unwrap(),
            json!({"action": "make_move", "move": {"from": "e2", "to": "e4"}})
        );
    }

    #[test]
    fn inbound_subset() {
        let msg: ServerMessage = serde_json::from_str(
            r#"{"turn": "black", "legalMoves": [{"from": "e7", "to": "e5"}], "extra": 42}"#,
        )
        .unwrap();
        assert_eq!(msg.turn, Some(json!("black")));
        assert_eq!(msg.legal_moves, Some(json!([{"from": "e7", "to": "e5"}])));
        assert_eq!(msg.fen, None);
        assert_eq!(msg.game_state, None);

        // Wrong types are kept for the client to reject field by field.
        let msg: ServerMessage = serde_json::from_str(r#"{"board": [0, 1], "turn": 7}"#).unwrap();
        assert_eq!(msg.board, Some(json!([0, 1])));
        assert_eq!(msg.turn, Some(json!(7)));
    }

    #[test]
    fn blank_fields_are_missing() {
        assert_eq!(present_field(&None), None);
        assert_eq!(present_field(&Some(json!(null))), None);
        assert_eq!(present_field(&Some(json!(""))), None);
        assert_eq!(present_field(&Some(json!(false))), None);
        assert_eq!(present_field(&Some(json!(0))), None);
        assert_eq!(present_field(&Some(json!("x"))), Some(&json!("x")));
        assert_eq!(present_field(&Some(json!([]))), Some(&json!([])));
    }

    #[test]
    fn new_game_response() {
        let resp: NewGameResponse = serde_json::from_str(r#"{"game_id": "abc-123"}"#).unwrap();
        assert_eq!(resp.game_id, "abc-123");
    }
}
