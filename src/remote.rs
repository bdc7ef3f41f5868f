// Per-game parameters of server-backed games. Everything else about a session (socket
// lifecycle, field handling, selection) is shared and lives in `client`.

use std::fmt;

use crate::cell::Pictogram;
use crate::clobber::{codes_to_grid, initial_clobber_grid};
use crate::coord::BoardShape;
use crate::event::{ServerMessage, present_field};
use crate::fen::{fen_to_grid, initial_chess_grid};
use crate::force::Force;
use crate::grid::GenericGrid;
use crate::piece::ChessPiece;
use crate::selection::OwnedPiece;


pub trait RemoteGame {
    type Piece: Clone + fmt::Debug + OwnedPiece + Pictogram;

    const NAME: &'static str;
    const SHAPE: BoardShape;
    // Color taken by the player who created the game. The joining player gets the other one.
    const CREATOR_FORCE: Force;
    // Displayed turn until the server says otherwise.
    const FIRST_TO_MOVE: Force;

    // Shown before the server sends the first board.
    fn initial_grid() -> GenericGrid<Self::Piece>;

    // `None` if the message carries no board for this game. A board of the wrong JSON shape is a
    // decoding error like any other.
    fn decode_board(message: &ServerMessage) -> Option<Result<GenericGrid<Self::Piece>, String>>;
}

#[derive(Clone, Copy, Debug)]
pub struct RemoteChess;

#[derive(Clone, Copy, Debug)]
pub struct RemoteClobber;

impl RemoteGame for RemoteChess {
    type Piece = ChessPiece;

    const NAME: &'static str = "chess";
    const SHAPE: BoardShape = BoardShape::CHESS;
    const CREATOR_FORCE: Force = Force::White;
    const FIRST_TO_MOVE: Force = Force::White;

    fn initial_grid() -> GenericGrid<ChessPiece> { initial_chess_grid() }

    fn decode_board(message: &ServerMessage) -> Option<Result<GenericGrid<ChessPiece>, String>> {
        present_field(&message.fen).map(|fen| match fen.as_str() {
            Some(fen) => fen_to_grid(fen),
            None => Err(format!("invalid FEN: expected a string, got {}", fen)),
        })
    }
}

impl RemoteGame for RemoteClobber {
    type Piece = Force;

    const NAME: &'static str = "clobber";
    const SHAPE: BoardShape = BoardShape::CLOBBER;
    const CREATOR_FORCE: Force = Force::Black;
    const FIRST_TO_MOVE: Force = Force::Black;

    fn initial_grid() -> GenericGrid<Force> { initial_clobber_grid() }

    fn decode_board(message: &ServerMessage) -> Option<Result<GenericGrid<Force>, String>> {
        present_field(&message.board).map(|board| {
            let rows = serde_json::from_value::<Vec<Vec<serde_json::Value>>>(board.clone())
                .map_err(|err| format!("invalid Clobber board: {}", err))?;
            codes_to_grid(&rows)
        })
    }
}
