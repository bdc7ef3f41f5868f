use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::cell::Pictogram;
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct ChessPiece {
    pub kind: PieceKind,
    pub force: Force,
}

impl PieceKind {
    // (upper-case letter, white glyph, black glyph)
    fn glyphs(self) -> (char, char, char) {
        match self {
            PieceKind::Pawn => ('P', '♙', '♟'),
            PieceKind::Knight => ('N', '♘', '♞'),
            PieceKind::Bishop => ('B', '♗', '♝'),
            PieceKind::Rook => ('R', '♖', '♜'),
            PieceKind::Queen => ('Q', '♕', '♛'),
            PieceKind::King => ('K', '♔', '♚'),
        }
    }

    pub fn letter(self) -> char { self.glyphs().0 }

    // Case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        PieceKind::iter().find(|kind| kind.letter() == letter)
    }
}

impl ChessPiece {
    // FEN letter: upper-case for white, lower-case for black.
    pub fn to_fen_char(self) -> char {
        match self.force {
            Force::White => self.kind.letter(),
            Force::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let force = if ch.is_ascii_uppercase() { Force::White } else { Force::Black };
        PieceKind::from_letter(ch).map(|kind| ChessPiece::new(kind, force))
    }

    // Two-character code: side letter followed by lower-case kind letter, e.g. "wp", "bk".
    pub fn code(self) -> String {
        let side = match self.force {
            Force::White => 'w',
            Force::Black => 'b',
        };
        format!("{}{}", side, self.kind.letter().to_ascii_lowercase())
    }
}

impl Pictogram for ChessPiece {
    fn pictogram(&self) -> char {
        let (_, white, black) = self.kind.glyphs();
        match self.force {
            Force::White => white,
            Force::Black => black,
        }
    }
}
