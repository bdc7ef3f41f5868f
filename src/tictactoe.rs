//! Tic-tac-toe on a 5x5 board where five marks in a line win.
//!
//! This is the only game played entirely locally: there is no server and no legal-move
//! list, so the rules live here.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cell::Pictogram;
use crate::coord::{BoardShape, Coord};
use crate::grid::{Square, TicTacToeGrid};


pub const WIN_LENGTH: usize = 5;

// Row, column and both diagonals.
const LINES: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

impl Pictogram for Mark {
    fn pictogram(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TicTacToeStatus {
    Active,
    Victory(Mark),
    Draw,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlaceError {
    GameOver,
    OutOfBounds,
    Occupied,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::GameOver => write!(f, "the game is over"),
            PlaceError::OutOfBounds => write!(f, "square is outside the board"),
            PlaceError::Occupied => write!(f, "square is already taken"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TicTacToeGame {
    grid: TicTacToeGrid,
    current: Mark,
    status: TicTacToeStatus,
}

impl TicTacToeGame {
    pub const SHAPE: BoardShape = BoardShape::TIC_TAC_TOE;
    pub const FIRST_TO_MOVE: Mark = Mark::X;

    pub fn new() -> Self {
        TicTacToeGame {
            grid: TicTacToeGrid::new(Self::SHAPE),
            current: Self::FIRST_TO_MOVE,
            status: TicTacToeStatus::Active,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Tic-tac-toe: reset");
    }

    pub fn grid(&self) -> &TicTacToeGrid { &self.grid }
    pub fn current(&self) -> Mark { self.current }
    pub fn status(&self) -> TicTacToeStatus { self.status }
    pub fn is_over(&self) -> bool { self.status != TicTacToeStatus::Active }

    // The board is left untouched when an error is returned.
    pub fn try_place(&mut self, pos: Coord) -> Result<TicTacToeStatus, PlaceError> {
        if self.is_over() {
            return Err(PlaceError::GameOver);
        }
        match self.grid.square(pos) {
            Square::OffBoard => return Err(PlaceError::OutOfBounds),
            Square::Occupied(_) => return Err(PlaceError::Occupied),
            Square::Vacant => {}
        }
        let mark = self.current;
        self.grid[pos] = Some(mark);
        debug!("Tic-tac-toe: {} at {}", mark, pos.to_algebraic(Self::SHAPE));
        if completes_line(&self.grid, pos) {
            info!("Tic-tac-toe: {} wins", mark);
            self.status = TicTacToeStatus::Victory(mark);
        } else if self.grid.is_full() {
            info!("Tic-tac-toe: draw");
            self.status = TicTacToeStatus::Draw;
        } else {
            self.current = mark.other();
        }
        Ok(self.status)
    }
}

// Only lines through the last placed mark can have changed, so only those are checked.
// Each line is walked end to end with a counter that restarts on every mismatch.
fn completes_line(grid: &TicTacToeGrid, pos: Coord) -> bool {
    let Some(mark) = grid[pos] else {
        return false;
    };
    let shape = grid.shape();
    LINES.iter().any(|&(d_row, d_col)| {
        let mut start = pos;
        while let Some(prev) = start.offset(-d_row, -d_col, shape) {
            start = prev;
        }
        let mut count = 0;
        let mut cursor = Some(start);
        while let Some(coord) = cursor {
            if grid[coord] == Some(mark) {
                count += 1;
                if count == WIN_LENGTH {
                    return true;
                }
            } else {
                count = 0;
            }
            cursor = coord.offset(d_row, d_col, shape);
        }
        false
    })
}
