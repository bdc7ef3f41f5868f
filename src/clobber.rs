// Clobber: 6x6 board filled with alternating stones. A move takes an own stone onto an
// orthogonally adjacent opponent stone, which is removed. The side with no move loses.
//
// Networked games only use the board codec from this module: legality and game end are
// decided by the server. `ClobberGame` is the local hot-seat version.

use std::fmt;

use itertools::Itertools;
use log::{debug, info};

use crate::coord::{BoardShape, Coord};
use crate::event::LegalMove;
use crate::force::Force;
use crate::grid::{ClobberGrid, GenericGrid};


const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const WHITE_STONE_CODE: i64 = 0;
pub const BLACK_STONE_CODE: i64 = 1;

pub fn initial_clobber_grid() -> ClobberGrid {
    GenericGrid::from_fn(BoardShape::CLOBBER, |coord| {
        if (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2 == 0 {
            Some(Force::White)
        } else {
            Some(Force::Black)
        }
    })
}

// Any code other than the two stone codes, including `null`, is an empty square.
pub fn stone_from_code(code: &serde_json::Value) -> Option<Force> {
    match code.as_i64() {
        Some(WHITE_STONE_CODE) => Some(Force::White),
        Some(BLACK_STONE_CODE) => Some(Force::Black),
        _ => None,
    }
}

pub fn stone_to_code(stone: Option<Force>) -> serde_json::Value {
    match stone {
        Some(Force::White) => WHITE_STONE_CODE.into(),
        Some(Force::Black) => BLACK_STONE_CODE.into(),
        None => serde_json::Value::Null,
    }
}

pub fn codes_to_grid(rows: &[Vec<serde_json::Value>]) -> Result<ClobberGrid, String> {
    let shape = BoardShape::CLOBBER;
    if rows.len() != shape.num_rows as usize {
        return Err(format!(
            "invalid Clobber board: has {} rows, expected {}",
            rows.len(),
            shape.num_rows
        ));
    }
    if let Some((idx, row)) = rows.iter().find_position(|row| row.len() != shape.num_cols as usize) {
        return Err(format!(
            "invalid Clobber board: row {} has {} columns, expected {}",
            idx,
            row.len(),
            shape.num_cols
        ));
    }
    Ok(GenericGrid::from_fn(shape, |coord| {
        stone_from_code(&rows[coord.row.to_zero_based() as usize][coord.col.to_zero_based() as usize])
    }))
}

pub fn grid_to_codes(grid: &ClobberGrid) -> Vec<Vec<serde_json::Value>> {
    let shape = grid.shape();
    shape
        .rows()
        .map(|row| shape.cols().map(|col| stone_to_code(grid[Coord::new(row, col)])).collect())
        .collect()
}

pub fn legal_clobber_moves(grid: &ClobberGrid, force: Force) -> Vec<(Coord, Coord)> {
    let shape = grid.shape();
    let mut moves = vec![];
    for (from, stone) in grid.iter() {
        if *stone != Some(force) {
            continue;
        }
        for (d_row, d_col) in DIRECTIONS {
            if let Some(to) = from.offset(d_row, d_col, shape) {
                if grid[to] == Some(force.opponent()) {
                    moves.push((from, to));
                }
            }
        }
    }
    moves
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClobberStatus {
    Active,
    Victory(Force),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClobberMoveError {
    GameOver,
    OutOfBounds,
    NotYourStone,
    IllegalCapture,
}

impl fmt::Display for ClobberMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClobberMoveError::GameOver => write!(f, "the game is over"),
            ClobberMoveError::OutOfBounds => write!(f, "square is outside the board"),
            ClobberMoveError::NotYourStone => write!(f, "no own stone on the starting square"),
            ClobberMoveError::IllegalCapture => {
                write!(f, "a stone can only capture an adjacent opponent stone")
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClobberGame {
    grid: ClobberGrid,
    active_force: Force,
    status: ClobberStatus,
    // Captures in the order they were made, as (from, to).
    history: Vec<(Coord, Coord)>,
}

impl ClobberGame {
    pub const FIRST_TO_MOVE: Force = Force::Black;

    pub fn new() -> Self {
        Self::from_position(initial_clobber_grid(), Self::FIRST_TO_MOVE)
    }

    // Arbitrary position with `active_force` to move and an empty history.
    pub fn from_position(grid: ClobberGrid, active_force: Force) -> Self {
        let status = if legal_clobber_moves(&grid, active_force).is_empty() {
            ClobberStatus::Victory(active_force.opponent())
        } else {
            ClobberStatus::Active
        };
        ClobberGame { grid, active_force, status, history: vec![] }
    }

    pub fn reset(&mut self) { *self = Self::new(); }

    pub fn grid(&self) -> &ClobberGrid { &self.grid }
    pub fn active_force(&self) -> Force { self.active_force }
    pub fn status(&self) -> ClobberStatus { self.status }
    pub fn num_moves(&self) -> usize { self.history.len() }

    // Board coordinates of `legal_moves`.
    pub fn legal_captures(&self) -> Vec<(Coord, Coord)> {
        match self.status {
            ClobberStatus::Active => legal_clobber_moves(&self.grid, self.active_force),
            ClobberStatus::Victory(_) => vec![],
        }
    }

    // Same shape as the server sends, so the selection controller works unchanged.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        let shape = self.grid.shape();
        self.legal_captures()
            .into_iter()
            .map(|(from, to)| LegalMove::new(from.to_algebraic(shape), to.to_algebraic(shape)))
            .collect()
    }

    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<ClobberStatus, ClobberMoveError> {
        if self.status != ClobberStatus::Active {
            return Err(ClobberMoveError::GameOver);
        }
        let shape = self.grid.shape();
        if !shape.contains_coord(from) || !shape.contains_coord(to) {
            return Err(ClobberMoveError::OutOfBounds);
        }
        if self.grid[from] != Some(self.active_force) {
            return Err(ClobberMoveError::NotYourStone);
        }
        let adjacent = DIRECTIONS.iter().any(|&(d_row, d_col)| from.offset(d_row, d_col, shape) == Some(to));
        if !adjacent || self.grid[to] != Some(self.active_force.opponent()) {
            return Err(ClobberMoveError::IllegalCapture);
        }
        self.apply_capture(from, to);
        debug!(
            "Clobber: {} {} -> {}",
            self.active_force.opponent(),
            from.to_algebraic(shape),
            to.to_algebraic(shape)
        );
        if let ClobberStatus::Victory(winner) = self.status {
            info!("Clobber: {} has no moves left, {} wins", self.active_force, winner);
        }
        Ok(self.status)
    }

    // Takes back the last capture. Returns it, or `None` if there is nothing to undo.
    pub fn undo_move(&mut self) -> Option<(Coord, Coord)> {
        let (from, to) = self.history.pop()?;
        let mover = self.active_force.opponent();
        self.grid[from] = Some(mover);
        self.grid[to] = Some(mover.opponent());
        self.active_force = mover;
        self.status = ClobberStatus::Active;
        Some((from, to))
    }

    // No validation or logging: search code feeds it moves from `legal_captures` only.
    pub(crate) fn apply_capture(&mut self, from: Coord, to: Coord) {
        self.grid[to] = self.grid[from].take();
        self.history.push((from, to));
        let mover = self.active_force;
        self.active_force = mover.opponent();
        if legal_clobber_moves(&self.grid, self.active_force).is_empty() {
            self.status = ClobberStatus::Victory(mover);
        }
    }
}
