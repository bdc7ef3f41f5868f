// Board coordinates. Row 0 is the top row as displayed, i.e. the highest rank; column 0 is
// file 'a'. Algebraic names are looked up in fixed tables, so boards are limited to 8x8.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const MAX_SIDE: u8 = 8;

const FILES: [char; MAX_SIDE as usize] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
const RANKS: [char; MAX_SIDE as usize] = ['1', '2', '3', '4', '5', '6', '7', '8'];


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub num_rows: u8,
    pub num_cols: u8,
}

impl BoardShape {
    pub const CHESS: BoardShape = BoardShape::new(8, 8);
    pub const CLOBBER: BoardShape = BoardShape::new(6, 6);
    pub const TIC_TAC_TOE: BoardShape = BoardShape::new(5, 5);

    pub const fn new(num_rows: u8, num_cols: u8) -> Self {
        assert!(num_rows > 0 && num_rows <= MAX_SIDE);
        assert!(num_cols > 0 && num_cols <= MAX_SIDE);
        BoardShape { num_rows, num_cols }
    }

    pub fn contains_row(self, row: Row) -> bool { row.to_zero_based() < self.num_rows }
    pub fn contains_col(self, col: Col) -> bool { col.to_zero_based() < self.num_cols }
    pub fn contains_coord(self, coord: Coord) -> bool {
        self.contains_row(coord.row) && self.contains_col(coord.col)
    }

    pub fn rows(self) -> impl DoubleEndedIterator<Item = Row> + Clone {
        (0..self.num_rows).map(Row::from_zero_based)
    }
    pub fn cols(self) -> impl DoubleEndedIterator<Item = Col> + Clone {
        (0..self.num_cols).map(Col::from_zero_based)
    }
    // Top-to-bottom, left-to-right.
    pub fn coords(self) -> impl Iterator<Item = Coord> + Clone {
        self.rows().cartesian_product(self.cols()).map(|(row, col)| Coord::new(row, col))
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8, // 0-based, from the top
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self { Self { idx } }
    pub fn from_algebraic(ch: char, board_shape: BoardShape) -> Option<Self> {
        let rank = RANKS[..board_shape.num_rows as usize].iter().position(|&r| r == ch)?;
        Some(Self::from_zero_based(board_shape.num_rows - rank as u8 - 1))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn to_algebraic(self, board_shape: BoardShape) -> char {
        RANKS[(board_shape.num_rows - self.idx - 1) as usize]
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self { Self { idx } }
    pub fn from_algebraic(ch: char, board_shape: BoardShape) -> Option<Self> {
        let file = FILES[..board_shape.num_cols as usize].iter().position(|&f| f == ch)?;
        Some(Self::from_zero_based(file as u8))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn to_algebraic(self) -> char { FILES[self.idx as usize] }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    pub const fn from_zero_based(row: u8, col: u8) -> Self {
        Self::new(Row::from_zero_based(row), Col::from_zero_based(col))
    }

    pub fn from_algebraic(s: &str, board_shape: BoardShape) -> Option<Self> {
        let (file, rank) = s.chars().collect_tuple()?;
        Some(Coord {
            row: Row::from_algebraic(rank, board_shape)?,
            col: Col::from_algebraic(file.to_ascii_lowercase(), board_shape)?,
        })
    }
    pub fn to_algebraic(self, board_shape: BoardShape) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic(board_shape))
    }

    // Returns the coord shifted by (`d_row`, `d_col`) if it stays on the board.
    pub fn offset(self, d_row: i8, d_col: i8, board_shape: BoardShape) -> Option<Coord> {
        let row = self.row.to_zero_based() as i8 + d_row;
        let col = self.col.to_zero_based() as i8 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        let coord = Coord::from_zero_based(row as u8, col as u8);
        board_shape.contains_coord(coord).then_some(coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.row.to_zero_based(), self.col.to_zero_based())
    }
}
