use std::{fmt, ops};

use ndarray::Array2;

use crate::coord::{BoardShape, Coord};
use crate::force::Force;
use crate::piece::ChessPiece;
use crate::tictactoe::Mark;


pub type ChessGrid = GenericGrid<ChessPiece>;
pub type ClobberGrid = GenericGrid<Force>;
pub type TicTacToeGrid = GenericGrid<Mark>;

// Result of a bounds-checked lookup.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Square<T> {
    Occupied(T),
    Vacant,
    OffBoard,
}

// Fixed-size board. The shape is set at construction and never changes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GenericGrid<T: Clone> {
    squares: Array2<Option<T>>,
}

impl<T: Clone> GenericGrid<T> {
    pub fn new(board_shape: BoardShape) -> Self {
        let dim = (board_shape.num_rows as usize, board_shape.num_cols as usize);
        GenericGrid { squares: Array2::from_elem(dim, None) }
    }

    pub fn from_fn(board_shape: BoardShape, mut f: impl FnMut(Coord) -> Option<T>) -> Self {
        let mut grid = Self::new(board_shape);
        for coord in board_shape.coords() {
            grid[coord] = f(coord);
        }
        grid
    }

    pub fn shape(&self) -> BoardShape {
        let (num_rows, num_cols) = self.squares.dim();
        BoardShape::new(num_rows as u8, num_cols as u8)
    }

    pub fn contains_coord(&self, coord: Coord) -> bool { self.shape().contains_coord(coord) }

    pub fn square(&self, pos: Coord) -> Square<&T> {
        if !self.contains_coord(pos) {
            return Square::OffBoard;
        }
        match &self[pos] {
            Some(v) => Square::Occupied(v),
            None => Square::Vacant,
        }
    }

    // Row by row, top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Option<T>)> + '_ {
        self.shape().coords().map(move |coord| (coord, &self[coord]))
    }

    pub fn is_full(&self) -> bool { self.squares.iter().all(Option::is_some) }
    pub fn is_empty(&self) -> bool { self.squares.iter().all(Option::is_none) }

    #[track_caller]
    fn checked_index(&self, pos: Coord) -> [usize; 2] {
        let shape = self.shape();
        assert!(
            shape.contains_coord(pos),
            "{:?} is out of bound for {}x{} board",
            pos,
            shape.num_rows,
            shape.num_cols
        );
        [pos.row.to_zero_based() as usize, pos.col.to_zero_based() as usize]
    }
}

impl<T: Clone> ops::Index<Coord> for GenericGrid<T> {
    type Output = Option<T>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Option<T> { &self.squares[self.checked_index(pos)] }
}

impl<T: Clone> ops::IndexMut<Coord> for GenericGrid<T> {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Option<T> {
        let index = self.checked_index(pos);
        &mut self.squares[index]
    }
}

// Lists occupied squares only, e.g. `Grid6x6 {"a6": White, ...}`.
impl<T: Clone + fmt::Debug> fmt::Debug for GenericGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape();
        write!(f, "Grid{}x{} ", shape.num_rows, shape.num_cols)?;
        f.debug_map()
            .entries(
                self.iter()
                    .filter_map(|(coord, item)| item.as_ref().map(|v| (coord.to_algebraic(shape), v))),
            )
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_shape() {
        let mut g: ClobberGrid = GenericGrid::new(BoardShape::CLOBBER);
        assert!(g.is_empty());
        assert_eq!(g.shape(), BoardShape::CLOBBER);
        g[Coord::from_zero_based(5, 5)] = Some(Force::Black);
        assert_eq!(g.square(Coord::from_zero_based(5, 5)), Square::Occupied(&Force::Black));
        assert_eq!(g.square(Coord::from_zero_based(0, 0)), Square::Vacant);
        assert_eq!(g.square(Coord::from_zero_based(6, 0)), Square::OffBoard);
    }

    #[test]
    fn full_grid() {
        let g: ClobberGrid = GenericGrid::from_fn(BoardShape::new(2, 2), |_| Some(Force::White));
        assert!(g.is_full());
        assert!(!g.is_empty());
        assert_eq!(format!("{:?}", g), r#"Grid2x2 {"a2": White, "b2": White, "a1": White, "b1": White}"#);
    }

    #[test]
    #[should_panic(expected = "out of bound")]
    fn index_out_of_bounds() {
        let g: ClobberGrid = GenericGrid::new(BoardShape::CLOBBER);
        let _ = g[Coord::from_zero_based(0, 6)];
    }
}
