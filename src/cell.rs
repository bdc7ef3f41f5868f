// Cell rendering primitives shared by all boards. Nothing here knows about game rules.

use crate::coord::Coord;
use crate::force::Force;


pub trait Pictogram {
    fn pictogram(&self) -> char;
}

// Clobber stones.
impl Pictogram for Force {
    fn pictogram(&self) -> char {
        match self {
            Force::White => '○',
            Force::Black => '●',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SquareShade {
    Light,
    Dark,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Highlight {
    Selected,
    LegalQuiet,
    LegalCapture,
}

// Top-left square is light on every board size.
pub fn square_shade(coord: Coord) -> SquareShade {
    if (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2 == 0 {
        SquareShade::Light
    } else {
        SquareShade::Dark
    }
}

pub fn pictogram_or_blank<T: Pictogram>(cell: &Option<T>) -> char {
    cell.as_ref().map_or(' ', Pictogram::pictogram)
}
