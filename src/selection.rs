// Click-to-select / click-to-move cursor shared by chess and Clobber.
//
// Legality is never computed here: a destination is legal iff the (from, to) pair is in the
// legal-move list the caller provides, compared by algebraic names.

use crate::cell::Highlight;
use crate::coord::{BoardShape, Coord};
use crate::event::{LegalMove, MoveRequest};
use crate::force::Force;
use crate::grid::GenericGrid;
use crate::piece::{ChessPiece, PieceKind};


pub trait OwnedPiece {
    fn owner(&self) -> Force;

    // Promotion code to attach when this piece moves to `to`.
    fn promotion(&self, _to: Coord, _board_shape: BoardShape) -> Option<String> { None }
}

// Clobber stone.
impl OwnedPiece for Force {
    fn owner(&self) -> Force { *self }
}

impl OwnedPiece for ChessPiece {
    fn owner(&self) -> Force { self.force }

    // Always a queen: there is no promotion choice.
    fn promotion(&self, to: Coord, board_shape: BoardShape) -> Option<String> {
        let last_row = match self.force {
            Force::White => 0,
            Force::Black => board_shape.num_rows - 1,
        };
        (self.kind == PieceKind::Pawn && to.row.to_zero_based() == last_row)
            .then(|| PieceKind::Queen.letter().to_string())
    }
}

// Everything the controller needs to know about the board at the moment of a click.
pub struct BoardView<'a, T: Clone> {
    pub grid: &'a GenericGrid<T>,
    pub my_force: Force,
    pub is_my_turn: bool,
    pub legal_moves: &'a [LegalMove],
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    Selected(Coord),
    Deselected,
    MoveRequested(MoveRequest),
    Ignored,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SelectionController {
    selected: Option<Coord>,
}

impl SelectionController {
    pub fn new() -> Self { Self::default() }

    pub fn selected(&self) -> Option<Coord> { self.selected }
    pub fn clear(&mut self) { self.selected = None; }

    pub fn click<T: Clone + OwnedPiece>(&mut self, pos: Coord, view: &BoardView<T>) -> ClickOutcome {
        if !view.grid.contains_coord(pos) {
            return ClickOutcome::Ignored;
        }
        if !view.is_my_turn {
            return match self.selected.take() {
                Some(_) => ClickOutcome::Deselected,
                None => ClickOutcome::Ignored,
            };
        }
        let is_own_piece = view.grid[pos].as_ref().is_some_and(|p| p.owner() == view.my_force);
        match self.selected {
            Some(from) if from == pos => {
                self.clear();
                ClickOutcome::Deselected
            }
            Some(from) => {
                if is_listed(view, from, pos) {
                    let shape = view.grid.shape();
                    let promotion = view.grid[from].as_ref().and_then(|p| p.promotion(pos, shape));
                    self.clear();
                    ClickOutcome::MoveRequested(MoveRequest::new(
                        from.to_algebraic(shape),
                        pos.to_algebraic(shape),
                        promotion,
                    ))
                } else if is_own_piece {
                    self.selected = Some(pos);
                    ClickOutcome::Selected(pos)
                } else {
                    self.clear();
                    ClickOutcome::Deselected
                }
            }
            None => {
                if is_own_piece {
                    self.selected = Some(pos);
                    ClickOutcome::Selected(pos)
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    pub fn is_legal_destination<T: Clone>(&self, pos: Coord, view: &BoardView<T>) -> bool {
        self.selected.is_some_and(|from| is_listed(view, from, pos))
    }

    pub fn highlight<T: Clone>(&self, pos: Coord, view: &BoardView<T>) -> Option<Highlight> {
        if self.selected == Some(pos) {
            Some(Highlight::Selected)
        } else if self.is_legal_destination(pos, view) {
            Some(if view.grid[pos].is_some() {
                Highlight::LegalCapture
            } else {
                Highlight::LegalQuiet
            })
        } else {
            None
        }
    }
}

fn is_listed<T: Clone>(view: &BoardView<T>, from: Coord, to: Coord) -> bool {
    let shape = view.grid.shape();
    let from = from.to_algebraic(shape);
    let to = to.to_algebraic(shape);
    view.legal_moves.iter().any(|m| m.from == from && m.to == to)
}
