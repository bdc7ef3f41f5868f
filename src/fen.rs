// Only the piece placement field of FEN is used: side to move, castling rights, etc. are
// owned by the server and are ignored when reading.

use itertools::Itertools;

use crate::coord::{BoardShape, Coord};
use crate::force::Force;
use crate::grid::{ChessGrid, GenericGrid};
use crate::piece::{ChessPiece, PieceKind};


pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = {
    use PieceKind::*;
    [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
};

pub fn initial_chess_grid() -> ChessGrid {
    let shape = BoardShape::CHESS;
    GenericGrid::from_fn(shape, |coord| {
        let kind = BACK_RANK[coord.col.to_zero_based() as usize];
        match coord.row.to_zero_based() {
            0 => Some(ChessPiece::new(kind, Force::Black)),
            1 => Some(ChessPiece::new(PieceKind::Pawn, Force::Black)),
            6 => Some(ChessPiece::new(PieceKind::Pawn, Force::White)),
            7 => Some(ChessPiece::new(kind, Force::White)),
            _ => None,
        }
    })
}

// Reads the first whitespace-separated field. Fails on any row whose squares do not add up
// to exactly the board width: a silently misaligned row would shift every later piece.
pub fn fen_to_grid(fen: &str) -> Result<ChessGrid, String> {
    let shape = BoardShape::CHESS;
    let placement = fen.split_whitespace().next().ok_or_else(|| "invalid FEN: empty".to_owned())?;
    let rows = placement.split('/').collect_vec();
    if rows.len() != shape.num_rows as usize {
        return Err(format!(
            "invalid FEN: has {} rows, expected {}",
            rows.len(),
            shape.num_rows
        ));
    }
    let mut grid = ChessGrid::new(shape);
    for (row, row_notation) in shape.rows().zip(rows) {
        let rank = row.to_algebraic(shape);
        let mut col: u32 = 0;
        for ch in row_notation.chars() {
            if let Some(n) = ch.to_digit(10) {
                if n == 0 {
                    return Err(format!("invalid FEN: zero-length gap in rank {}", rank));
                }
                col += n;
            } else if let Some(piece) = ChessPiece::from_fen_char(ch) {
                if col < shape.num_cols as u32 {
                    grid[Coord::from_zero_based(row.to_zero_based(), col as u8)] = Some(piece);
                }
                col += 1;
            } else {
                return Err(format!("invalid FEN: unknown piece '{}' in rank {}", ch, rank));
            }
            if col > shape.num_cols as u32 {
                return Err(format!(
                    "invalid FEN: rank {} has more than {} columns",
                    rank, shape.num_cols
                ));
            }
        }
        if col != shape.num_cols as u32 {
            return Err(format!(
                "invalid FEN: rank {} has {} columns, expected {}",
                rank, col, shape.num_cols
            ));
        }
    }
    Ok(grid)
}

pub fn grid_to_fen_placement(grid: &ChessGrid) -> String {
    let shape = grid.shape();
    shape
        .rows()
        .map(|row| {
            let mut row_notation = String::new();
            let mut empty_col_count: u8 = 0;
            for col in shape.cols() {
                if let Some(piece) = grid[Coord::new(row, col)] {
                    if empty_col_count > 0 {
                        row_notation.push_str(&empty_col_count.to_string());
                        empty_col_count = 0;
                    }
                    row_notation.push(piece.to_fen_char());
                } else {
                    empty_col_count += 1;
                }
            }
            if empty_col_count > 0 {
                row_notation.push_str(&empty_col_count.to_string());
            }
            row_notation
        })
        .join("/")
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn piece_at(grid: &ChessGrid, algebraic: &str) -> Option<ChessPiece> {
        grid[Coord::from_algebraic(algebraic, BoardShape::CHESS).unwrap()]
    }

    #[test]
    fn empty_board() {
        let grid = fen_to_grid("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.shape(), BoardShape::CHESS);
    }

    #[test]
    fn initial_position() {
        let grid = fen_to_grid(INITIAL_FEN).unwrap();
        assert_eq!(grid, initial_chess_grid());
        assert_eq!(piece_at(&grid, "e1"), Some(ChessPiece::new(PieceKind::King, Force::White)));
        assert_eq!(piece_at(&grid, "d8"), Some(ChessPiece::new(PieceKind::Queen, Force::Black)));
        assert_eq!(piece_at(&grid, "a1"), Some(ChessPiece::new(PieceKind::Rook, Force::White)));
        assert_eq!(piece_at(&grid, "g8"), Some(ChessPiece::new(PieceKind::Knight, Force::Black)));
        assert_eq!(piece_at(&grid, "c2"), Some(ChessPiece::new(PieceKind::Pawn, Force::White)));
        assert_eq!(piece_at(&grid, "c7"), Some(ChessPiece::new(PieceKind::Pawn, Force::Black)));
        assert_eq!(piece_at(&grid, "e4"), None);
        // Black back rank is on top.
        let top_row = BoardShape::CHESS
            .cols()
            .map(|col| grid[Coord::new(crate::coord::Row::from_zero_based(0), col)].unwrap().code())
            .collect_vec();
        assert_eq!(top_row, ["br", "bn", "bb", "bq", "bk", "bb", "bn", "br"]);
    }

    #[test]
    fn placement_only_input() {
        let grid = fen_to_grid("4k3/8/8/8/4P3/8/8/4K3").unwrap();
        assert_eq!(piece_at(&grid, "e4"), Some(ChessPiece::new(PieceKind::Pawn, Force::White)));
        assert_eq!(grid.iter().filter(|(_, p)| p.is_some()).count(), 3);
    }

    #[test]
    fn encode() {
        assert_eq!(grid_to_fen_placement(&initial_chess_grid()), INITIAL_FEN.split(' ').next().unwrap());
        let fen = "r3k2r/pp3ppp/2n5/3Pp3/8/5N2/PPP2PPP/R3K2R";
        assert_eq!(grid_to_fen_placement(&fen_to_grid(fen).unwrap()), fen);
    }

    #[test]
    fn malformed() {
        assert!(fen_to_grid("").is_err());
        assert!(fen_to_grid("   ").is_err());
        // Seven rows.
        assert!(fen_to_grid("8/8/8/8/8/8/8 w - - 0 1").is_err());
        // Nine rows.
        assert!(fen_to_grid("8/8/8/8/8/8/8/8/8").is_err());
        // Short row.
        assert!(fen_to_grid("rnbqkbnr/pppppppp/7/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        // Overflowing row.
        assert!(fen_to_grid("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(fen_to_grid("rnbqkbnrp/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(fen_to_grid("4k4/8/8/8/8/8/8/8").is_err());
        // Unknown piece.
        assert!(fen_to_grid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX").is_err());
        assert!(fen_to_grid("8/8/8/8/8/8/8/80").is_err());
    }

    #[test]
    fn error_names_the_rank() {
        let err = fen_to_grid("8/8/8/3p3/8/8/8/8").unwrap_err();
        assert!(err.contains("rank 5"), "{}", err);
    }
}
