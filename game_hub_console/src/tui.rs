// Improvement potential. Use `crossterm` styling instead of `console` for consistency with input
//   handling.

use console::Style;
use enum_map::EnumMap;
use itertools::Itertools;

use game_hub::cell::{Highlight, Pictogram, SquareShade, pictogram_or_blank, square_shade};
use game_hub::client::ClientState;
use game_hub::clobber::{ClobberGame, ClobberStatus};
use game_hub::clobber_ai::MinimaxPlayer;
use game_hub::coord::Coord;
use game_hub::force::Force;
use game_hub::grid::GenericGrid;
use game_hub::hub::{GameEntry, Hub};
use game_hub::remote::RemoteGame;
use game_hub::selection::{BoardView, SelectionController};
use game_hub::tictactoe::{TicTacToeGame, TicTacToeStatus};
use game_hub::util::count_by_owner;


fn square_style(shade: SquareShade, highlight: Option<Highlight>) -> Style {
    let style = Style::new().color256(233);
    match (highlight, shade) {
        (Some(Highlight::Selected), _) => style.on_color256(220),
        (Some(Highlight::LegalQuiet), _) => style.on_color256(114),
        (Some(Highlight::LegalCapture), _) => style.on_color256(167),
        (None, SquareShade::Light) => style.on_color256(230),
        (None, SquareShade::Dark) => style.on_color256(222),
    }
}

// Cursor is shown with brackets so that it stays visible on highlighted squares.
fn format_square(ch: char, is_cursor: bool) -> String {
    if is_cursor { format!("[{}]", ch) } else { format!(" {} ", ch) }
}

// Rows are drawn top to bottom as stored; row 0 carries the highest rank label.
pub fn render_grid<T: Clone + Pictogram>(
    grid: &GenericGrid<T>, cursor: Option<Coord>, highlight: impl Fn(Coord) -> Option<Highlight>,
) -> String {
    let board_shape = grid.shape();
    let file_labels =
        board_shape.cols().map(|col| format_square(col.to_algebraic(), false)).collect::<String>();
    let mut ret = format!("   {}\n", file_labels);
    for row in board_shape.rows() {
        let rank = row.to_algebraic(board_shape);
        ret.push_str(&format_square(rank, false));
        for col in board_shape.cols() {
            let coord = Coord::new(row, col);
            let square = format_square(pictogram_or_blank(&grid[coord]), cursor == Some(coord));
            let style = square_style(square_shade(coord), highlight(coord));
            ret.push_str(&style.apply_to(square).to_string());
        }
        ret.push_str(&format_square(rank, false));
        ret.push('\n');
    }
    ret.push_str(&format!("   {}\n", file_labels));
    ret
}

pub fn render_hub(hub: &Hub) -> String {
    let mut ret = String::from("Games\n\n");
    for (idx, entry) in hub.entries().iter().enumerate() {
        let line = format!("{} {}", entry.icon, entry.title);
        if idx == hub.cursor() {
            ret.push_str(&format!("> {}\n", Style::new().reverse().apply_to(line)));
        } else {
            ret.push_str(&format!("  {}\n", line));
        }
    }
    let current = &hub.entries()[hub.cursor()];
    ret.push_str(&format!("\n{}\n\n", current.description));
    ret.push_str("Up/Down: choose, Enter: open, q: quit\n");
    ret
}

pub fn render_controls(entry: &GameEntry, has_local_mode: bool) -> String {
    let mut ret = format!("{} {}\n\n", entry.icon, entry.title);
    ret.push_str("Enter with empty input: create a new game\n");
    ret.push_str("Type a game id and press Enter: join the game\n");
    if has_local_mode {
        ret.push_str("Tab: play locally on this terminal\n");
        ret.push_str("Shift+Tab: play against the computer\n");
    }
    ret.push_str("Esc: back\n");
    ret
}

fn render_counts(counts: EnumMap<Force, usize>) -> String {
    counts.iter().map(|(force, count)| format!("{}: {}", force, count)).join("  ")
}

pub fn render_remote<G: RemoteGame>(state: &ClientState<G>, cursor: Coord) -> String {
    let grid = render_grid(state.grid(), Some(cursor), |pos| state.highlight(pos));
    let turn = state.current_turn();
    let turn_line = match state.my_force() {
        Some(my_force) if my_force == turn => format!("You play {}. Your turn", my_force),
        Some(my_force) => format!("You play {}. {} to move", my_force, turn),
        None => format!("{} to move", turn),
    };
    [
        format!("{}  game id: {}", G::NAME, state.game_id()),
        grid,
        format!("Status: {}", state.status()),
        turn_line,
        render_counts(count_by_owner(state.grid())),
    ]
    .iter()
    .join("\n")
}

pub fn render_local_clobber(
    game: &ClobberGame, selection: &SelectionController, cursor: Coord, computer: Option<MinimaxPlayer>,
) -> String {
    let legal_moves = game.legal_moves();
    let view = BoardView {
        grid: game.grid(),
        my_force: game.active_force(),
        is_my_turn: game.status() == ClobberStatus::Active,
        legal_moves: &legal_moves,
    };
    let grid = render_grid(game.grid(), Some(cursor), |pos| selection.highlight(pos, &view));
    let status = match game.status() {
        ClobberStatus::Active => format!("{} to move", game.active_force()),
        ClobberStatus::Victory(force) => format!("Game over - {} wins", force),
    };
    let title = match computer {
        Some(computer) => format!("clobber (vs computer: {}, depth {})", computer.heuristic, computer.depth),
        None => "clobber (local)".to_owned(),
    };
    [
        title,
        grid,
        status,
        render_counts(count_by_owner(game.grid())),
        "r: restart, u: undo".to_owned(),
    ]
    .iter()
    .join("\n")
}

pub fn render_tic_tac_toe(game: &TicTacToeGame, cursor: Coord) -> String {
    let grid = render_grid(game.grid(), Some(cursor), |_| None);
    let status = match game.status() {
        TicTacToeStatus::Active => format!("{} to move", game.current()),
        TicTacToeStatus::Victory(mark) => format!("Game over - {} wins", mark),
        TicTacToeStatus::Draw => "Game over - draw".to_owned(),
    };
    ["tic-tac-toe".to_owned(), grid, status, "r: restart".to_owned()].iter().join("\n")
}


#[cfg(test)]
mod tests {
    use game_hub::clobber::initial_clobber_grid;
    use game_hub::coord::BoardShape;
    use game_hub::tictactoe::TicTacToeGame;
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain(s: &str) -> Vec<String> {
        console::strip_ansi_codes(s).lines().map(|l| l.trim_end().to_owned()).collect()
    }

    #[test]
    fn grid_labels_and_cursor() {
        let mut game = TicTacToeGame::new();
        game.try_place(Coord::from_zero_based(0, 0)).unwrap();
        game.try_place(Coord::from_zero_based(4, 4)).unwrap();
        let lines = plain(&render_grid(game.grid(), Some(Coord::from_zero_based(0, 0)), |_| None));
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "    a  b  c  d  e");
        assert_eq!(lines[1], " 5 [X]             5");
        assert_eq!(lines[5], " 1              O  1");
        assert_eq!(lines[6], lines[0]);
    }

    #[test]
    fn clobber_stones() {
        let grid = initial_clobber_grid();
        let cursor = Coord::from_algebraic("f1", BoardShape::CLOBBER);
        let lines = plain(&render_grid(&grid, cursor, |_| None));
        assert_eq!(lines[1], " 6  ○  ●  ○  ●  ○  ●  6");
        assert_eq!(lines[6], " 1  ●  ○  ●  ○  ● [○] 1");
    }

    #[test]
    fn local_clobber_title() {
        let game = ClobberGame::new();
        let cursor = Coord::from_zero_based(0, 0);
        let local = plain(&render_local_clobber(&game, &SelectionController::new(), cursor, None));
        assert_eq!(local[0], "clobber (local)");
        let computer = Some(MinimaxPlayer::default());
        let vs_computer = plain(&render_local_clobber(&game, &SelectionController::new(), cursor, computer));
        assert_eq!(vs_computer[0], "clobber (vs computer: adaptive, depth 3)");
        assert!(vs_computer.contains(&"black to move".to_owned()));
    }

    #[test]
    fn hub_marks_cursor() {
        let mut hub = Hub::new();
        hub.move_cursor(2);
        let lines = plain(&render_hub(&hub));
        assert!(lines[2].starts_with("  "));
        assert!(lines[4].starts_with("> "));
        assert!(lines[4].contains("Tic-tac-toe"));
    }
}
