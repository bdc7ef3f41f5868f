// Computer opponent for hot-seat Clobber: depth-limited minimax with alpha-beta pruning.

use derive_new::new;
use itertools::Itertools;
use log::debug;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::clobber::{ClobberGame, ClobberStatus, legal_clobber_moves};
use crate::coord::Coord;
use crate::force::Force;
use crate::grid::ClobberGrid;
use crate::util::count_by_owner;


// Outweighs any heuristic score on a 6x6 board.
pub const WIN_SCORE: i32 = 1000;

pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

// Static evaluation of a position that is not over yet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Heuristic {
    // Stone count difference.
    Material,
    // Stone count plus, with double weight, the number of stones that still have a capture.
    // Stones without an adjacent opponent are usually dead weight in the endgame.
    Adaptive,
}

impl Heuristic {
    pub fn evaluate(self, grid: &ClobberGrid, player: Force) -> i32 {
        let counts = count_by_owner(grid);
        let material = counts[player] as i32 - counts[player.opponent()] as i32;
        match self {
            Heuristic::Material => material,
            Heuristic::Adaptive => {
                let active_stones = |force: Force| {
                    legal_clobber_moves(grid, force).into_iter().map(|(from, _)| from).unique().count()
                        as i32
                };
                material + 2 * (active_stones(player) - active_stones(player.opponent()))
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, new)]
pub struct MinimaxPlayer {
    pub depth: u32,
    pub heuristic: Heuristic,
}

impl Default for MinimaxPlayer {
    fn default() -> Self { MinimaxPlayer::new(DEFAULT_SEARCH_DEPTH, Heuristic::Adaptive) }
}

impl MinimaxPlayer {
    // Best capture for the side to move, `None` if the game is over. Ties go to the capture
    // generated first.
    pub fn best_move(&self, game: &ClobberGame) -> Option<(Coord, Coord)> {
        let player = game.active_force();
        let mut scratch = game.clone();
        let mut nodes = 0;
        let mut alpha = i32::MIN;
        let mut best: Option<((Coord, Coord), i32)> = None;
        for (from, to) in game.legal_captures() {
            scratch.apply_capture(from, to);
            let depth = self.depth.saturating_sub(1);
            let score = self.search(&mut scratch, player, depth, alpha, i32::MAX, &mut nodes);
            scratch.undo_move();
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some(((from, to), score));
                alpha = alpha.max(score);
            }
        }
        let ((from, to), score) = best?;
        let shape = game.grid().shape();
        debug!(
            "Clobber {} AI ({}): {} -> {}, score {}, {} positions searched",
            player,
            self.heuristic,
            from.to_algebraic(shape),
            to.to_algebraic(shape),
            score,
            nodes
        );
        Some((from, to))
    }

    // Score of `game` for `player`. Faster wins and slower losses score higher.
    fn search(
        &self, game: &mut ClobberGame, player: Force, depth: u32, mut alpha: i32, mut beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;
        if let ClobberStatus::Victory(winner) = game.status() {
            let score = WIN_SCORE + depth as i32;
            return if winner == player { score } else { -score };
        }
        if depth == 0 {
            return self.heuristic.evaluate(game.grid(), player);
        }
        let maximizing = game.active_force() == player;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (from, to) in game.legal_captures() {
            game.apply_capture(from, to);
            let score = self.search(game, player, depth - 1, alpha, beta, nodes);
            game.undo_move();
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MatchResult {
    pub winner: Force,
    pub num_moves: usize,
}

// Plays a full game from the initial position between two computer players.
pub fn play_match(black: &MinimaxPlayer, white: &MinimaxPlayer) -> MatchResult {
    let mut game = ClobberGame::new();
    loop {
        let player = match game.active_force() {
            Force::Black => black,
            Force::White => white,
        };
        let Some((from, to)) = player.best_move(&game) else {
            break;
        };
        game.apply_capture(from, to);
    }
    // The side left without a capture loses.
    MatchResult {
        winner: game.active_force().opponent(),
        num_moves: game.num_moves(),
    }
}

// Every heuristic against every other one, with each side of the board, at equal depth.
// Returns (black, white, result) triples.
pub fn round_robin(depth: u32) -> Vec<(Heuristic, Heuristic, MatchResult)> {
    Heuristic::iter()
        .cartesian_product(Heuristic::iter())
        .map(|(black, white)| {
            let result = play_match(&MinimaxPlayer::new(depth, black), &MinimaxPlayer::new(depth, white));
            (black, white, result)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coord::BoardShape;

    fn coord(s: &str) -> Coord { Coord::from_algebraic(s, BoardShape::CLOBBER).unwrap() }

    fn players() -> impl Iterator<Item = MinimaxPlayer> {
        Heuristic::iter()
            .cartesian_product(1..=2)
            .map(|(heuristic, depth)| MinimaxPlayer::new(depth, heuristic))
    }

    #[test]
    fn heuristic_names() {
        assert_eq!(Heuristic::from_str("adaptive"), Ok(Heuristic::Adaptive));
        assert_eq!(Heuristic::Material.to_string(), "material");
        assert!(Heuristic::from_str("random").is_err());
    }

    #[test]
    fn heuristic_scores() {
        let mut grid = ClobberGrid::new(BoardShape::CLOBBER);
        grid[coord("a1")] = Some(Force::Black);
        grid[coord("b1")] = Some(Force::White);
        grid[coord("f6")] = Some(Force::Black);
        assert_eq!(Heuristic::Material.evaluate(&grid, Force::Black), 1);
        assert_eq!(Heuristic::Material.evaluate(&grid, Force::White), -1);
        // One active stone each, so only material counts.
        assert_eq!(Heuristic::Adaptive.evaluate(&grid, Force::Black), 1);
        // Even material, but both white stones can capture a1.
        grid[coord("a2")] = Some(Force::White);
        assert_eq!(Heuristic::Adaptive.evaluate(&grid, Force::Black), -2);
    }

    #[test]
    fn chooses_legal_moves() {
        let mut game = ClobberGame::new();
        game.try_move(coord("b6"), coord("a6")).unwrap();
        for player in players() {
            let (from, to) = player.best_move(&game).unwrap();
            assert!(game.legal_captures().contains(&(from, to)), "{:?}", player);
        }
        // Searching must not disturb the game.
        assert_eq!(game.num_moves(), 1);
        assert_eq!(game.active_force(), Force::White);
    }

    #[test]
    fn takes_immediate_win() {
        // a1xa2 leaves white without captures. a1xb1 lets c1 recapture and black loses.
        let mut grid = ClobberGrid::new(BoardShape::CLOBBER);
        grid[coord("a1")] = Some(Force::Black);
        grid[coord("a2")] = Some(Force::White);
        grid[coord("b1")] = Some(Force::White);
        grid[coord("c1")] = Some(Force::White);
        let game = ClobberGame::from_position(grid, Force::Black);
        for player in players().chain([MinimaxPlayer::default()]) {
            assert_eq!(player.best_move(&game), Some((coord("a1"), coord("a2"))), "{:?}", player);
        }
    }

    #[test]
    fn no_move_when_game_is_over() {
        let mut grid = ClobberGrid::new(BoardShape::CLOBBER);
        grid[coord("a1")] = Some(Force::Black);
        let game = ClobberGame::from_position(grid, Force::Black);
        assert_eq!(MinimaxPlayer::default().best_move(&game), None);
    }

    #[test]
    fn match_runs_to_the_end() {
        let player = MinimaxPlayer::new(1, Heuristic::Material);
        let result = play_match(&player, &player);
        assert!(result.num_moves > 0);
        // Every capture removes one stone and both sides start with 18.
        assert!(result.num_moves < 36);

        let results = round_robin(1);
        assert_eq!(results.len(), 4);
        assert!(results.contains(&(Heuristic::Material, Heuristic::Material, result)));
    }
}
