use enum_map::EnumMap;

use crate::force::Force;
use crate::grid::GenericGrid;
use crate::selection::OwnedPiece;


pub fn count_by_owner<T: Clone + OwnedPiece>(grid: &GenericGrid<T>) -> EnumMap<Force, usize> {
    let mut counts = EnumMap::default();
    for (_, piece) in grid.iter() {
        if let Some(piece) = piece {
            counts[piece.owner()] += 1;
        }
    }
    counts
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::clobber::initial_clobber_grid;
    use crate::fen::fen_to_grid;

    #[test]
    fn counts() {
        let counts = count_by_owner(&initial_clobber_grid());
        assert_eq!(counts[Force::White], 18);
        assert_eq!(counts[Force::Black], 18);

        let counts = count_by_owner(&fen_to_grid("4k3/pp6/8/8/8/8/8/4K3").unwrap());
        assert_eq!(counts[Force::White], 1);
        assert_eq!(counts[Force::Black], 3);
    }
}
