use core::ops::Index;
use ndarray::Array2;
use rand::CryptoRng;

use crate::*;

/// The rows x columns grid of tiles plus mine placement bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct Minefield {
    tiles: Array2<Tile>,
    max_mines: CellCount,
    mines_placed: CellCount,
    first_move_taken: bool,
}

impl Minefield {
    /// Creates an empty minefield, mines are added by a [`MineGenerator`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            tiles: Array2::default(config.size.to_nd_index()),
            max_mines: config.max_mines,
            mines_placed: 0,
            first_move_taken: false,
        }
    }

    /// Validates the configuration and creates a populated minefield.
    pub fn new_game<R>(config: GameConfig, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng,
    {
        let mut minefield = Self::new(config);
        Placement::select(config).populate(&mut minefield, rng)?;
        log::debug!(
            "new {}x{} game with {} mines",
            config.rows(),
            config.columns(),
            minefield.mines_placed
        );
        Ok(minefield)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.tiles.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> CellCount {
        mult(self.rows(), self.columns())
    }

    pub fn max_mines(&self) -> CellCount {
        self.max_mines
    }

    pub fn mines_placed(&self) -> CellCount {
        self.mines_placed
    }

    pub fn first_move_taken(&self) -> bool {
        self.first_move_taken
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        match (coords.0 >= rows, coords.1 >= columns) {
            (false, false) => Ok(coords),
            (true, false) => Err(GameError::OutOfBounds(Axis::Row)),
            (false, true) => Err(GameError::OutOfBounds(Axis::Column)),
            (true, true) => Err(GameError::OutOfBounds(Axis::Both)),
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn is_mined(&self, coords: Coord2) -> Result<bool> {
        self.tile_at(coords).map(Tile::is_mined)
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.tile_at(coords).map(Tile::is_revealed)
    }

    pub fn is_marked(&self, coords: Coord2) -> Result<bool> {
        self.tile_at(coords).map(Tile::is_marked)
    }

    pub fn adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        self.tile_at(coords).map(Tile::adjacent_mines)
    }

    /// Mines a tile and bumps the adjacency of its neighbors.
    ///
    /// Returns `Ok(false)` when the tile is already mined or the budget is spent.
    pub fn place_mine(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        if coords == (0, 0) {
            return Err(GameError::InvalidPlacement);
        }

        if self[coords].is_mined() || self.mines_placed >= self.max_mines {
            return Ok(false);
        }

        self.tile_mut(coords).set_mined(true);
        self.mines_placed += 1;
        for pos in self.tiles.iter_neighbors(coords) {
            self.tile_mut(pos).add_adjacent_mine();
        }
        Ok(true)
    }

    /// Inverse of [`Minefield::place_mine`], keeping neighbor counts exact.
    pub(crate) fn remove_mine(&mut self, coords: Coord2) {
        if !self[coords].is_mined() {
            return;
        }

        self.tile_mut(coords).set_mined(false);
        self.mines_placed -= 1;
        for pos in self.tiles.iter_neighbors(coords) {
            self.tile_mut(pos).remove_adjacent_mine();
        }
    }

    /// Toggles the mark on an unrevealed tile, revealed tiles cannot be marked.
    pub fn mark_tile(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self[coords].is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        self.tile_mut(coords).toggle_marked();
        log::debug!("mark toggled at {:?}", coords);
        Ok(MarkOutcome::Changed)
    }

    /// Whether the marked tiles are exactly the mined tiles.
    pub fn are_all_mines_revealed(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| tile.is_mined() == tile.is_marked())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }

    pub(crate) fn set_first_move_taken(&mut self) {
        self.first_move_taken = true;
    }

    pub(crate) fn rows_iter(&self) -> impl Iterator<Item = impl Iterator<Item = Tile> + '_> + '_ {
        self.tiles.rows().into_iter().map(|row| row.into_iter().copied())
    }
}

impl Index<Coord2> for Minefield {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
impl Minefield {
    /// Recounts every tile's neighborhood from scratch.
    pub(crate) fn assert_consistent(&self) {
        let (rows, columns) = self.size();
        let mut mined = 0;
        for row in 0..rows {
            for column in 0..columns {
                let coords = (row, column);
                if self[coords].is_mined() {
                    mined += 1;
                }
                let expected = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self[pos].is_mined())
                    .count();
                assert_eq!(
                    usize::from(self[coords].adjacent_mines()),
                    expected,
                    "adjacency mismatch at {:?}",
                    coords
                );
            }
        }
        assert!(!self[(0, 0)].is_mined());
        assert_eq!(self.mines_placed(), mined);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(rows: Coord, columns: Coord, max_mines: CellCount) -> Minefield {
        Minefield::new(GameConfig::new(rows, columns, max_mines).unwrap())
    }

    #[test]
    fn new_minefield_is_blank() {
        let minefield = empty(10, 10, 50);

        assert_eq!(minefield.size(), (10, 10));
        assert_eq!(minefield.total_tiles(), 100);
        assert_eq!(minefield.max_mines(), 50);
        assert_eq!(minefield.mines_placed(), 0);
        assert!(!minefield.first_move_taken());
        assert!(minefield.rows_iter().flatten().all(|tile| tile == Tile::default()));
    }

    #[test]
    fn place_mine_updates_neighbors_only() {
        let mut minefield = empty(10, 10, 50);

        assert_eq!(minefield.place_mine((1, 1)), Ok(true));
        for row in 0..=2 {
            for column in 0..=2 {
                if (row, column) == (1, 1) {
                    assert!(minefield[(1, 1)].is_mined());
                    assert_eq!(minefield[(1, 1)].adjacent_mines(), 0);
                } else {
                    assert_eq!(minefield[(row, column)].adjacent_mines(), 1);
                }
            }
        }

        assert_eq!(minefield.place_mine((1, 2)), Ok(true));
        assert_eq!(minefield[(1, 1)].adjacent_mines(), 1);
        assert_eq!(minefield[(1, 2)].adjacent_mines(), 1);
        assert_eq!(minefield[(0, 1)].adjacent_mines(), 2);
        assert_eq!(minefield[(2, 2)].adjacent_mines(), 2);
        assert_eq!(minefield[(0, 3)].adjacent_mines(), 1);
        assert_eq!(minefield.mines_placed(), 2);
        minefield.assert_consistent();
    }

    #[test]
    fn place_mine_rejects_origin_and_out_of_bounds() {
        let mut minefield = empty(10, 8, 5);

        assert_eq!(minefield.place_mine((0, 0)), Err(GameError::InvalidPlacement));
        assert_eq!(
            minefield.place_mine((10, 1)),
            Err(GameError::OutOfBounds(Axis::Row))
        );
        assert_eq!(
            minefield.place_mine((1, 8)),
            Err(GameError::OutOfBounds(Axis::Column))
        );
        assert_eq!(
            minefield.place_mine((10, 8)),
            Err(GameError::OutOfBounds(Axis::Both))
        );
        assert_eq!(minefield.mines_placed(), 0);
    }

    #[test]
    fn place_mine_is_noop_when_mined_or_budget_spent() {
        let mut minefield = empty(3, 3, 1);

        assert_eq!(minefield.place_mine((2, 2)), Ok(true));
        assert_eq!(minefield.place_mine((2, 2)), Ok(false));
        assert_eq!(minefield.place_mine((1, 1)), Ok(false));
        assert!(!minefield[(1, 1)].is_mined());
        assert_eq!(minefield.mines_placed(), 1);
        minefield.assert_consistent();
    }

    #[test]
    fn remove_mine_restores_counts() {
        let mut minefield = empty(4, 4, 3);
        minefield.place_mine((1, 1)).unwrap();
        minefield.place_mine((1, 2)).unwrap();

        minefield.remove_mine((1, 1));

        assert!(!minefield[(1, 1)].is_mined());
        assert_eq!(minefield.mines_placed(), 1);
        assert_eq!(minefield[(0, 0)].adjacent_mines(), 0);
        minefield.assert_consistent();
    }

    #[test]
    fn mark_toggles_without_touching_mines() {
        let mut minefield = empty(3, 3, 2);
        minefield.place_mine((1, 1)).unwrap();
        let before = minefield.clone();

        assert_eq!(minefield.mark_tile((1, 1)), Ok(MarkOutcome::Changed));
        assert!(minefield[(1, 1)].is_marked());
        assert_eq!(minefield.mark_tile((1, 1)), Ok(MarkOutcome::Changed));

        assert_eq!(minefield, before);
    }

    #[test]
    fn mark_is_bounds_checked() {
        let mut minefield = empty(3, 4, 2);
        assert_eq!(
            minefield.mark_tile((3, 0)),
            Err(GameError::OutOfBounds(Axis::Row))
        );
    }

    #[test]
    fn mark_ignores_revealed_tiles() {
        let mut minefield = empty(3, 3, 2);
        minefield.tile_mut((2, 2)).reveal();

        assert_eq!(minefield.mark_tile((2, 2)), Ok(MarkOutcome::NoChange));
        assert!(!minefield[(2, 2)].is_marked());
    }

    #[test]
    fn win_requires_exact_mark_set() {
        let mut minefield = empty(3, 3, 2);
        minefield.place_mine((1, 1)).unwrap();
        minefield.place_mine((2, 2)).unwrap();
        assert!(!minefield.are_all_mines_revealed());

        minefield.mark_tile((1, 1)).unwrap();
        assert!(!minefield.are_all_mines_revealed());

        minefield.mark_tile((2, 2)).unwrap();
        assert!(minefield.are_all_mines_revealed());

        minefield.mark_tile((0, 1)).unwrap();
        assert!(!minefield.are_all_mines_revealed());

        minefield.mark_tile((0, 1)).unwrap();
        assert!(minefield.are_all_mines_revealed());
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut minefield = empty(2, 3, 1);
        minefield.place_mine((1, 2)).unwrap();

        assert_eq!(minefield.is_mined((1, 2)), Ok(true));
        assert_eq!(minefield.is_revealed((1, 2)), Ok(false));
        assert_eq!(minefield.is_marked((1, 2)), Ok(false));
        assert_eq!(minefield.adjacent_mines((0, 1)), Ok(1));
        assert_eq!(
            minefield.is_mined((2, 0)),
            Err(GameError::OutOfBounds(Axis::Row))
        );
    }
}
