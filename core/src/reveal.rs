use alloc::collections::VecDeque;
use rand::CryptoRng;

use crate::*;

impl Minefield {
    /// Reveals a tile, returning `Ok(false)` when a mine was hit.
    ///
    /// The first step of a game never hits a mine: the mine is moved to another tile instead.
    /// Marked and already revealed tiles are left alone.
    pub fn step<R>(&mut self, coords: Coord2, rng: &mut R) -> Result<bool>
    where
        R: CryptoRng,
    {
        let coords = self.validate_coords(coords)?;
        let tile = self[coords];

        if tile.is_revealed() || tile.is_marked() {
            return Ok(true);
        }

        if tile.is_mined() {
            if self.first_move_taken() {
                log::debug!("Stepped on a mine at {:?}", coords);
                return Ok(false);
            }
            self.move_first_mine(coords, rng)?;
        }

        self.set_first_move_taken();
        let revealed = self.reveal_from(coords);
        log::debug!("Step at {:?} revealed {} tiles", coords, revealed);
        Ok(true)
    }

    fn move_first_mine<R>(&mut self, coords: Coord2, rng: &mut R) -> Result<()>
    where
        R: CryptoRng,
    {
        self.remove_mine(coords);
        match RejectionGenerator.relocate(self, coords, rng)? {
            Some(new_coords) => {
                log::debug!("First step on a mine, moved it from {:?} to {:?}", coords, new_coords)
            }
            None => log::warn!("No free tile to move the mine at {:?} to, dropping it", coords),
        }
        Ok(())
    }

    /// Reveals `coords` and flood fills through zero-adjacency tiles.
    fn reveal_from(&mut self, coords: Coord2) -> CellCount {
        self.tile_mut(coords).reveal();
        let mut revealed = 1;

        if self[coords].adjacent_mines() > 0 {
            return revealed;
        }

        let mut to_visit: VecDeque<_> = self.hidden_neighbors(coords).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            let tile = self[visit_coords];
            // queued more than once, or marked by the player
            if tile.is_revealed() || tile.is_marked() {
                continue;
            }

            self.tile_mut(visit_coords).reveal();
            revealed += 1;
            log::trace!(
                "Flood revealed tile at {:?}, mine count: {}",
                visit_coords,
                tile.adjacent_mines()
            );

            if tile.adjacent_mines() == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }

        revealed
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_neighbors(coords).filter(|&pos| {
            let tile = self[pos];
            !tile.is_revealed() && !tile.is_marked()
        })
    }
}
