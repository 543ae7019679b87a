use rand::{CryptoRng, Rng};

use super::*;

/// Draws random non-origin tiles until the mine budget is met.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectionGenerator;

impl RejectionGenerator {
    /// Places one extra mine anywhere except the origin and `avoid`.
    ///
    /// Returns `None` when no such tile is left unmined.
    pub(crate) fn relocate<R>(
        &self,
        minefield: &mut Minefield,
        avoid: Coord2,
        rng: &mut R,
    ) -> Result<Option<Coord2>>
    where
        R: CryptoRng,
    {
        let total_tiles = minefield.total_tiles();
        let mut free_tiles = total_tiles - 1 - minefield.mines_placed();
        if avoid != (0, 0) && !minefield[avoid].is_mined() {
            free_tiles -= 1;
        }
        if free_tiles == 0 || minefield.mines_placed() >= minefield.max_mines() {
            return Ok(None);
        }

        loop {
            let coords = linear_to_coords(rng.random_range(1..total_tiles), minefield.columns());
            if coords != avoid && minefield.place_mine(coords)? {
                return Ok(Some(coords));
            }
        }
    }
}

impl MineGenerator for RejectionGenerator {
    fn populate<R>(&self, minefield: &mut Minefield, rng: &mut R) -> Result<()>
    where
        R: CryptoRng,
    {
        let total_tiles = minefield.total_tiles();
        let columns = minefield.columns();

        while minefield.mines_placed() < minefield.max_mines() {
            // index 0 is the origin
            let index = rng.random_range(1..total_tiles);
            minefield.place_mine(linear_to_coords(index, columns))?;
        }
        Ok(())
    }
}
