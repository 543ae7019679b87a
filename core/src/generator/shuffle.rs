use alloc::vec;
use rand::{CryptoRng, Rng};

use super::*;

/// Shuffles a full list of non-origin tiles and mines the first `max_mines`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShuffleGenerator;

impl MineGenerator for ShuffleGenerator {
    fn populate<R>(&self, minefield: &mut Minefield, rng: &mut R) -> Result<()>
    where
        R: CryptoRng,
    {
        // slot i stands for linear tile i + 1, the origin is left out
        let slot_count = (minefield.total_tiles() - 1) as usize;
        let mut slots = vec![false; slot_count];
        slots[..minefield.max_mines() as usize].fill(true);

        sattolo_shuffle(&mut slots, rng);

        let columns = minefield.columns();
        for (slot, _) in slots.iter().enumerate().filter(|&(_, &mined)| mined) {
            minefield.place_mine(linear_to_coords(slot as CellCount + 1, columns))?;
        }
        Ok(())
    }
}

/// Sattolo's variant of Fisher-Yates, every element is swapped with a later one.
fn sattolo_shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: CryptoRng,
{
    let len = items.len();
    for i in 0..len.saturating_sub(1) {
        let j = rng.random_range(i + 1..len);
        items.swap(i, j);
    }
}
