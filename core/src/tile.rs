/// State of a single minefield cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    mined: bool,
    revealed: bool,
    marked: bool,
    adjacent_mines: u8,
}

impl Tile {
    pub const fn is_mined(self) -> bool {
        self.mined
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_marked(self) -> bool {
        self.marked
    }

    /// Number of mined tiles in the surrounding 3x3 block, excluding this one.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Character shown for this tile, `force_reveal` uncovers it regardless of state.
    pub const fn glyph(self, force_reveal: bool) -> char {
        if self.marked {
            '!'
        } else if force_reveal || self.revealed {
            match (self.mined, self.adjacent_mines) {
                (true, _) => '*',
                (false, 0) => ' ',
                (false, count) => (b'0' + count) as char,
            }
        } else {
            '#'
        }
    }

    pub(crate) fn set_mined(&mut self, mined: bool) {
        self.mined = mined;
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn toggle_marked(&mut self) {
        self.marked = !self.marked;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        self.adjacent_mines += 1;
    }

    pub(crate) fn remove_adjacent_mine(&mut self) {
        self.adjacent_mines -= 1;
    }
}
