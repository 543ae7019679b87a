use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::*;

impl Minefield {
    /// One line per row, one glyph per tile.
    pub fn render(&self, force_reveal: bool) -> String {
        let (rows, columns) = self.size();
        let mut out = String::with_capacity(usize::from(rows) * (usize::from(columns) + 1));
        for row in self.rows_iter() {
            out.extend(row.map(|tile| tile.glyph(force_reveal)));
            out.push('\n');
        }
        out
    }

    /// Like [`Minefield::render`] with a column header line and row labels.
    ///
    /// Every field is right-aligned to the digit count of the largest coordinate.
    pub fn render_with_coords(&self, force_reveal: bool) -> String {
        WithCoords {
            minefield: self,
            force_reveal,
        }
        .to_string()
    }
}

struct WithCoords<'a> {
    minefield: &'a Minefield,
    force_reveal: bool,
}

impl fmt::Display for WithCoords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = self.minefield.size();
        let width = digit_count(usize::from(rows.max(columns)) - 1);

        write!(f, "{:width$}", "")?;
        for column in 0..columns {
            write!(f, " {:>width$}", column)?;
        }
        f.write_char('\n')?;

        for (row, tiles) in self.minefield.rows_iter().enumerate() {
            write!(f, "{:>width$}", row)?;
            for tile in tiles {
                write!(f, " {:>width$}", tile.glyph(self.force_reveal))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl fmt::Display for Minefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
