use std::ops;

use super::{
    fmt::{Cell, FormattedExt, Text},
    xy::XY,
};

/// A text framebuffer.
///
/// Allows you to render things onto it, then can be rendered onto the display. This strategy avoids flickering,
/// partial renders, etc. and helps deduplicate rendering effort.
pub struct Screen {
    cells: Vec<Cell>,
    size: XY,
}

impl Screen {
    /// Create a new `Screen` in the given size.
    pub fn new(size: XY) -> Self {
        let mut res = Self {
            cells: vec![],
            size: XY(0, 0),
        };
        res.resize(size);
        res
    }

    /// How big this Screen is, in characters.
    pub fn size(&self) -> XY {
        self.size
    }

    /// Returns an iterator over the rows in a screen.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.size.y()).map(move |y| &self[y])
    }

    /// Resize the screen, clearing its contents at the same time. Does not reallocate unless the screen is growing.
    pub fn resize(&mut self, size: XY) {
        self.cells.truncate(0);
        self.cells.resize(size.x() * size.y(), Cell::BLANK);
        self.size = size;
    }

    /// Write some formatted text to the position on screen.
    ///
    /// This **does not** handle newlines. Anything running off the right or bottom edge is clipped.
    pub fn write(&mut self, pos: XY, text: Vec<Text>) {
        let XY(mut x, y) = pos;
        if y >= self.size.y() {
            return;
        }
        for chunk in text {
            for char in chunk.text.chars() {
                if x >= self.size.x() {
                    return;
                }
                self[y][x] = Cell::of(char).fmt_of(&chunk);
                x += 1;
            }
        }
    }

    /// The characters in a row, without formatting. Mostly useful for tests.
    pub fn row_text(&self, row: usize) -> String {
        self[row].iter().map(|c| c.ch).collect()
    }
}

impl ops::Index<usize> for Screen {
    type Output = [Cell];
    fn index(&self, row: usize) -> &Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &self.cells[start..end]
    }
}

impl ops::IndexMut<usize> for Screen {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &mut self.cells[start..end]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::text;

    #[test]
    fn write_places_text() {
        let mut screen = Screen::new(XY(10, 2));
        screen.write(XY(2, 1), text!["hi ", bold "there"]);
        assert_eq!(screen.row_text(0), "          ");
        assert_eq!(screen.row_text(1), "  hi there");
    }

    #[test]
    fn write_clips_offscreen() {
        let mut screen = Screen::new(XY(4, 1));
        screen.write(XY(2, 0), text!["abcdef"]);
        screen.write(XY(0, 5), text!["nope"]);
        assert_eq!(screen.row_text(0), "  ab");
    }

    #[test]
    fn resize_clears() {
        let mut screen = Screen::new(XY(3, 1));
        screen.write(XY(0, 0), text!["abc"]);
        screen.resize(XY(2, 2));
        assert_eq!(screen.rows().count(), 2);
        assert_eq!(screen.row_text(0), "  ");
    }
}
