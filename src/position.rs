use std::fmt::Display;

/// a (row, column) coordinate, rows grow downward and columns rightward
///
/// coordinates are signed because an image may be anchored above or left
/// of a layer's canvas, cell positions inside a buffer are never negative
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    row: isize,
    col: isize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> isize {
        self.row
    }

    pub fn col(&self) -> isize {
        self.col
    }

    /// the position shifted by the given offset, none when it leaves the coordinate range
    pub fn offset(&self, rows: isize, cols: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(rows)?,
            col: self.col.checked_add(cols)?,
        })
    }

    /// row-major index into a grid of the given size, none when outside
    pub fn index_in(&self, height: usize, width: usize) -> Option<usize> {
        if self.row < 0 || self.col < 0 {
            return None;
        }
        let (row, col) = (self.row as usize, self.col as usize);
        if row >= height || col >= width {
            return None;
        }
        Some(row * width + col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row as isize, col as isize)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
