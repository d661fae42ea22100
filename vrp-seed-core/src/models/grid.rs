#[cfg(test)]
#[path = "../../tests/unit/models/grid_test.rs"]
mod grid_test;

/// A fixed width two dimensional array stored in row-major order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid of the given size filled with `value`.
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self { rows, cols, data: vec![value; rows * cols] }
    }

    /// Creates a grid from rows of possibly different length, shorter rows are right-padded
    /// with `pad` to the longest one.
    pub fn from_rows(rows: Vec<Vec<T>>, pad: T) -> Self {
        let cols = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        Self::from_rows_with_width(rows, cols, pad)
    }

    /// Creates a grid from rows fitting every row to exactly `cols` entries: longer rows are
    /// truncated, shorter are right-padded with `pad`.
    pub fn from_rows_with_width(rows: Vec<Vec<T>>, cols: usize, pad: T) -> Self {
        let row_count = rows.len();
        let data = rows
            .into_iter()
            .flat_map(|row| {
                let missing = cols.saturating_sub(row.len());
                row.into_iter().take(cols).chain(std::iter::repeat_n(pad.clone(), missing))
            })
            .collect();

        Self { rows: row_count, cols, data }
    }
}

impl<T> Grid<T> {
    /// Returns amount of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns amount of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Checks whether grid has the same amount of rows and columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns a value at given position if it exists.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols { self.data.get(row * self.cols + col) } else { None }
    }

    /// Sets a value at given position. Returns false if position is outside of grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
            true
        } else {
            false
        }
    }

    /// Returns a row as slice.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns a mutable row as slice.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Iterates over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }
}
