use std::fmt;

use crate::cells::Coordinate;
use crate::units::{ColumnIndex, GridSize, RowIndex};

/// Iterates every cell coordinate of a square grid in storage order (`grid[col][row]`).
#[derive(Clone)]
pub struct CellIter {
    size: GridSize,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(size: GridSize) -> CellIter {
        CellIter {
            size,
            current_cell_number: 0,
            cells_count: size.nodes().0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let GridSize(size) = self.size;
            let coord = Coordinate::new(self.current_cell_number / size,
                                        self.current_cell_number % size);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iterates whole rows (left to right) or whole columns (top to bottom).
///
/// The column variant is the transposed view used when scanning bottom walls.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    size: GridSize,
}

impl BatchIter {
    pub(crate) fn rows(size: GridSize) -> BatchIter {
        BatchIter::new(BatchIterType::Row, size)
    }

    pub(crate) fn columns(size: GridSize) -> BatchIter {
        BatchIter::new(BatchIterType::Column, size)
    }

    fn new(iter_type: BatchIterType, size: GridSize) -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            size,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<Coordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let GridSize(length) = self.size;
        if self.current_index >= length {
            return None;
        }

        let batch_index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..length)
                    .map(|i| Coordinate::from_row_column_indices(ColumnIndex(i), RowIndex(batch_index)))
                    .collect()
            }
            BatchIterType::Column => {
                (0..length)
                    .map(|i| Coordinate::from_row_column_indices(ColumnIndex(batch_index), RowIndex(i)))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.size.0 - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
