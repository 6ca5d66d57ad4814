use serde_derive::Serialize;
use smallvec::SmallVec;
use std::convert::From;
use crate::units::{ColumnIndex, RowIndex};

/// Position of a cell on the grid, `0 <= col, row < size`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize)]
pub struct Coordinate {
    pub col: usize,
    pub row: usize,
}

impl Coordinate {
    pub fn new(col: usize, row: usize) -> Coordinate {
        Coordinate { col, row }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Coordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Coordinate::new(col, row)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(col_row_pair: (usize, usize)) -> Coordinate {
        Coordinate::new(col_row_pair.0, col_row_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

/// The four sides of a cell, in wall mask order.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallDirection {
    Top,
    Right,
    Bottom,
    Left,
}

impl WallDirection {
    pub const ALL: [WallDirection; 4] = [WallDirection::Top,
                                         WallDirection::Right,
                                         WallDirection::Bottom,
                                         WallDirection::Left];

    /// Position of this side's bit within a `WallMask`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            WallDirection::Top => 0,
            WallDirection::Right => 1,
            WallDirection::Bottom => 2,
            WallDirection::Left => 3,
        }
    }

    #[inline]
    pub fn opposite(self) -> WallDirection {
        match self {
            WallDirection::Top => WallDirection::Bottom,
            WallDirection::Right => WallDirection::Left,
            WallDirection::Bottom => WallDirection::Top,
            WallDirection::Left => WallDirection::Right,
        }
    }
}

/// Four wall bits indexed `[Top, Right, Bottom, Left]`, true when the wall is present.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct WallMask([bool; 4]);

impl WallMask {
    pub fn closed() -> WallMask {
        WallMask([true; 4])
    }

    #[inline]
    pub fn is_closed(&self, dir: WallDirection) -> bool {
        self.0[dir.index()]
    }

    #[inline]
    pub fn open(&mut self, dir: WallDirection) {
        self.0[dir.index()] = false;
    }

    /// How many of the four walls are still standing.
    pub fn closed_count(&self) -> usize {
        self.0.iter().filter(|&&wall| wall).count()
    }

    /// The mask as 0/1 integers, 1 = wall present.
    pub fn bits(&self) -> [u8; 4] {
        let mut bits = [0u8; 4];
        for (bit, &wall) in bits.iter_mut().zip(self.0.iter()) {
            *bit = u8::from(wall);
        }
        bits
    }
}

impl Default for WallMask {
    fn default() -> WallMask {
        WallMask::closed()
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize)]
pub enum CellRole {
    None,
    Start,
    Finish,
}

impl Default for CellRole {
    fn default() -> CellRole {
        CellRole::None
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Cell {
    pub visited: bool,
    pub role: CellRole,
    pub walls: WallMask,
}

impl Cell {
    /// Unvisited, no role, all four walls standing.
    pub fn new() -> Cell {
        Cell::default()
    }
}
