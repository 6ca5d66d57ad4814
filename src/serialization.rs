//! Flat numeric arrays handed to an external renderer.

use serde_derive::Serialize;

use crate::cells::{CellRole, Coordinate};
use crate::grid::Grid;
use crate::walls::WallSegment;

/// Coordinates and role of one cell, for start/finish markers.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
pub struct CellRecord {
    pub col: usize,
    pub row: usize,
    pub role: CellRole,
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize)]
pub struct MazeArrays {
    /// Every cell's `[Top, Right, Bottom, Left]` wall bits, in grid storage order.
    pub cell_walls: Vec<u32>,
    /// `[orientation flag, index, start]` per depth ordered tile.
    pub polygon_data: Vec<u32>,
    /// `[orientation flag, index, start, length]` per segment, in consolidation order.
    pub parametric_data: Vec<u32>,
    pub cells: Vec<CellRecord>,
}

impl MazeArrays {
    pub fn new(grid: &Grid, segments: &[WallSegment], ordered_tiles: &[WallSegment]) -> MazeArrays {
        MazeArrays {
            cell_walls: cell_walls(grid),
            polygon_data: polygon_data(ordered_tiles),
            parametric_data: parametric_data(segments),
            cells: cell_records(grid),
        }
    }
}

pub fn cell_walls(grid: &Grid) -> Vec<u32> {
    grid.cells()
        .iter()
        .flat_map(|cell| cell.walls.bits())
        .map(u32::from)
        .collect()
}

pub fn polygon_data(tiles: &[WallSegment]) -> Vec<u32> {
    tiles.iter()
        .flat_map(|tile| [tile.orientation.flag(), tile.index as u32, tile.start as u32])
        .collect()
}

pub fn parametric_data(segments: &[WallSegment]) -> Vec<u32> {
    segments.iter()
        .flat_map(|segment| {
            [segment.orientation.flag(),
             segment.index as u32,
             segment.start as u32,
             segment.length as u32]
        })
        .collect()
}

pub fn cell_records(grid: &Grid) -> Vec<CellRecord> {
    grid.iter()
        .zip(grid.cells())
        .map(|(Coordinate { col, row }, cell)| {
            CellRecord {
                col,
                row,
                role: cell.role,
            }
        })
        .collect()
}
