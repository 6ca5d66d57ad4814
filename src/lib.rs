//! **mazes** generates perfect mazes on square grids and lays their walls out as flat numeric
//! arrays for an external isometric renderer.
//!
//! The pipeline runs generate → trim boundary → consolidate wall runs → split into unit tiles →
//! depth order, and never performs any I/O.
//!
//! ```
//! use mazes::{Maze, rng::RngSource};
//!
//! let maze = Maze::generate(8, &mut RngSource::seeded(42)).unwrap();
//! let arrays = maze.arrays();
//! assert_eq!(arrays.cell_walls.len(), 8 * 8 * 4);
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_iterators;
pub mod pathing;
pub mod rng;
pub mod serialization;
pub mod units;
pub mod walls;
mod utils;

use tracing::debug;

use crate::cells::Coordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::serialization::MazeArrays;
use crate::walls::WallSegment;

/// A generated maze and its derived wall layout. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    segments: Vec<WallSegment>,
    tiles: Vec<WallSegment>,
}

impl Maze {
    /// Run the whole pipeline on a fresh `size` x `size` grid.
    pub fn generate<R>(size: usize, rng: &mut R) -> Result<Maze>
        where R: RandomSource + ?Sized
    {
        let mut grid = Grid::new(size)?;
        generators::recursive_backtracker(&mut grid, rng)?;
        grid.trim_boundary_walls();

        let segments = walls::consolidate_walls(&grid);
        let mut tiles = walls::split_into_tiles(&segments);
        walls::depth_order(&mut tiles);

        debug!(size,
               segments = segments.len(),
               tiles = tiles.len(),
               "maze wall layout built");

        Ok(Maze {
            grid,
            segments,
            tiles,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Wall runs in consolidation order: all row segments, then all column segments.
    pub fn segments(&self) -> &[WallSegment] {
        &self.segments
    }

    /// Unit tiles in draw order.
    pub fn tiles(&self) -> &[WallSegment] {
        &self.tiles
    }

    pub fn arrays(&self) -> MazeArrays {
        MazeArrays::new(&self.grid, &self.segments, &self.tiles)
    }

    /// The unique path from the start cell to the finish cell.
    pub fn solution(&self) -> Option<Vec<Coordinate>> {
        pathing::solution_path(&self.grid)
    }
}

/// Generate a maze and return only the renderer arrays.
pub fn generate_arrays<R>(size: usize, rng: &mut R) -> Result<MazeArrays>
    where R: RandomSource + ?Sized
{
    Maze::generate(size, rng).map(|maze| maze.arrays())
}
