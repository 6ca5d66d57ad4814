// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
use error_chain::*;

use crate::cells::Coordinate;

/// Smallest grid with any interior wall topology.
pub const MIN_GRID_SIZE: usize = 2;

error_chain! {
    errors {
        InvalidGridSize(size: usize) {
            description("invalid grid size")
            display("grid size must be at least {}, got {}", MIN_GRID_SIZE, size)
        }
        InvalidCoordinate(coord: Coordinate) {
            description("coordinate outside of the grid")
            display("coordinate ({}, {}) is outside of the grid", coord.col, coord.row)
        }
        NotAdjacent(a: Coordinate, b: Coordinate) {
            description("cells are not adjacent")
            display("cells ({}, {}) and ({}, {}) do not share a wall", a.col, a.row, b.col, b.row)
        }
    }
}
