use std::fmt;

use error_chain::bail;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cell, Coordinate, CoordinateSmallVec, WallDirection};
use crate::errors::*;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{EdgesCount, GridSize, NodesCount};

/// Undirected graph of the passages of a grid: one node per cell, one edge per open interior wall.
pub type PassageGraph = UnGraph<Coordinate, ()>;

/// A square grid of cells, stored `grid[col][row]`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    size: GridSize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid :: size: {:?}, cells: {:?}", self.size.0, self.cells.len())
    }
}

impl Grid {
    /// A grid with every cell unvisited, closed on all four sides and without a role.
    pub fn new(size: usize) -> Result<Grid> {
        if size < MIN_GRID_SIZE {
            bail!(ErrorKind::InvalidGridSize(size));
        }
        let size = GridSize(size);
        let NodesCount(cells_count) = size.nodes();
        Ok(Grid {
            cells: vec![Cell::new(); cells_count],
            size,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size.0
    }

    #[inline]
    pub fn grid_size(&self) -> GridSize {
        self.size
    }

    /// Total number of cells, `size * size`.
    #[inline]
    pub fn cells_count(&self) -> usize {
        self.cells.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.col < self.size.0 && coord.row < self.size.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range `0..cells_count()`.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn cell_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.col * self.size.0 + coord.row)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_cell_coordinate(&self, index: usize) -> Option<Coordinate> {
        if index < self.cells.len() {
            Some(Coordinate::new(index / self.size.0, index % self.size.0))
        } else {
            None
        }
    }

    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        self.cell_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        match self.cell_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    /// Cells in storage order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell coordinates that are left, right, above or below a particular cell, but not
    /// necessarily linked by a passage. Ordered `(col-1,row), (col+1,row), (col,row-1), (col,row+1)`.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        let (col, row) = (coord.col, coord.row);
        let candidates = [col.checked_sub(1).map(|c| Coordinate::new(c, row)),
                          Some(Coordinate::new(col + 1, row)),
                          row.checked_sub(1).map(|r| Coordinate::new(col, r)),
                          Some(Coordinate::new(col, row + 1))];

        candidates.iter()
            .filter_map(|candidate| *candidate)
            .filter(|&candidate| self.is_valid_coordinate(candidate))
            .collect()
    }

    /// The wall of `from` that faces `to`, if the two cells are grid adjacent.
    pub fn direction_to(&self, from: Coordinate, to: Coordinate) -> Option<WallDirection> {
        if !self.is_valid_coordinate(from) || !self.is_valid_coordinate(to) {
            return None;
        }
        if from.row == to.row {
            if to.col + 1 == from.col {
                return Some(WallDirection::Left);
            }
            if from.col + 1 == to.col {
                return Some(WallDirection::Right);
            }
        } else if from.col == to.col {
            if to.row + 1 == from.row {
                return Some(WallDirection::Top);
            }
            if from.row + 1 == to.row {
                return Some(WallDirection::Bottom);
            }
        }
        None
    }

    /// Open the shared wall between two adjacent cells, clearing the bit on both sides.
    pub fn carve_passage(&mut self, a: Coordinate, b: Coordinate) -> Result<()> {
        for &coord in &[a, b] {
            if !self.is_valid_coordinate(coord) {
                bail!(ErrorKind::InvalidCoordinate(coord));
            }
        }
        let dir = self.direction_to(a, b)
            .ok_or_else(|| Error::from(ErrorKind::NotAdjacent(a, b)))?;

        if let Some(cell) = self.cell_mut(a) {
            cell.walls.open(dir);
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.walls.open(dir.opposite());
        }
        Ok(())
    }

    /// Are two adjacent cells joined by an open wall?
    pub fn is_linked(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.direction_to(a, b), self.cell(a)) {
            (Some(dir), Some(cell)) => !cell.walls.is_closed(dir),
            _ => false,
        }
    }

    /// Neighbouring cells reachable through an open wall.
    pub fn links(&self, coord: Coordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        Some(self.neighbours(coord)
            .into_iter()
            .filter(|&neighbour| self.is_linked(coord, neighbour))
            .collect())
    }

    /// Clear every wall bit that faces the outside of the grid.
    ///
    /// Idempotent and independent of the generated passages.
    pub fn trim_boundary_walls(&mut self) {
        let last = self.size.0 - 1;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let (col, row) = (index / self.size.0, index % self.size.0);
            if row == 0 {
                cell.walls.open(WallDirection::Top);
            }
            if col == last {
                cell.walls.open(WallDirection::Right);
            }
            if row == last {
                cell.walls.open(WallDirection::Bottom);
            }
            if col == 0 {
                cell.walls.open(WallDirection::Left);
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.size)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.size)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.size)
    }

    /// Build the passage graph. Node indices follow cell storage order.
    pub fn passage_graph(&self) -> PassageGraph {
        let cells_count = self.cells_count();
        let mut graph = PassageGraph::with_capacity(cells_count, cells_count);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }

        // Only the right and bottom walls, so each interior wall is seen once.
        for coord in self.iter() {
            let right = Coordinate::new(coord.col + 1, coord.row);
            let below = Coordinate::new(coord.col, coord.row + 1);
            for &other in &[right, below] {
                if let (Some(a), Some(b)) = (self.cell_coordinate_to_index(coord),
                                             self.cell_coordinate_to_index(other)) {
                    if self.is_linked(coord, other) {
                        let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
                    }
                }
            }
        }

        graph
    }

    /// Number of open interior walls.
    pub fn passages_count(&self) -> EdgesCount {
        EdgesCount(self.passage_graph().edge_count())
    }

    /// A perfect maze is connected and acyclic: one component with `size² - 1` passages.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.passage_graph();
        connected_components(&graph) == 1 &&
        graph.edge_count() == self.size.edges_of_spanning_tree().0
    }
}
