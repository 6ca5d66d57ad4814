//! Turning the wall bits of a generated grid into drawable wall runs and unit tiles.
//!
//! Right-hand walls are scanned along each row, bottom walls down each column. Every maximal
//! run of standing walls becomes one `WallSegment`. A renderer that can only draw one wall tile
//! at a time gets the segments split into unit tiles, sorted so that drawing them in order gives
//! correct isometric occlusion.

use std::cmp::Reverse;

use itertools::Itertools;
use serde_derive::Serialize;

use crate::cells::{Coordinate, WallDirection};
use crate::grid::Grid;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize)]
pub enum Orientation {
    /// Right-hand walls along a row.
    Row,
    /// Bottom walls down a column.
    Column,
}

impl Orientation {
    /// 0 for rows, 1 for columns.
    #[inline]
    pub fn flag(self) -> u32 {
        match self {
            Orientation::Row => 0,
            Orientation::Column => 1,
        }
    }
}

/// A run of `length` standing walls.
///
/// Row segments: `index` is the source row + 1, `start` the first column of the run.
/// Column segments: `index` is the column, `start` the first row of the run.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize)]
pub struct WallSegment {
    pub orientation: Orientation,
    pub index: usize,
    pub start: usize,
    pub length: usize,
}

impl WallSegment {
    pub fn new(orientation: Orientation, index: usize, start: usize, length: usize) -> WallSegment {
        WallSegment {
            orientation,
            index,
            start,
            length,
        }
    }

    /// A unit length tile at `start`.
    pub fn tile(orientation: Orientation, index: usize, start: usize) -> WallSegment {
        WallSegment::new(orientation, index, start, 1)
    }

    /// Isometric draw order key. Higher keys are further from the viewer.
    #[inline]
    pub fn depth_key(&self) -> isize {
        let (index, start) = (self.index as isize, self.start as isize);
        match self.orientation {
            Orientation::Row => start - index,
            Orientation::Column => index - start,
        }
    }

    /// The unit tiles covering this segment, in ascending `start` order.
    pub fn tiles(&self) -> impl Iterator<Item = WallSegment> {
        let (orientation, index) = (self.orientation, self.index);
        (self.start..self.start + self.length).map(move |start| WallSegment::tile(orientation, index, start))
    }
}

/// Maximal runs of `true` in `bits`, as `(start, length)` pairs in scan order.
///
/// A run is closed by a `false` or by the end of the sequence.
pub fn find_runs(bits: &[bool]) -> Vec<(usize, usize)> {
    let groups = bits.iter().enumerate().group_by(|&(_, &bit)| bit);
    let runs = groups.into_iter()
        .filter(|&(bit, _)| bit)
        .filter_map(|(_, mut run)| {
            run.next().map(|(start, _)| (start, 1 + run.count()))
        })
        .collect();
    runs
}

/// All wall segments of the grid: every row's right-hand walls, then every column's bottom walls.
pub fn consolidate_walls(grid: &Grid) -> Vec<WallSegment> {
    let wall_bits = |coords: &[Coordinate], dir: WallDirection| -> Vec<bool> {
        coords.iter()
            .map(|&coord| grid.cell(coord).map_or(false, |cell| cell.walls.is_closed(dir)))
            .collect()
    };

    let row_segments = grid.iter_row()
        .enumerate()
        .flat_map(|(row, coords)| {
            find_runs(&wall_bits(&coords, WallDirection::Right))
                .into_iter()
                .map(move |(start, length)| WallSegment::new(Orientation::Row, row + 1, start, length))
        });

    let column_segments = grid.iter_column()
        .enumerate()
        .flat_map(|(col, coords)| {
            find_runs(&wall_bits(&coords, WallDirection::Bottom))
                .into_iter()
                .map(move |(start, length)| WallSegment::new(Orientation::Column, col, start, length))
        });

    row_segments.chain(column_segments).collect()
}

/// Split every segment into unit tiles, keeping segment order.
pub fn split_into_tiles(segments: &[WallSegment]) -> Vec<WallSegment> {
    segments.iter().flat_map(WallSegment::tiles).collect()
}

/// Sort tiles by descending depth key. Stable, so equal keys keep their input order.
pub fn depth_order(tiles: &mut [WallSegment]) {
    tiles.sort_by_key(|tile| Reverse(tile.depth_key()));
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn runs_in_a_row() {
        let bits = [true, true, false, true, true, true, false];
        assert_eq!(find_runs(&bits), vec![(0, 2), (3, 3)]);
    }

    #[test]
    fn runs_closed_by_end_of_sequence() {
        assert_eq!(find_runs(&[false, true, true]), vec![(1, 2)]);
        assert_eq!(find_runs(&[true]), vec![(0, 1)]);
        assert_eq!(find_runs(&[true, false, true]), vec![(0, 1), (2, 1)]);
    }

    #[test]
    fn no_runs() {
        assert_eq!(find_runs(&[]), Vec::<(usize, usize)>::new());
        assert_eq!(find_runs(&[false, false, false]), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn quickcheck_runs_cover_exactly_the_set_bits() {
        fn p(bits: Vec<bool>) -> bool {
            let runs = find_runs(&bits);
            let mut covered = vec![false; bits.len()];
            for &(start, length) in &runs {
                if length == 0 {
                    return false;
                }
                for bit in covered.iter_mut().skip(start).take(length) {
                    *bit = true;
                }
            }
            // maximal: a run never touches another run or a set bit beyond its ends
            let maximal = runs.iter().all(|&(start, length)| {
                (start == 0 || !bits[start - 1]) &&
                (start + length == bits.len() || !bits[start + length])
            });
            covered == bits && maximal
        }
        quickcheck(p as fn(Vec<bool>) -> bool)
    }

    #[test]
    fn splitting_a_segment() {
        let segment = WallSegment::new(Orientation::Row, 4, 3, 3);
        assert_eq!(split_into_tiles(&[segment]),
                   vec![WallSegment::tile(Orientation::Row, 4, 3),
                        WallSegment::tile(Orientation::Row, 4, 4),
                        WallSegment::tile(Orientation::Row, 4, 5)]);
    }

    #[test]
    fn unit_segments_pass_through() {
        let segments = [WallSegment::tile(Orientation::Column, 2, 0),
                        WallSegment::new(Orientation::Column, 1, 1, 2)];
        assert_eq!(split_into_tiles(&segments),
                   vec![WallSegment::tile(Orientation::Column, 2, 0),
                        WallSegment::tile(Orientation::Column, 1, 1),
                        WallSegment::tile(Orientation::Column, 1, 2)]);
    }

    #[test]
    fn depth_keys() {
        assert_eq!(WallSegment::tile(Orientation::Row, 3, 1).depth_key(), -2);
        assert_eq!(WallSegment::tile(Orientation::Row, 1, 3).depth_key(), 2);
        assert_eq!(WallSegment::tile(Orientation::Column, 3, 1).depth_key(), 2);
        assert_eq!(WallSegment::tile(Orientation::Column, 0, 2).depth_key(), -2);
    }

    #[test]
    fn depth_order_is_descending_and_stable() {
        let row = |index, start| WallSegment::tile(Orientation::Row, index, start);
        let col = |index, start| WallSegment::tile(Orientation::Column, index, start);

        let mut tiles = vec![row(2, 0), col(1, 0), row(1, 1), col(0, 1), row(1, 0)];
        depth_order(&mut tiles);

        // keys: -2, 1, 0, -1, -1
        assert_eq!(tiles, vec![col(1, 0), row(1, 1), col(0, 1), row(1, 0), row(2, 0)]);

        let sorted = tiles.clone();
        depth_order(&mut tiles);
        assert_eq!(tiles, sorted);
    }

    #[test]
    fn consolidating_a_hand_built_grid() {
        let mut g = Grid::new(3).unwrap();
        let gc = |c, r| Coordinate::new(c, r);

        // A comb: the top row is a corridor, every column hangs down from it.
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.carve_passage(gc(1, 0), gc(2, 0)).unwrap();
        for col in 0..3 {
            g.carve_passage(gc(col, 0), gc(col, 1)).unwrap();
            g.carve_passage(gc(col, 1), gc(col, 2)).unwrap();
        }
        assert!(g.is_perfect_maze());
        g.trim_boundary_walls();

        let segments = consolidate_walls(&g);
        assert_eq!(segments,
                   vec![WallSegment::new(Orientation::Row, 2, 0, 2),
                        WallSegment::new(Orientation::Row, 3, 0, 2)]);
    }

    #[test]
    fn consolidating_columns() {
        let mut g = Grid::new(3).unwrap();
        let gc = |c, r| Coordinate::new(c, r);

        // Rows as corridors joined down the left column.
        for row in 0..3 {
            g.carve_passage(gc(0, row), gc(1, row)).unwrap();
            g.carve_passage(gc(1, row), gc(2, row)).unwrap();
        }
        g.carve_passage(gc(0, 0), gc(0, 1)).unwrap();
        g.carve_passage(gc(0, 1), gc(0, 2)).unwrap();
        g.trim_boundary_walls();

        let segments = consolidate_walls(&g);
        assert_eq!(segments,
                   vec![WallSegment::new(Orientation::Column, 1, 0, 2),
                        WallSegment::new(Orientation::Column, 2, 0, 2)]);
    }

    #[test]
    fn untrimmed_closed_grid_has_full_length_runs() {
        let g = Grid::new(2).unwrap();
        let segments = consolidate_walls(&g);
        assert_eq!(segments,
                   vec![WallSegment::new(Orientation::Row, 1, 0, 2),
                        WallSegment::new(Orientation::Row, 2, 0, 2),
                        WallSegment::new(Orientation::Column, 0, 0, 2),
                        WallSegment::new(Orientation::Column, 1, 0, 2)]);
    }
}
