use tracing::debug;

use crate::cells::{CellRole, Coordinate, CoordinateSmallVec};
use crate::errors::*;
use crate::grid::Grid;
use crate::rng::RandomSource;

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Starts from a uniformly random cell and walks to random unvisited neighbours, carving a
/// passage each step. When the walk is boxed in by visited cells it backtracks along its
/// stack until a cell with unvisited neighbours turns up. Every cell is visited exactly once,
/// so the carved passages form a spanning tree: a perfect maze.
///
/// The walk is an explicit loop over a `current` cell, a backtrack stack and a visited count,
/// so large grids do not grow the call stack.
///
/// Panics if the random source answers outside of the range it was asked for.
pub fn recursive_backtracker<R>(grid: &mut Grid, rng: &mut R) -> Result<()>
    where R: RandomSource + ?Sized
{
    let cells_count = grid.cells_count();

    let start_index = rng.next_random(cells_count);
    let start = grid.index_to_cell_coordinate(start_index)
        .unwrap_or_else(|| {
            panic!("random source answered {} when choosing among {} cells",
                   start_index,
                   cells_count)
        });

    let mut visited_count = 0;
    visit(grid, start, visited_count);
    visited_count += 1;

    let mut stack = Vec::with_capacity(cells_count);
    stack.push(start);
    let mut current = start;
    let mut backtracks = 0usize;

    while visited_count < cells_count {

        let unvisited: CoordinateSmallVec = grid.neighbours(current)
            .into_iter()
            .filter(|&neighbour| grid.cell(neighbour).map_or(false, |cell| !cell.visited))
            .collect();

        if !unvisited.is_empty() {
            let choice = rng.next_random(unvisited.len());
            let next = *unvisited.get(choice)
                .unwrap_or_else(|| {
                    panic!("random source answered {} when choosing among {} neighbours",
                           choice,
                           unvisited.len())
                });

            grid.carve_passage(current, next)?;
            visit(grid, next, visited_count);
            stack.push(next);
            current = next;
            visited_count += 1;
        } else {
            // An empty stack with cells left unvisited means the walk lost track of the grid.
            current = stack.pop()
                .unwrap_or_else(|| {
                    panic!("backtracked past the first cell with {} of {} cells visited",
                           visited_count,
                           cells_count)
                });
            backtracks += 1;
        }
    }

    debug!(size = grid.size(),
           start_col = start.col,
           start_row = start.row,
           backtracks,
           "recursive backtracker visited every cell");
    Ok(())
}

fn visit(grid: &mut Grid, coord: Coordinate, visited_count: usize) {
    let role = role_for(coord, grid.size(), visited_count == 0);
    if let Some(cell) = grid.cell_mut(coord) {
        cell.visited = true;
        if role != CellRole::None {
            cell.role = role;
        }
    }
}

/// Roles are coordinate labels. The first visited cell is checked before the corner matches.
fn role_for(coord: Coordinate, size: usize, first_visit: bool) -> CellRole {
    let origin = Coordinate::new(0, 0);
    let far_corner = Coordinate::new(size - 1, size - 1);

    if first_visit && coord == origin {
        return CellRole::Start;
    }

    if coord == origin {
        CellRole::Start
    } else if coord == far_corner {
        CellRole::Finish
    } else {
        CellRole::None
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::rng::{RngSource, SequenceSource};

    fn generated(size: usize, rng: &mut dyn RandomSource) -> Grid {
        let mut g = Grid::new(size).expect("grid size too small");
        recursive_backtracker(&mut g, rng).expect("generation failed");
        g
    }

    fn count_roles(g: &Grid, role: CellRole) -> usize {
        g.cells().iter().filter(|cell| cell.role == role).count()
    }

    #[test]
    fn first_choice_walk_on_2x2() {
        let g = generated(2, &mut SequenceSource::zeros());
        let gc = |c, r| Coordinate::new(c, r);

        // (0,0) -> (1,0) -> (1,1) -> (0,1)
        assert!(g.is_linked(gc(0, 0), gc(1, 0)));
        assert!(g.is_linked(gc(1, 0), gc(1, 1)));
        assert!(g.is_linked(gc(1, 1), gc(0, 1)));
        assert!(!g.is_linked(gc(0, 0), gc(0, 1)));

        let bits: Vec<[u8; 4]> = g.cells().iter().map(|cell| cell.walls.bits()).collect();
        assert_eq!(bits, vec![[1, 0, 1, 1], [1, 0, 1, 1], [1, 1, 0, 0], [0, 1, 1, 0]]);
    }

    #[test]
    fn roles_are_assigned_by_coordinate() {
        let g = generated(3, &mut SequenceSource::zeros());
        assert_eq!(g.cell(Coordinate::new(0, 0)).unwrap().role, CellRole::Start);
        assert_eq!(g.cell(Coordinate::new(2, 2)).unwrap().role, CellRole::Finish);
        assert_eq!(count_roles(&g, CellRole::Start), 1);
        assert_eq!(count_roles(&g, CellRole::Finish), 1);
    }

    #[test]
    fn walk_may_start_anywhere() {
        // Storage index 3 on a 2x2 grid is the far corner.
        let g = generated(2, &mut SequenceSource::new(vec![3, 0, 0, 0]));
        assert_eq!(g.cell(Coordinate::new(1, 1)).unwrap().role, CellRole::Finish);
        assert_eq!(g.cell(Coordinate::new(0, 0)).unwrap().role, CellRole::Start);
        assert!(g.is_perfect_maze());
    }

    #[test]
    fn role_precedence() {
        assert_eq!(role_for(Coordinate::new(0, 0), 4, true), CellRole::Start);
        assert_eq!(role_for(Coordinate::new(0, 0), 4, false), CellRole::Start);
        assert_eq!(role_for(Coordinate::new(3, 3), 4, true), CellRole::Finish);
        assert_eq!(role_for(Coordinate::new(3, 3), 4, false), CellRole::Finish);
        assert_eq!(role_for(Coordinate::new(1, 2), 4, true), CellRole::None);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generated(12, &mut RngSource::seeded(99999));
        let b = generated(12, &mut RngSource::seeded(99999));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_different_mazes() {
        let a = generated(12, &mut RngSource::seeded(11111));
        let b = generated(12, &mut RngSource::seeded(22222));
        assert_ne!(a, b);
    }

    #[test]
    fn large_grid_does_not_overflow_the_stack() {
        let g = generated(200, &mut RngSource::seeded(7));
        assert!(g.is_perfect_maze());
    }

    #[test]
    #[should_panic]
    fn out_of_range_start_is_a_contract_violation() {
        let _ = generated(2, &mut SequenceSource::new(vec![4]));
    }

    #[test]
    #[should_panic]
    fn out_of_range_neighbour_is_a_contract_violation() {
        let _ = generated(3, &mut SequenceSource::new(vec![0, 2]));
    }

    #[test]
    fn quickcheck_perfect_maze() {
        fn p(seed: u64, size: u8) -> TestResult {
            let size = size as usize % 14;
            if size < 2 {
                return TestResult::discard();
            }
            let g = generated(size, &mut RngSource::seeded(seed));
            TestResult::from_bool(g.is_perfect_maze() && g.cells().iter().all(|cell| cell.visited))
        }
        quickcheck(p as fn(u64, u8) -> TestResult)
    }

    #[test]
    fn quickcheck_walls_are_symmetric() {
        fn p(seed: u64, size: u8) -> TestResult {
            let size = size as usize % 14;
            if size < 2 {
                return TestResult::discard();
            }
            let g = generated(size, &mut RngSource::seeded(seed));
            let symmetric = g.iter().all(|coord| {
                g.neighbours(coord).iter().all(|&neighbour| {
                    let dir = g.direction_to(coord, neighbour).unwrap();
                    let here = g.cell(coord).unwrap().walls.is_closed(dir);
                    let there = g.cell(neighbour).unwrap().walls.is_closed(dir.opposite());
                    here == there
                })
            });
            TestResult::from_bool(symmetric)
        }
        quickcheck(p as fn(u64, u8) -> TestResult)
    }

    #[test]
    fn quickcheck_one_start_one_finish() {
        fn p(seed: u64, size: u8) -> TestResult {
            let size = size as usize % 14;
            if size < 2 {
                return TestResult::discard();
            }
            let g = generated(size, &mut RngSource::seeded(seed));
            let start = g.cell(Coordinate::new(0, 0)).unwrap().role == CellRole::Start;
            let finish = g.cell(Coordinate::new(size - 1, size - 1)).unwrap().role ==
                         CellRole::Finish;
            TestResult::from_bool(start && finish && count_roles(&g, CellRole::Start) == 1 &&
                                  count_roles(&g, CellRole::Finish) == 1)
        }
        quickcheck(p as fn(u64, u8) -> TestResult)
    }

    #[test]
    fn every_2x2_maze_keeps_one_interior_wall() {
        for seed in 0..64 {
            let mut g = generated(2, &mut RngSource::seeded(seed));
            assert_eq!(g.passages_count().0, 3);
            g.trim_boundary_walls();
            let interior_walls: usize = g.cells()
                .iter()
                .map(|cell| cell.walls.closed_count())
                .sum();
            // one closed interior wall, seen from both of its cells
            assert_eq!(interior_walls, 2);
            for cell in g.cells() {
                assert!(cell.walls.closed_count() <= 1);
            }
        }
    }
}
