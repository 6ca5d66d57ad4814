use smallvec::SmallVec;

use crate::cells::{CellRole, Coordinate, CoordinateSmallVec};
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Flood fill distances, in passage steps, from a start cell to every reachable cell.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Coordinate,
    distances: FnvHashMap<Coordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if the start coordinate is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Coordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.cells_count());
        distances.insert(start_coordinate, 0);

        // Every step costs one, so the first time a cell is reached is the shortest distance to it.
        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links: CoordinateSmallVec = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Coordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Coordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Cells at the maximum distance, in coordinate order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Coordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, &distance)| distance == furthest_distance)
            .map(|(&coord, _)| coord)
            .collect::<SmallVec<[Coordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to the
/// linked neighbour closest to the start.
///
/// None if the end point is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Coordinate)
                     -> Option<Vec<Coordinate>> {

    // Unreachable end points have no distance.
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|&coord| {
                distances_from_start.distance_from_start_to(coord).map(|distance| (coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // Not getting any closer, so the distances belong to some other grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The path from the `Start` cell to the `Finish` cell, both included.
///
/// Unique in a perfect maze. None before generation has assigned the roles.
pub fn solution_path(grid: &Grid) -> Option<Vec<Coordinate>> {
    let with_role = |role: CellRole| {
        grid.iter().find(|&coord| grid.cell(coord).map_or(false, |cell| cell.role == role))
    };
    let start = with_role(CellRole::Start)?;
    let finish = with_role(CellRole::Finish)?;

    let distances = Distances::new(grid, start)?;
    shortest_path(grid, &distances, finish)
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some arbitrary path.
pub fn longest_path(grid: &Grid) -> Option<Vec<Coordinate>> {

    let first_distances = Distances::new(grid, Coordinate::new(0, 0))?;

    // The start of the longest path is just the point furthest away from an arbitrary initial point
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
