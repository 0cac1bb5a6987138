use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use itertools::Itertools;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::{Grid, IndexType};
use crate::utils::{self, FnvHashMap};


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the langauge.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


/// Flood fill step counts from one start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// None if `start_coordinate` is not on the grid.
    pub fn new<GridIndexType>(grid: &Grid<GridIndexType>,
                              start_coordinate: Cartesian2DCoordinate)
                              -> Option<Distances<MaxDistanceT>>
        where GridIndexType: IndexType
    {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = MaxDistanceT::zero();
        let cells_count = grid.size();
        let mut distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT> = utils::fnv_hashmap(cells_count);
        distances.insert(start_coordinate, MaxDistanceT::zero());

        // We don't have any weights on the links to consider, every step is just one from the previous cell
        // so we never have to change the distance to a cell once it has been set - the shortest
        // distance has already been found for that cell.
        //
        // The frontier vec does not need to be a set as the distances map effectively tracks whether a cell
        // has already been processed.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord)
                    .expect("Source cell has an invalid cell coordinate.");
                for link_coordinate in &*links {

                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + MaxDistanceT::one());
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
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells, including the start, can be reached at all.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back downhill through the distances from `end_point` to the start.
/// None if the end point cannot be reached from the start.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: Cartesian2DCoordinate)
                                                  -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{

    if distances_from_start.distance_from_start_to(end_point).is_none() {
        // The end point is not reachable from start.
        return None;
    }

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|distance| (*coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // We have not got any closer to the start, so the input data is broken.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Can every cell on the grid be reached from the top left cell?
pub fn is_fully_connected<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> bool {
    Distances::<u32>::new(grid, grid.first_cell())
        .map_or(false, |distances| distances.reachable_count() == grid.size())
}
