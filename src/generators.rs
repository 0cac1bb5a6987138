use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{CoordinateSmallVec, Grid, IndexType};
use crate::grid_traits::RenderSink;
use crate::visited::VisitedCells;

/// Carve a complete perfect maze into a freshly created grid and return the seed it was carved with.
///
/// Every cell is drawn once with all of its walls up, the entrance (top of the first cell) and
/// exit (bottom of the last cell) are opened, then the recursive backtracker carves the passages.
/// With `seed` set the result is fully reproducible; with `None` a random seed is picked and
/// returned so the same maze can be regenerated later.
pub fn generate_maze<GridIndexType, S>(grid: &mut Grid<GridIndexType>,
                                       seed: Option<u64>,
                                       sink: &mut S)
                                       -> u64
    where GridIndexType: IndexType,
          S: RenderSink + ?Sized
{
    let seed = seed.unwrap_or_else(rand::random);
    debug!(columns = grid.columns().0, rows = grid.rows().0, seed, "carving maze");

    for coord in grid.iter() {
        render_cell(grid, coord, sink);
    }

    open_entrance_and_exit(grid, sink);

    let mut rng = XorShiftRng::seed_from_u64(seed);
    recursive_backtracker(grid, &mut rng, sink);

    debug!(passages = grid.links_count(), "maze carved");
    seed
}

/// Knock out the outer wall above the top left cell and below the bottom right cell.
/// This happens before any passages are carved and does not depend on the random source.
pub fn open_entrance_and_exit<GridIndexType, S>(grid: &mut Grid<GridIndexType>, sink: &mut S)
    where GridIndexType: IndexType,
          S: RenderSink + ?Sized
{
    let entrance = grid.first_cell();
    let exit = grid.last_cell();

    grid.open_boundary(entrance, CompassPrimary::North)
        .expect("The top left cell always has a northern boundary.");
    render_cell(grid, entrance, sink);

    grid.open_boundary(exit, CompassPrimary::South)
        .expect("The bottom right cell always has a southern boundary.");
    render_cell(grid, exit, sink);
}

/// Apply the recursive backtracker maze generation algorithm to a grid, starting at the top left cell.
///
/// From the current cell pick one of its unvisited neighbours uniformly at random, carve a passage
/// to it and continue from there. When a cell has no unvisited neighbours left, back up to the cell
/// we came from and look again at what is still unvisited around it. Carving only ever goes into
/// unvisited cells so no loops are created, and every cell is reached: the result is a spanning tree.
///
/// The recursion lives on a heap stack rather than the call stack, so large grids cannot overflow it.
/// The order in which cells are explored and random numbers are drawn matches the recursive
/// formulation exactly.
pub fn recursive_backtracker<GridIndexType, R, S>(grid: &mut Grid<GridIndexType>,
                                                  rng: &mut R,
                                                  sink: &mut S)
    where GridIndexType: IndexType,
          R: Rng + ?Sized,
          S: RenderSink + ?Sized
{
    let start = grid.first_cell();
    let mut visited = VisitedCells::for_grid(grid);
    let mut stack = Vec::with_capacity(grid.size());

    visited.visit(start);
    stack.push(start);

    while let Some(&current) = stack.last() {

        // Re-check the neighbours every time: carving further down the stack may have visited
        // some of them since we last looked.
        let candidates = unvisited_neighbours(grid, &visited, current);

        if candidates.is_empty() {
            // Nothing left to carve into from here so its walls are final.
            render_cell(grid, current, sink);
            let _ = stack.pop();
            continue;
        }

        let next = candidates[rng.gen_range(0..candidates.len())];
        grid.link(current, next)
            .expect("Adjacent cells on the grid can always be linked.");
        trace!(from = ?current, to = ?next, "carved passage");

        visited.visit(next);
        stack.push(next);
    }
}

fn unvisited_neighbours<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                                  visited: &VisitedCells,
                                                  coord: Cartesian2DCoordinate)
                                                  -> CoordinateSmallVec {
    grid.neighbours(coord)
        .into_iter()
        .filter(|neighbour| !visited.is_visited(*neighbour))
        .collect()
}

fn render_cell<GridIndexType, S>(grid: &Grid<GridIndexType>, coord: Cartesian2DCoordinate, sink: &mut S)
    where GridIndexType: IndexType,
          S: RenderSink + ?Sized
{
    if let Some(walls) = grid.walls(coord) {
        sink.render_walls(coord, walls);
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::cells::Walls;
    use crate::grid_traits::NoRender;
    use crate::grids::{large_rect_grid, LargeRectangularGrid};
    use crate::pathing;
    use crate::renderers::{RenderEvent, RenderLog};
    use crate::units::{ColumnLength, RowLength};
    use crate::utils::FnvHashMap;

    fn carved(w: usize, h: usize, seed: u64) -> LargeRectangularGrid {
        let mut g = large_rect_grid(RowLength(w), ColumnLength(h)).unwrap();
        let _ = generate_maze(&mut g, Some(seed), &mut NoRender);
        g
    }

    #[test]
    fn spanning_tree_passage_count() {
        for &(w, h) in &[(1, 1), (2, 2), (1, 10), (10, 1), (7, 5), (30, 30)] {
            for seed in 0..5 {
                let g = carved(w, h, seed);
                assert_eq!(g.links_count(), w * h - 1);
            }
        }
    }

    #[test]
    fn every_cell_reachable() {
        for seed in 0..10 {
            let g = carved(12, 9, seed);
            assert!(pathing::is_fully_connected(&g));
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = carved(20, 15, 42);
        let b = carved(20, 15, 42);
        assert_eq!(a.iter_links().collect::<Vec<_>>(), b.iter_links().collect::<Vec<_>>());
        for coord in a.iter() {
            assert_eq!(a.walls(coord), b.walls(coord));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = carved(20, 20, 1);
        let b = carved(20, 20, 2);
        assert_ne!(a.iter_links().collect::<Vec<_>>(), b.iter_links().collect::<Vec<_>>());
    }

    #[test]
    fn returns_the_seed_used() {
        let mut g = large_rect_grid(RowLength(6), ColumnLength(6)).unwrap();
        let seed = generate_maze(&mut g, None, &mut NoRender);
        let again = carved(6, 6, seed);
        assert_eq!(g.iter_links().collect::<Vec<_>>(), again.iter_links().collect::<Vec<_>>());
    }

    #[test]
    fn entrance_and_exit_always_open() {
        for seed in 0..20 {
            let g = carved(5, 8, seed);
            assert!(!g.has_wall(g.first_cell(), CompassPrimary::North));
            assert!(!g.has_wall(g.last_cell(), CompassPrimary::South));
            assert!(g.has_wall(g.first_cell(), CompassPrimary::West));
            assert!(g.has_wall(g.last_cell(), CompassPrimary::East));
        }
    }

    #[test]
    fn single_cell_maze_only_has_entrance_and_exit() {
        let g = carved(1, 1, 0);
        assert_eq!(g.links_count(), 0);
        assert_eq!(g.walls(g.first_cell()),
                   Some(Walls {
                       top: false,
                       bottom: false,
                       left: true,
                       right: true,
                   }));
    }

    #[test]
    fn two_by_two_seed_zero() {
        let g = carved(2, 2, 0);
        assert_eq!(g.links_count(), 3);
        assert!(pathing::is_fully_connected(&g));
    }

    #[test]
    fn backtracker_alone_carves_a_tree() {
        let mut g = large_rect_grid(RowLength(9), ColumnLength(4)).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(7);
        recursive_backtracker(&mut g, &mut rng, &mut NoRender);
        assert_eq!(g.links_count(), 35);
        assert!(pathing::is_fully_connected(&g));
        // No boundary was opened
        assert!(g.has_wall(g.first_cell(), CompassPrimary::North));
    }

    #[test]
    fn render_sink_does_not_change_the_maze() {
        let mut log = RenderLog::new();
        let mut g = large_rect_grid(RowLength(8), ColumnLength(8)).unwrap();
        let _ = generate_maze(&mut g, Some(99), &mut log);

        let quiet = carved(8, 8, 99);
        assert_eq!(g.iter_links().collect::<Vec<_>>(), quiet.iter_links().collect::<Vec<_>>());
        assert!(!log.events().is_empty());
    }

    #[test]
    fn last_drawing_of_each_cell_matches_final_walls() {
        let mut log = RenderLog::new();
        let mut g = large_rect_grid(RowLength(6), ColumnLength(4)).unwrap();
        let _ = generate_maze(&mut g, Some(3), &mut log);

        let mut last_drawn: FnvHashMap<Cartesian2DCoordinate, Walls> = Default::default();
        for event in log.events() {
            match *event {
                RenderEvent::Walls { coord, walls } => {
                    let _ = last_drawn.insert(coord, walls);
                }
                RenderEvent::Move { .. } => panic!("the generator never moves"),
            }
        }
        assert_eq!(last_drawn.len(), g.size());
        for coord in g.iter() {
            assert_eq!(Some(last_drawn[&coord]), g.walls(coord));
        }
    }

    #[test]
    fn quickcheck_perfect_mazes() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 16, h as usize % 16);
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let g = carved(w, h, seed);
            let tree = g.links_count() == w * h - 1;
            let connected = pathing::is_fully_connected(&g);
            let openings = !g.has_wall(g.first_cell(), CompassPrimary::North) &&
                           !g.has_wall(g.last_cell(), CompassPrimary::South);
            TestResult::from_bool(tree && connected && openings)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
