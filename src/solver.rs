use tracing::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{Grid, IndexType};
use crate::grid_traits::RenderSink;
use crate::visited::VisitedCells;

/// The outcome of one depth first search through a maze.
#[derive(Debug, Clone)]
pub struct Solution {
    path: Vec<Cartesian2DCoordinate>,
    visited: VisitedCells,
    moves_count: usize,
    undo_count: usize,
}

impl Solution {
    #[inline]
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// The cells from the start to the end point inclusive, empty if no path was found.
    #[inline]
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    /// Every cell the search went into, including those on abandoned branches.
    #[inline]
    pub fn visited(&self) -> &VisitedCells {
        &self.visited
    }

    /// Forward steps taken from one cell into a neighbour.
    #[inline]
    pub fn moves_count(&self) -> usize {
        self.moves_count
    }

    /// Steps that were backtracked over after the branch led nowhere.
    #[inline]
    pub fn undo_count(&self) -> usize {
        self.undo_count
    }
}

/// One cell on the search stack and the index into `CompassPrimary::SEARCH_ORDER` of the next
/// direction to try from it.
#[derive(Debug, Copy, Clone)]
struct Frame {
    coord: Cartesian2DCoordinate,
    next_direction: usize,
}

/// Find a path from the top left entrance cell to the bottom right exit cell.
pub fn solve<GridIndexType, S>(grid: &Grid<GridIndexType>, sink: &mut S) -> Solution
    where GridIndexType: IndexType,
          S: RenderSink + ?Sized
{
    let (start, end) = (grid.first_cell(), grid.last_cell());
    search(grid, start, end, sink)
}

/// Find a path between any two cells, None if either is not on the grid.
pub fn solve_between<GridIndexType, S>(grid: &Grid<GridIndexType>,
                                       start: Cartesian2DCoordinate,
                                       end: Cartesian2DCoordinate,
                                       sink: &mut S)
                                       -> Option<Solution>
    where GridIndexType: IndexType,
          S: RenderSink + ?Sized
{
    if grid.is_valid_coordinate(start) && grid.is_valid_coordinate(end) {
        Some(search(grid, start, end, sink))
    } else {
        None
    }
}

/// Depth first search with backtracking.
///
/// From each cell the open passages are tried right, down, up then left, descending into the first
/// unvisited neighbour found. A branch that dead ends is backed out of and the next direction tried.
/// The first path to reach the end wins, which is not necessarily the shortest unless the maze is
/// perfect. Cells are never entered twice, even when they were only reached on a failed branch.
///
/// A `render_move` is emitted before each step forward and a matching undo after each step back.
fn search<GridIndexType, S>(grid: &Grid<GridIndexType>,
                            start: Cartesian2DCoordinate,
                            end: Cartesian2DCoordinate,
                            sink: &mut S)
                            -> Solution
    where GridIndexType: IndexType,
          S: RenderSink + ?Sized
{
    let mut visited = VisitedCells::for_grid(grid);
    let mut moves_count = 0;
    let mut undo_count = 0;

    visited.visit(start);
    let mut stack = vec![Frame {
                             coord: start,
                             next_direction: 0,
                         }];

    let found = if start == end {
        true
    } else {
        let mut found = false;

        while let Some(frame) = stack.last_mut() {

            if frame.next_direction >= CompassPrimary::SEARCH_ORDER.len() {
                // Every direction from here failed, return to the cell we came from.
                let dead_end = frame.coord;
                let _ = stack.pop();
                if let Some(parent) = stack.last() {
                    sink.render_move(parent.coord, dead_end, true);
                    undo_count += 1;
                    trace!(from = ?parent.coord, to = ?dead_end, "backtracked");
                }
                continue;
            }

            let direction = CompassPrimary::SEARCH_ORDER[frame.next_direction];
            frame.next_direction += 1;
            let current = frame.coord;

            let next = match grid.neighbour_at_direction(current, direction) {
                Some(neighbour) if grid.is_linked(current, neighbour) &&
                                   !visited.is_visited(neighbour) => neighbour,
                _ => continue,
            };

            sink.render_move(current, next, false);
            moves_count += 1;
            trace!(from = ?current, to = ?next, "moved");

            visited.visit(next);
            stack.push(Frame {
                coord: next,
                next_direction: 0,
            });

            if next == end {
                found = true;
                break;
            }
        }

        found
    };

    let path = if found {
        stack.iter().map(|frame| frame.coord).collect()
    } else {
        vec![]
    };

    debug!(solved = found,
           path_length = path.len(),
           moves = moves_count,
           undos = undo_count,
           visited = visited.len(),
           "search finished");

    Solution {
        path,
        visited,
        moves_count,
        undo_count,
    }
}
