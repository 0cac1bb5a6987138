//! **maze_solver** carves random perfect mazes on a rectangular grid and finds the route through them.
//!
//! A maze is carved with the recursive backtracker from a seedable random source, with its entrance
//! on top of the top left cell and its exit below the bottom right cell. A backtracking depth first
//! search then walks from the entrance to the exit. Both report what they do to a `RenderSink` so
//! the progress can be drawn as it happens.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod grids;
pub mod maze;
pub mod pathing;
pub mod renderers;
pub mod solver;
pub mod units;
pub mod visited;
mod utils;
