use crate::cells::Cartesian2DCoordinate;
use crate::generators;
use crate::grid::GridError;
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_traits::{NoRender, RenderSink};
use crate::grids::LargeRectangularGrid;
use crate::solver::{self, Solution};
use crate::units::{ColumnLength, RowLength};

/// A carved maze together with the seed that reproduces it.
///
/// The entrance is the top of the top left cell and the exit is the bottom of the bottom right cell.
#[derive(Debug)]
pub struct Maze {
    grid: LargeRectangularGrid,
    seed: u64,
}

impl Maze {
    /// Carve a `row_width` by `column_height` maze. Zero sized or overly large dimensions fail
    /// before any carving starts.
    pub fn new(row_width: RowLength, column_height: ColumnLength, seed: Option<u64>) -> Result<Maze, GridError> {
        Maze::generate_with(row_width, column_height, seed, &mut NoRender)
    }

    /// As `new`, reporting every wall drawn while carving to `sink`.
    pub fn generate_with<S>(row_width: RowLength,
                            column_height: ColumnLength,
                            seed: Option<u64>,
                            sink: &mut S)
                            -> Result<Maze, GridError>
        where S: RenderSink + ?Sized
    {
        let dimensions = RectGridDimensions::new(row_width, column_height)?;
        let mut grid = LargeRectangularGrid::new(dimensions)?;
        let seed = generators::generate_maze(&mut grid, seed, sink);
        Ok(Maze { grid, seed })
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn grid(&self) -> &LargeRectangularGrid {
        &self.grid
    }

    /// For attaching a text `GridDisplay`. Relinking cells through this breaks the maze.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut LargeRectangularGrid {
        &mut self.grid
    }

    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        self.grid.first_cell()
    }

    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        self.grid.last_cell()
    }

    pub fn solve(&self) -> bool {
        self.solve_with(&mut NoRender).is_solved()
    }

    /// Each call is a fresh search with its own visited set.
    pub fn solve_with<S>(&self, sink: &mut S) -> Solution
        where S: RenderSink + ?Sized
    {
        solver::solve(&self.grid, sink)
    }
}
