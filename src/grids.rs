use crate::grid::{Grid, GridError};
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnLength, RowLength};

pub type SmallRectangularGrid = Grid<u8>;
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

/// Up to roughly 11 * 11 cells.
pub fn small_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<SmallRectangularGrid, GridError> {
    SmallRectangularGrid::new(RectGridDimensions::new(row_width, column_height)?)
}

pub fn medium_rect_grid(row_width: RowLength,
                        column_height: ColumnLength)
                        -> Result<MediumRectangularGrid, GridError> {
    MediumRectangularGrid::new(RectGridDimensions::new(row_width, column_height)?)
}

pub fn large_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<LargeRectangularGrid, GridError> {
    LargeRectangularGrid::new(RectGridDimensions::new(row_width, column_height)?)
}
