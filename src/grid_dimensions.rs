use std::cmp;

use crate::grid::GridError;
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    row_width: RowLength,
    column_height: ColumnLength,
}

impl RectGridDimensions {
    /// A `row_width` (columns) by `column_height` (rows) rectangle.
    /// Fails for a zero side or for more cells than a u32 index can address.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<RectGridDimensions, GridError> {
        if row_width.0 == 0 || column_height.0 == 0 {
            return Err(GridError::ZeroDimension);
        }
        // Every cell needs a u32 row major index.
        let cells = row_width.0.saturating_mul(column_height.0);
        if cells > std::u32::MAX as usize {
            return Err(GridError::TooLarge { cells });
        }
        Ok(RectGridDimensions {
            row_width,
            column_height,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline(always)]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline(always)]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Node count and an upper bound on the number of passages.
    /// Every pair of horizontally or vertically adjacent cells may be linked at most once.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.row_width.0, self.column_height.0);
        let horizontal_pairs = (w - 1).saturating_mul(h);
        let vertical_pairs = w.saturating_mul(h - 1);
        (self.size(), EdgesCount(cmp::max(horizontal_pairs.saturating_add(vertical_pairs), 1)))
    }
}
