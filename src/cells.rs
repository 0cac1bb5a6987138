use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnIndex, RowIndex, RowLength};

/// A cell position on a rectangular grid. `x` is the column, `y` is the row, (0, 0) is the top left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, dimensions: &RectGridDimensions) -> Cartesian2DCoordinate {
        let RowLength(width) = dimensions.row_length();
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Cartesian2DCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable, which says nothing about whether it
    /// is on any particular grid.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// North is the top wall of a cell, South the bottom, East the right and West the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Right, down, up, left.
    /// The solver tries passages in exactly this order, which decides the path it finds when a grid
    /// has more than one. The generator enumerates candidates in the same order.
    pub const SEARCH_ORDER: [CompassPrimary; 4] = [CompassPrimary::East,
                                                   CompassPrimary::South,
                                                   CompassPrimary::North,
                                                   CompassPrimary::West];
}

/// The four wall flags of a single cell, `true` where a wall is standing.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub fn all() -> Walls {
        Walls {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.top,
            CompassPrimary::South => self.bottom,
            CompassPrimary::East => self.right,
            CompassPrimary::West => self.left,
        }
    }
}
