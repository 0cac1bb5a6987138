use bit_set::BitSet;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::{Grid, IndexType};
use crate::grid_dimensions::RectGridDimensions;
use crate::units::RowLength;

/// The set of cells an algorithm has already been to.
///
/// Owned by whichever algorithm is running and dropped with it, so maze generation and path
/// finding never see each other's marks.
#[derive(Debug, Clone)]
pub struct VisitedCells {
    cells: BitSet,
    dimensions: RectGridDimensions,
}

impl VisitedCells {
    pub fn for_grid<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> VisitedCells {
        VisitedCells {
            cells: BitSet::with_capacity(grid.size()),
            dimensions: *grid.dimensions(),
        }
    }

    /// Mark a cell visited. Returns true if it had not been visited before.
    /// Off grid coordinates are never recorded.
    pub fn visit(&mut self, coord: Cartesian2DCoordinate) -> bool {
        match self.index(coord) {
            Some(index) => self.cells.insert(index),
            None => false,
        }
    }

    #[inline]
    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.index(coord).map_or(false, |index| self.cells.contains(index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Forget every visit.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Visited cells in row major order.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> + '_ {
        let dimensions = &self.dimensions;
        self.cells
            .iter()
            .map(move |index| Cartesian2DCoordinate::from_row_major_index(index, dimensions))
    }

    fn index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        let RowLength(width) = self.dimensions.row_length();
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < width && y < self.dimensions.rows().0 {
            Some(y * width + x)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grids::small_rect_grid;
    use crate::units::ColumnLength;

    #[test]
    fn visiting_cells() {
        let g = small_rect_grid(RowLength(3), ColumnLength(2)).unwrap();
        let mut visited = VisitedCells::for_grid(&g);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        assert!(visited.is_empty());
        assert!(visited.visit(gc(2, 1)));
        assert!(!visited.visit(gc(2, 1)));
        assert!(visited.visit(gc(0, 0)));
        assert!(visited.is_visited(gc(2, 1)));
        assert!(!visited.is_visited(gc(1, 1)));
        assert_eq!(visited.len(), 2);
        assert_eq!(visited.iter().collect::<Vec<_>>(), vec![gc(0, 0), gc(2, 1)]);
    }

    #[test]
    fn off_grid_cells_are_ignored() {
        let g = small_rect_grid(RowLength(3), ColumnLength(2)).unwrap();
        let mut visited = VisitedCells::for_grid(&g);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        assert!(!visited.visit(gc(3, 0)));
        assert!(!visited.visit(gc(0, 2)));
        assert!(!visited.is_visited(gc(3, 0)));
        assert!(visited.is_empty());
    }

    #[test]
    fn clearing_resets_every_cell() {
        let g = small_rect_grid(RowLength(2), ColumnLength(2)).unwrap();
        let mut visited = VisitedCells::for_grid(&g);
        for coord in g.iter() {
            visited.visit(coord);
        }
        assert_eq!(visited.len(), 4);
        visited.clear();
        assert!(visited.is_empty());
        assert!(g.iter().all(|coord| !visited.is_visited(coord)));
    }
}
