use std::error::Error;
use std::fmt;
use std::rc::Rc;
use std::slice;

use petgraph::{Graph, Undirected};
use petgraph::graph;
pub use petgraph::graph::IndexType;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, Walls};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{RectBatchIter, RectGridCellIter};
use crate::grid_traits::GridDisplay;
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};
use crate::utils::{self, FnvHashSet};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;

/// A rectangular grid of cells.
///
/// Each passage between two adjacent cells is one undirected edge in the graph, so the wall between
/// a cell and its neighbour is the same wall seen from either side. Walls on the outer edge of the
/// grid stand unless explicitly opened with `open_boundary`.
pub struct Grid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    dimensions: RectGridDimensions,
    boundary_openings: FnvHashSet<(Cartesian2DCoordinate, CompassPrimary)>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    ZeroDimension,
    /// The graph index type cannot address every cell and passage of the requested grid.
    TooLarge { cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::ZeroDimension => write!(f, "grid rows and columns must be greater than zero"),
            GridError::TooLarge { cells } => {
                write!(f, "a grid of {} cells is too large to index", cells)
            }
        }
    }
}

impl Error for GridError {}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
    NotBoundary,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            CellLinkError::InvalidGridCoordinate => "coordinate is outside the grid",
            CellLinkError::SelfLink => "a cell cannot be linked to itself",
            CellLinkError::NotNeighbours => "only adjacent cells can be linked",
            CellLinkError::NotBoundary => "the wall is shared with a neighbour, not on the grid boundary",
        };
        f.write_str(reason)
    }
}

impl Error for CellLinkError {}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, rows: {:?}, columns: {:?}, boundary openings: {:?}",
               self.graph, self.rows(), self.columns(), self.boundary_openings)
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {

    /// Creates every cell up front with all four walls standing.
    pub fn new(dimensions: RectGridDimensions) -> Result<Grid<GridIndexType>, GridError> {

        let (NodesCount(nodes), EdgesCount(max_edges)) = dimensions.graph_size();

        // The maximum index value is reserved by petgraph as the 'end' marker.
        let max_index = <GridIndexType as IndexType>::max().index();
        if nodes > max_index || max_edges > max_index {
            return Err(GridError::TooLarge { cells: nodes });
        }

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, nodes),
            dimensions,
            boundary_openings: utils::fnv_hashset(2),
            grid_display: None,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        Ok(grid)
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.dimensions.row_length()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.dimensions.column_length()
    }

    /// Top left cell.
    #[inline]
    pub fn first_cell(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// Bottom right cell.
    #[inline]
    pub fn last_cell(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.columns().0 - 1) as u32, (self.rows().0 - 1) as u32)
    }

    /// Link two adjacent cells, carving away the wall they share.
    /// Linking cells that are already linked is a no-op.
    pub fn link(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                if !self.is_neighbour(a, b) {
                    return Err(CellLinkError::NotNeighbours);
                }
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Unlink two cells, if the grid coordinates are valid and a link exists between them.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);

        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // This will invalidate the last edge index in the graph, which is fine as we
                // are not storing them for any reason.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Open the wall on an outer side of the grid, e.g. the top of the entrance cell.
    pub fn open_boundary(&mut self,
                         coord: Cartesian2DCoordinate,
                         direction: CompassPrimary)
                         -> Result<(), CellLinkError> {
        if !self.is_valid_coordinate(coord) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        if self.neighbour_at_direction(coord, direction).is_some() {
            return Err(CellLinkError::NotBoundary);
        }
        let _ = self.boundary_openings.insert((coord, direction));
        Ok(())
    }

    #[inline]
    pub fn is_boundary_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.boundary_openings.contains(&(coord, direction))
    }

    /// Is there a wall on the `direction` side of the cell?
    /// Off grid coordinates are treated as solid.
    pub fn has_wall(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        if !self.is_valid_coordinate(coord) {
            return true;
        }
        match self.neighbour_at_direction(coord, direction) {
            Some(neighbour_coord) => !self.is_linked(coord, neighbour_coord),
            None => !self.is_boundary_open(coord, direction),
        }
    }

    /// All four wall flags of a cell, None if the coordinate is not on the grid.
    pub fn walls(&self, coord: Cartesian2DCoordinate) -> Option<Walls> {
        if self.is_valid_coordinate(coord) {
            Some(Walls {
                top: self.has_wall(coord, CompassPrimary::North),
                bottom: self.has_wall(coord, CompassPrimary::South),
                left: self.has_wall(coord, CompassPrimary::West),
                right: self.has_wall(coord, CompassPrimary::East),
            })
        } else {
            None
        }
    }

    /// Cell nodes that are linked to a particular node by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {

        if let Some(graph_node_index) = self.grid_coordinate_graph_index(coord) {

            let linked_cells = self.graph
                .neighbors(graph_node_index)
                .map(|grid_node_index| {
                    Cartesian2DCoordinate::from_row_major_index(grid_node_index.index(), &self.dimensions)
                })
                .collect();
            Some(linked_cells)
        } else {
            None
        }
    }

    /// Cell nodes that are to the East, South, North or West of a particular node, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::SEARCH_ORDER
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false,
                    |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let RowLength(row_size) = self.row_length();
            Some((coord.y as usize * row_size) + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(&self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RectBatchIter {
        RectBatchIter::rows(&self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> RectBatchIter {
        RectBatchIter::columns(&self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<'_, GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            dimensions: &self.dimensions,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.columns().0 && (coord.y as usize) < self.rows().0
    }

    fn is_neighbour(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.neighbours(a).iter().any(|&coord| coord == b)
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        let grid_index_raw_opt = self.grid_coordinate_to_index(coord);
        grid_index_raw_opt.map(graph::NodeIndex::<GridIndexType>::new)
    }
}

/// Every passage of a grid as a pair of cell coordinates, in the order they were carved.
pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    dimensions: &'a RectGridDimensions,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let dimensions = self.dimensions;
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                             dimensions);
            let dst_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                             dimensions);
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}
