use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{CoordinateSmallVec, Grid, IndexType};
use crate::grid_traits::GridDisplay;
use crate::pathing::{Distances, MaxDistance};
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::FnvHashSet;


impl<MaxDistanceT> GridDisplay for Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}


/// Marks every cell on a path with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {

        let contains_coordinate = |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")

        } else if contains_coordinate(&self.end_coordinates) {

            String::from(" E ")

        } else {
            String::from("   ")
        }
    }
}


/// Box drawing text rendering of the maze. Opened outer walls, such as the entrance and exit,
/// are drawn as gaps in the border.
impl<GridIndexType> fmt::Display for Grid<GridIndexType>
    where GridIndexType: IndexType
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let ColumnsCount(columns_count) = self.columns();
        let RowsCount(rows_count) = self.rows();

        // Start by special case rendering the text for the north most boundary
        let first_grid_row: Vec<Cartesian2DCoordinate> = self.iter_row().next().unwrap_or_default();
        let mut output = String::from(WALL_RD);
        for (index, coord) in first_grid_row.iter().enumerate() {
            if self.has_wall(*coord, CompassPrimary::North) {
                output.push_str(WALL_LR_3);
            } else {
                output.push_str("   ");
            }
            let is_east_open = self.is_neighbour_linked(*coord, CompassPrimary::East);
            if is_east_open {
                output.push_str(WALL_LR);
            } else {
                let is_last_cell = index == (columns_count - 1);
                if is_last_cell {
                    output.push_str(WALL_LD);
                } else {
                    output.push_str(WALL_LRD);
                }
            }
        }
        output.push('\n');

        for (index_row, row) in self.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            // The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::new();
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let render_cell_side = |direction, passage_clear_text, blocking_wall_text| {
                    if self.has_wall(cell_coord, direction) {
                        blocking_wall_text
                    } else {
                        passage_clear_text
                    }
                };
                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = self.is_neighbour_linked(cell_coord, CompassPrimary::East);
                let south_open = self.is_neighbour_linked(cell_coord, CompassPrimary::South);

                if is_first_column {
                    row_middle_section_render.push_str(render_cell_side(CompassPrimary::West, " ", WALL_UD));
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }

                // Each cell will simply use the southern wall of the cell above
                // it as its own northern wall, so we only need to worry about the cell’s body (room space),
                // its eastern boundary ('|'), and its southern boundary ('---+') minus the south west corner.
                let east_boundary = render_cell_side(CompassPrimary::East, " ", WALL_UD);

                // Cell Body
                if let Some(ref displayer) = *self.grid_display() {
                    row_middle_section_render.push_str(displayer.render_cell_body(cell_coord).as_str());
                } else {
                    row_middle_section_render.push_str(default_cell_body.as_str());
                }

                row_middle_section_render.push_str(east_boundary);

                let south_boundary = render_cell_side(CompassPrimary::South, "   ", WALL_LR_3);
                row_bottom_section_render.push_str(south_boundary);

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            self.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false,
                                        |c| self.is_neighbour_linked(c, CompassPrimary::South));
                        let access_se_from_south =
                            self.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false,
                                        |c| self.is_neighbour_linked(c, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(row_middle_section_render.as_ref());
            output.push('\n');
            output.push_str(row_bottom_section_render.as_ref());
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use smallvec::smallvec;

    use super::*;
    use crate::grids::{small_rect_grid, SmallRectangularGrid};
    use crate::units::{ColumnLength, RowLength};

    fn small_grid(w: usize, h: usize) -> SmallRectangularGrid {
        small_rect_grid(RowLength(w), ColumnLength(h)).unwrap()
    }

    fn corridor_2_by_1() -> SmallRectangularGrid {
        let mut g = small_grid(2, 1);
        g.link(Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0))
            .expect("Link Failed");
        g
    }

    #[test]
    fn closed_single_cell() {
        let g = small_grid(1, 1);
        assert_eq!(g.to_string(), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn entrance_and_exit_are_gaps() {
        let mut g = small_grid(1, 1);
        let cell = g.first_cell();
        g.open_boundary(cell, CompassPrimary::North).expect("Open Failed");
        g.open_boundary(cell, CompassPrimary::South).expect("Open Failed");
        assert_eq!(g.to_string(), "┌   ┐\n│   │\n└   ┘\n");
    }

    #[test]
    fn unlinked_grid_draws_every_wall() {
        let g = small_grid(2, 2);
        let expected = "┌───┬───┐\n\
                        │   │   │\n\
                        ├───┼───┤\n\
                        │   │   │\n\
                        └───┴───┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn fully_linked_grid_has_no_inner_walls() {
        let mut g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        g.link(gc(0, 0), gc(1, 0)).expect("Link Failed");
        g.link(gc(0, 0), gc(0, 1)).expect("Link Failed");
        g.link(gc(1, 0), gc(1, 1)).expect("Link Failed");
        g.link(gc(0, 1), gc(1, 1)).expect("Link Failed");
        let expected = "┌───────┐\n\
                        │       │\n\
                        │       │\n\
                        │       │\n\
                        └───────┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn path_display() {
        let mut g = corridor_2_by_1();
        let path = [Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0)];
        g.set_grid_display(Some(Rc::new(PathDisplay::new(&path))));
        assert_eq!(g.to_string(), "┌───────┐\n│ .   . │\n└───────┘\n");
    }

    #[test]
    fn start_end_display() {
        let mut g = corridor_2_by_1();
        let starts: CoordinateSmallVec = smallvec![Cartesian2DCoordinate::new(0, 0)];
        let ends: CoordinateSmallVec = smallvec![Cartesian2DCoordinate::new(1, 0)];
        g.set_grid_display(Some(Rc::new(StartEndPointsDisplay::new(starts, ends))));
        assert_eq!(g.to_string(), "┌───────┐\n│ S   E │\n└───────┘\n");
    }

    #[test]
    fn distances_display() {
        let mut g = corridor_2_by_1();
        let distances = Distances::<u32>::new(&g, g.first_cell()).unwrap();
        g.set_grid_display(Some(Rc::new(distances)));
        assert_eq!(g.to_string(), "┌───────┐\n│ 0   1 │\n└───────┘\n");
    }
}
