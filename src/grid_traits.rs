use crate::cells::{Cartesian2DCoordinate, Walls};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// A drawing surface that the maze algorithms report to while they run.
///
/// Nothing the sink does can influence the carved maze or the path found: the generator and
/// solver produce the same results whether they are given `NoRender` or a real surface.
pub trait RenderSink {
    /// The wall state of a cell has settled and can be drawn.
    /// May be called again for the same cell; drawing the same flags twice changes nothing.
    fn render_walls(&mut self, coord: Cartesian2DCoordinate, walls: Walls);

    /// The solver stepped from one cell centre to a neighbouring one, or backtracked over that
    /// step when `undo` is set.
    fn render_move(&mut self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate, undo: bool);
}

/// The sink for when nothing is watching.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoRender;

impl RenderSink for NoRender {
    #[inline(always)]
    fn render_walls(&mut self, _: Cartesian2DCoordinate, _: Walls) {}

    #[inline(always)]
    fn render_move(&mut self, _: Cartesian2DCoordinate, _: Cartesian2DCoordinate, _: bool) {}
}

impl<'a, S: RenderSink + ?Sized> RenderSink for &'a mut S {
    #[inline]
    fn render_walls(&mut self, coord: Cartesian2DCoordinate, walls: Walls) {
        (**self).render_walls(coord, walls)
    }

    #[inline]
    fn render_move(&mut self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate, undo: bool) {
        (**self).render_move(from, to, undo)
    }
}
