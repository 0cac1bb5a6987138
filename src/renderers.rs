use std::cmp;
use std::convert::TryFrom;
use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, Walls};
use crate::grid_traits::RenderSink;
use crate::units::{ColumnLength, RowLength};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const RED: Rgb<u8> = Rgb([0xff, 0, 0]);
const GREY: Rgb<u8> = Rgb([0x80, 0x80, 0x80]);

/// Blank space around the maze so the outer walls and openings are visible.
const BORDER_PIXELS: u32 = 10;

/// Draws the maze and the solver's moves onto an in-memory image that can be saved as a PNG.
///
/// Standing walls are black, carved walls are painted over in white. Forward moves are red lines
/// between cell centres, backtracked moves are grey.
#[derive(Debug, Clone)]
pub struct ImageRenderSink {
    image: RgbImage,
    cell_pixels: u32,
}

impl ImageRenderSink {
    /// None if the image would be wider or taller than `u32::MAX` pixels.
    pub fn new(row_width: RowLength, column_height: ColumnLength, cell_pixels: u32) -> Option<ImageRenderSink> {
        let cell_pixels = cmp::max(cell_pixels, 2);
        let image_length = |cells: usize| {
            u32::try_from(cells).ok()
                .and_then(|cells| cells.checked_mul(cell_pixels))
                .and_then(|pixels| pixels.checked_add(2 * BORDER_PIXELS + 1))
        };
        let width = image_length(row_width.0)?;
        let height = image_length(column_height.0)?;
        Some(ImageRenderSink {
            image: RgbImage::from_pixel(width, height, WHITE),
            cell_pixels,
        })
    }

    #[inline]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Always PNG format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }

    /// Top left and bottom right pixel corners of a cell.
    fn cell_corners(&self, coord: Cartesian2DCoordinate) -> ((i64, i64), (i64, i64)) {
        let size = self.cell_pixels as i64;
        let x1 = BORDER_PIXELS as i64 + coord.x as i64 * size;
        let y1 = BORDER_PIXELS as i64 + coord.y as i64 * size;
        ((x1, y1), (x1 + size, y1 + size))
    }

    fn cell_centre(&self, coord: Cartesian2DCoordinate) -> (i64, i64) {
        let ((x1, y1), _) = self.cell_corners(coord);
        let half_length = self.cell_pixels as i64 / 2;
        (x1 + half_length, y1 + half_length)
    }

    fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), colour: Rgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = cmp::max(dx.abs(), dy.abs());
        if steps == 0 {
            self.put_pixel(from.0, from.1, colour);
            return;
        }
        for step in 0..=steps {
            let x = from.0 + dx * step / steps;
            let y = from.1 + dy * step / steps;
            self.put_pixel(x, y, colour);
        }
    }

    fn put_pixel(&mut self, x: i64, y: i64, colour: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, colour);
        }
    }
}

impl RenderSink for ImageRenderSink {
    fn render_walls(&mut self, coord: Cartesian2DCoordinate, walls: Walls) {
        let ((x1, y1), (x2, y2)) = self.cell_corners(coord);

        for &direction in CompassPrimary::SEARCH_ORDER.iter() {
            let (start, end) = match direction {
                CompassPrimary::North => ((x1, y1), (x2, y1)),
                CompassPrimary::South => ((x1, y2), (x2, y2)),
                CompassPrimary::East => ((x2, y1), (x2, y2)),
                CompassPrimary::West => ((x1, y1), (x1, y2)),
            };
            let colour = if walls.has_wall(direction) { BLACK } else { WHITE };
            self.draw_line(start, end, colour);
        }
    }

    fn render_move(&mut self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate, undo: bool) {
        let colour = if undo { GREY } else { RED };
        let (start, end) = (self.cell_centre(from), self.cell_centre(to));
        self.draw_line(start, end, colour);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderEvent {
    Walls {
        coord: Cartesian2DCoordinate,
        walls: Walls,
    },
    Move {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
        undo: bool,
    },
}

/// Remembers every event in the order it arrived.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    events: Vec<RenderEvent>,
}

impl RenderLog {
    pub fn new() -> RenderLog {
        RenderLog { events: vec![] }
    }

    #[inline]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Just the solver moves, as (from, to, undo).
    pub fn moves(&self) -> Vec<(Cartesian2DCoordinate, Cartesian2DCoordinate, bool)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                RenderEvent::Move { from, to, undo } => Some((from, to, undo)),
                RenderEvent::Walls { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Send every recorded event, in order, to another sink.
    pub fn replay<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for event in &self.events {
            match *event {
                RenderEvent::Walls { coord, walls } => sink.render_walls(coord, walls),
                RenderEvent::Move { from, to, undo } => sink.render_move(from, to, undo),
            }
        }
    }
}

impl RenderSink for RenderLog {
    fn render_walls(&mut self, coord: Cartesian2DCoordinate, walls: Walls) {
        self.events.push(RenderEvent::Walls { coord, walls });
    }

    fn render_move(&mut self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate, undo: bool) {
        self.events.push(RenderEvent::Move { from, to, undo });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_3_by_2() -> ImageRenderSink {
        ImageRenderSink::new(RowLength(3), ColumnLength(2), 10).unwrap()
    }

    #[test]
    fn image_size_fits_grid_and_border() {
        let sink = sink_3_by_2();
        assert_eq!(sink.image().width(), 3 * 10 + 2 * BORDER_PIXELS + 1);
        assert_eq!(sink.image().height(), 2 * 10 + 2 * BORDER_PIXELS + 1);
        assert!(sink.image().pixels().all(|pixel| *pixel == WHITE));
    }

    #[test]
    fn oversized_images_are_refused() {
        assert!(ImageRenderSink::new(RowLength(usize::MAX), ColumnLength(2), 10).is_none());
        assert!(ImageRenderSink::new(RowLength(2), ColumnLength(300_000_000), 20).is_none());
        assert!(ImageRenderSink::new(RowLength(4_000_000_000), ColumnLength(1), 2).is_none());
        assert!(ImageRenderSink::new(RowLength(1), ColumnLength(1), 20).is_some());
    }

    #[test]
    fn walls_drawn_black_and_openings_white() {
        let mut sink = sink_3_by_2();
        let walls = Walls {
            top: false,
            bottom: true,
            left: true,
            right: false,
        };
        // Paint the whole cell black first so the opening has something to cover.
        sink.render_walls(Cartesian2DCoordinate::new(0, 0), Walls::all());
        sink.render_walls(Cartesian2DCoordinate::new(0, 0), walls);

        let img = sink.image();
        assert_eq!(*img.get_pixel(15, 10), WHITE); // top middle
        assert_eq!(*img.get_pixel(10, 15), BLACK); // left middle
        assert_eq!(*img.get_pixel(20, 15), WHITE); // right middle
        assert_eq!(*img.get_pixel(15, 20), BLACK); // bottom middle
    }

    #[test]
    fn moves_and_undos_use_different_colours() {
        let mut sink = sink_3_by_2();
        let (a, b, c) = (Cartesian2DCoordinate::new(0, 0),
                         Cartesian2DCoordinate::new(1, 0),
                         Cartesian2DCoordinate::new(1, 1));
        sink.render_move(a, b, false);
        sink.render_move(b, c, true);

        let img = sink.image();
        assert_eq!(*img.get_pixel(20, 15), RED);
        assert_eq!(*img.get_pixel(25, 20), GREY);
    }

    #[test]
    fn log_keeps_event_order() {
        let mut log = RenderLog::new();
        let (a, b) = (Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(0, 1));
        log.render_walls(a, Walls::all());
        log.render_move(a, b, false);
        log.render_move(a, b, true);

        assert_eq!(log.events().len(), 3);
        assert_eq!(log.events()[0], RenderEvent::Walls { coord: a, walls: Walls::all() });
        assert_eq!(log.moves(), vec![(a, b, false), (a, b, true)]);

        let mut copy = RenderLog::new();
        log.replay(&mut copy);
        assert_eq!(copy.events(), log.events());

        log.clear();
        assert!(log.events().is_empty());
    }

    #[test]
    fn replay_draws_the_same_image() {
        let (a, b) = (Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0));
        let mut direct = sink_3_by_2();
        let mut log = RenderLog::new();
        direct.render_walls(a, Walls::all());
        direct.render_move(a, b, false);
        log.render_walls(a, Walls::all());
        log.render_move(a, b, false);

        let mut replayed = sink_3_by_2();
        log.replay(&mut replayed);
        assert_eq!(replayed.image().as_raw(), direct.image().as_raw());
    }
}
