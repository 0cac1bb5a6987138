use std::{
    fs::File,
    io,
    io::prelude::*,
    rc::Rc,
};

use docopt::Docopt;
use error_chain::bail;
use maze_solver::{
    cells::Cartesian2DCoordinate,
    grid::CoordinateSmallVec,
    grid_displays::{PathDisplay, StartEndPointsDisplay},
    grid_traits::{NoRender, RenderSink},
    maze::Maze,
    pathing::Distances,
    renderers::{ImageRenderSink, RenderLog},
    units::{ColumnLength, RowLength},
};
use serde_derive::Deserialize;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

const USAGE: &str = "Maze Solver

Carves a random perfect maze, then walks it with a backtracking depth first search from the
entrance (top of the top left cell) to the exit (bottom of the bottom right cell).

Usage:
    maze_solver -h | --help
    maze_solver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--show-path|--show-distances] [--text-out=<path>] [--image-out=<path> --cell-pixels=<n>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed for the maze carving. A random seed is chosen and logged if not given.
    --show-path            Mark the solved path through the maze on the text rendering.
    --show-distances       Show the distance (hexadecimal) of every cell from the entrance on the text rendering.
    --text-out=<path>      Output file path for a textual rendering of a maze. Printed to stdout if not given.
    --image-out=<path>     Output file path for an image of the carving and the solver's moves. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one cell wall in a maze image [default: 20].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u32,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageSaveError(::image::ImageError);
            Io(::std::io::Error);
            InvalidGrid(::maze_solver::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    // The image is only sized once the maze dimensions have been accepted, so the carve and the
    // solver's moves are recorded and drawn afterwards.
    let mut render_log = if args.flag_image_out.is_empty() {
        None
    } else {
        Some(RenderLog::new())
    };
    let mut no_render = NoRender;
    let sink: &mut dyn RenderSink = match render_log.as_mut() {
        Some(log) => log,
        None => &mut no_render,
    };

    let mut maze = Maze::generate_with(RowLength(width), ColumnLength(height), args.flag_seed, &mut *sink)
        .chain_err(|| format!("Cannot carve a {} by {} maze", width, height))?;
    info!(width, height, seed = maze.seed(), "maze carved");

    let solution = maze.solve_with(&mut *sink);
    if !solution.is_solved() {
        bail!("No path from the entrance to the exit of the maze with seed {}", maze.seed());
    }
    info!(path_length = solution.path().len(),
          moves = solution.moves_count(),
          undos = solution.undo_count(),
          "maze solved");

    set_maze_griddisplay(&mut maze, &args, solution.path())?;

    if args.flag_text_out.is_empty() {
        println!("{}", maze.grid());
    } else {
        write_text_to_file(&maze.grid().to_string(), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if let Some(log) = render_log {
        let mut image = ImageRenderSink::new(RowLength(width), ColumnLength(height), args.flag_cell_pixels)
            .ok_or_else(|| format!("A {} by {} maze image is too large to draw", width, height))?;
        log.replay(&mut image);
        image.save(&args.flag_image_out)
            .chain_err(|| format!("Failed to save maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

/// `RUST_LOG` if set, otherwise `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The solved path, the distances from the entrance, or just the entrance and exit markers.
fn set_maze_griddisplay(maze: &mut Maze, maze_args: &MazeArgs, path: &[Cartesian2DCoordinate]) -> Result<()> {

    if maze_args.flag_show_distances {
        let distances = Distances::<u32>::new(maze.grid(), maze.entrance())
            .ok_or("The maze entrance is not on the grid.")?;
        if let Some(furthest) = distances.furthest_points_on_grid().first() {
            info!(furthest = ?furthest, distance = distances.max(), "furthest cell from the entrance");
        }
        maze.grid_mut().set_grid_display(Some(Rc::new(distances)));
    } else if maze_args.flag_show_path {
        let display_path = Rc::new(PathDisplay::new(path));
        maze.grid_mut().set_grid_display(Some(display_path));
    } else {
        let start_points = as_coordinate_smallvec(maze.entrance());
        let end_points = as_coordinate_smallvec(maze.exit());
        let display_start_end_points = Rc::new(StartEndPointsDisplay::new(start_points, end_points));
        maze.grid_mut().set_grid_display(Some(display_start_end_points));
    }
    Ok(())
}

fn as_coordinate_smallvec(coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
    [coord].iter().cloned().collect()
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn log_level_from_environment_or_info() {
        env::remove_var("RUST_LOG");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::INFO));

        env::set_var("RUST_LOG", "debug");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::DEBUG));

        env::set_var("RUST_LOG", "maze_solver=trace");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::TRACE));
        env::remove_var("RUST_LOG");
    }
}
