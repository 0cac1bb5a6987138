use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use maze_solver::cells::Cartesian2DCoordinate;
use maze_solver::generators;
use maze_solver::grid_traits::NoRender;
use maze_solver::grids::{large_rect_grid, LargeRectangularGrid};
use maze_solver::pathing;
use maze_solver::solver;
use maze_solver::units::{ColumnLength, RowLength};

type U32Distances = pathing::Distances<u32>;

fn carved_350() -> LargeRectangularGrid {
    let mut g = large_rect_grid(RowLength(350), ColumnLength(350)).unwrap();
    generators::generate_maze(&mut g, Some(350), &mut NoRender);
    g
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = carved_350();
        let start_coord = Cartesian2DCoordinate::new(250, 250);
        b.iter(|| U32Distances::new(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = carved_350();
        let start_coord = Cartesian2DCoordinate::new(250, 250);
        let distances = U32Distances::new(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = carved_350();
        let start_coord = Cartesian2DCoordinate::new(250, 250);
        let distances = U32Distances::new(&g, start_coord).unwrap();
        let end_coord = Cartesian2DCoordinate::new(0, 0);
        b.iter(|| pathing::shortest_path(&g, &distances, end_coord))
    });
}

fn bench_backtracking_solver(c: &mut Criterion) {
    c.bench_function("backtracking_solver", |b| {
        let g = carved_350();
        b.iter(|| solver::solve(&g, &mut NoRender))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path,
    bench_backtracking_solver
);
criterion_main!(benches);
