use criterion::{criterion_group, criterion_main, Criterion};
use maze_solver::cells::Cartesian2DCoordinate;
use maze_solver::grids::{large_rect_grid, medium_rect_grid, small_rect_grid};
use maze_solver::units::{ColumnLength, RowLength};
use maze_solver::visited::VisitedCells;

fn bench_grid_construction(c: &mut Criterion) {
    c.bench_function("maze_11_u8", |b| {
        b.iter(|| small_rect_grid(RowLength(11), ColumnLength(11)).unwrap())
    });
    c.bench_function("maze_128_u16", |b| {
        b.iter(|| medium_rect_grid(RowLength(128), ColumnLength(128)).unwrap())
    });
    c.bench_function("maze_500_u32", |b| {
        b.iter(|| large_rect_grid(RowLength(500), ColumnLength(500)).unwrap())
    });
}

fn bench_index_to_gridcoordinate(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(11), ColumnLength(11)).unwrap();
    let dims = *g.dimensions();
    c.bench_function("index_to_gridcoordinate", move |b| {
        b.iter(|| Cartesian2DCoordinate::from_row_major_index(93, &dims))
    });
}

fn bench_neighbours(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(11), ColumnLength(11)).unwrap();
    let corner = Cartesian2DCoordinate::new(0, 0);
    let mid = Cartesian2DCoordinate::new(5, 5);
    c.bench_function("neighbours_corner_of_grid", |b| b.iter(|| g.neighbours(corner)));
    c.bench_function("neighbours_middle_of_grid", |b| b.iter(|| g.neighbours(mid)));
}

fn bench_walls(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(11), ColumnLength(11)).unwrap();
    let mid = Cartesian2DCoordinate::new(5, 5);
    c.bench_function("walls_middle_of_grid", |b| b.iter(|| g.walls(mid)));
}

fn bench_visit_every_cell(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(128), ColumnLength(128)).unwrap();
    c.bench_function("visit_every_cell_128", |b| {
        b.iter(|| {
            let mut visited = VisitedCells::for_grid(&g);
            for coord in g.iter() {
                visited.visit(coord);
            }
            visited
        })
    });
}

criterion_group!(benches,
    bench_grid_construction,
    bench_index_to_gridcoordinate,
    bench_neighbours,
    bench_walls,
    bench_visit_every_cell
);
criterion_main!(benches);
