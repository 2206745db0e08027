use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    generators::MazeGenerator,
    graphs::PassageGraph,
    units::{Height, Width},
};

fn generated_maze(size: usize, seed: u64) -> MazeGenerator {
    let mut generator = MazeGenerator::seeded(Width(size), Height(size), seed).unwrap();
    generator.generate().unwrap();
    generator
}

fn bench_recursive_backtracker_maze_33(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_33", |b| {
        b.iter(|| generated_maze(33, 7))
    });
}

fn bench_recursive_backtracker_maze_255(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_255", |b| {
        b.iter(|| generated_maze(255, 7))
    });
}

fn bench_recursive_backtracker_steps_33(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_steps_33", |b| {
        b.iter(|| {
            let mut generator = MazeGenerator::seeded(Width(33), Height(33), 7).unwrap();
            generator.steps().unwrap().count()
        })
    });
}

fn bench_passage_graph_127(c: &mut Criterion) {
    let generator = generated_maze(127, 7);
    c.bench_function("passage_graph_127", move |b| {
        b.iter(|| PassageGraph::from_grid(generator.grid()).is_perfect())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_33,
    bench_recursive_backtracker_maze_255,
    bench_recursive_backtracker_steps_33,
    bench_passage_graph_127
);
criterion_main!(benches);
