use criterion::Criterion;
use theseus::{Generation, Maze, ProbBinding, DEFAULT_MAZE};

fn bench_run(bench: &mut Criterion) {
    let maze = Maze::new(DEFAULT_MAZE).unwrap();
    let mut seed = 0;

    bench.bench_function("run-100x50", |b| {
        b.iter(|| {
            seed += 1;
            Generation::new(&maze, ProbBinding::seeded(seed), 100, 50)
                .unwrap()
                .run(&mut ())
                .unwrap()
        })
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(100)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_run(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
