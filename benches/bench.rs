use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use inversion_comp::counter::{brute_force, merge, natural_merge};
use inversion_comp::{patterns, InversionCount};

// Brute force is quadratic, anything past this takes ages.
const MAX_BRUTE_FORCE_SIZE: usize = 2_048;

fn pin_thread_to_core() {
    use std::cell::Cell;
    let pin_core_id: usize = 2;

    thread_local! {static AFFINITY_ALREADY_SET: Cell<bool> = Cell::new(false); }

    // Set affinity only once per thread.
    AFFINITY_ALREADY_SET.with(|affinity_already_set| {
        if !affinity_already_set.get() {
            if let Some(core_id) = core_affinity::get_core_ids()
                .as_ref()
                .and_then(|ids| ids.get(pin_core_id))
            {
                core_affinity::set_for_current(*core_id);
            }

            affinity_already_set.set(true);
        }
    });
}

#[inline(never)]
fn bench_counter<C: InversionCount>(
    c: &mut Criterion,
    test_size: usize,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    // Pin the benchmark to the same core to improve repeatability. Doing it
    // this way allows criterion to do other stuff with other threads, which
    // greatly impacts overall benchmark throughput.
    pin_thread_to_core();

    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{}-{pattern_name}-{test_size}", C::name()),
        |b| {
            b.iter_batched(
                || pattern_provider(test_size),
                |mut test_data| black_box(C::count(black_box(test_data.as_mut_slice()))),
                batch_size,
            )
        },
    );
}

fn bench_patterns(c: &mut Criterion, test_size: usize) {
    let pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_dense", |len| {
            patterns::random_uniform(len, 0..=(((len as f64).log2().round()) as i32) as i32)
        }),
        ("random_binary", |len| {
            patterns::random_uniform(len, 0..=1 as i32)
        }),
        ("random_zipf", |len| patterns::random_zipf(len, 1.0)),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |len| {
            patterns::saw_mixed(len, ((len as f64).log2().round()) as usize)
        }),
        ("saws_short", |len| {
            patterns::saw_mixed(len, (len as f64 / 22.0).round() as usize)
        }),
        ("nearly_sorted", |len| patterns::adjacent_swaps(len, len / 10)),
        ("pipe_organ", patterns::pipe_organ),
    ];

    for (pattern_name, pattern_provider) in &pattern_providers {
        bench_counter::<natural_merge::CountImpl>(c, test_size, pattern_name, pattern_provider);
        bench_counter::<merge::CountImpl>(c, test_size, pattern_name, pattern_provider);

        if test_size <= MAX_BRUTE_FORCE_SIZE {
            bench_counter::<brute_force::CountImpl>(c, test_size, pattern_name, pattern_provider);
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    // Distinct values per iteration, a fixed seed would measure one input.
    patterns::disable_fixed_seed();

    for test_size in [100, 2_048, 10_000, 100_000, 1_000_000] {
        bench_patterns(c, test_size);
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
