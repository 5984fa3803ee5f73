use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use foundry_di::RegistryBuilder;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let mut builder = RegistryBuilder::new();
    builder.add_singleton(42u64);
    let registry = builder.build();

    // Prime the singleton
    let _ = registry.get_shared::<u64>().unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = registry.get_shared::<u64>().unwrap();
            black_box(*v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let mut builder = RegistryBuilder::new();
                builder.add_singleton_factory::<ExpensiveToCreate, _>(|_| {
                    Some(ExpensiveToCreate {
                        data: (0..1000).collect(),
                    })
                });
                builder.build()
            },
            |registry| {
                let v = registry.get_shared::<ExpensiveToCreate>().unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_transient_resolve(c: &mut Criterion) {
    struct Service {
        data: [u8; 64],
    }

    let mut builder = RegistryBuilder::new();
    builder.add_transient_factory::<Service, _>(|_| Some(Service { data: [0; 64] }));
    let registry = builder.build();

    c.bench_function("transient_resolve", |b| {
        b.iter(|| {
            let v = registry.get_owned::<Service>().unwrap();
            black_box(&v.data);
        })
    });
}

fn bench_dependency_chain(c: &mut Criterion) {
    struct Config {
        workers: usize,
    }
    struct Service {
        workers: usize,
    }

    let mut builder = RegistryBuilder::new();
    builder.add_singleton(Config { workers: 4 });
    builder.add_transient_factory::<Service, _>(|resolver| {
        let config = resolver.get_shared::<Config>().ok()?;
        Some(Service {
            workers: config.workers,
        })
    });
    let registry = builder.build();

    c.bench_function("transient_with_singleton_dep", |b| {
        b.iter(|| {
            let v = registry.get_owned::<Service>().unwrap();
            black_box(v.workers);
        })
    });
}

fn bench_pool_checkout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_checkout_putback");

    let mut builder = RegistryBuilder::new();
    builder.add_locked_pool_factory::<u64, _>(4, |_| Some(7));
    let locked = builder.build();

    group.bench_function("locked_pool", |b| {
        b.iter(|| {
            let v = locked.get_owned::<u64>().unwrap();
            black_box(*v);
            // Drop returns the slot to the pool.
        })
    });

    let mut builder = RegistryBuilder::new();
    builder.add_elastic_pool_factory::<u64, _>(4, |_| Some(7));
    let elastic = builder.build();

    group.bench_function("elastic_pool", |b| {
        b.iter(|| {
            let v = elastic.get_owned::<u64>().unwrap();
            black_box(*v);
        })
    });

    group.finish();
}

fn bench_lookup_scaling(c: &mut Criterion) {
    // Named registrations under one type, below and above the point
    // where the store switches from linear scan to hashing.
    static NAMES: [&str; 32] = [
        "n00", "n01", "n02", "n03", "n04", "n05", "n06", "n07", "n08", "n09", "n10", "n11",
        "n12", "n13", "n14", "n15", "n16", "n17", "n18", "n19", "n20", "n21", "n22", "n23",
        "n24", "n25", "n26", "n27", "n28", "n29", "n30", "n31",
    ];

    let mut group = c.benchmark_group("lookup_scaling");
    for count in [4usize, 16, 32] {
        let mut builder = RegistryBuilder::new();
        for name in &NAMES[..count] {
            builder.add_named_singleton(*name, 1u64);
        }
        let registry = builder.build();
        let probe = NAMES[count - 1];

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let v = registry.get_shared_named::<u64>(probe).unwrap();
                black_box(*v);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_transient_resolve,
    bench_dependency_chain,
    bench_pool_checkout,
    bench_lookup_scaling
);
criterion_main!(benches);
