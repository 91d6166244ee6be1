use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use storefront_catalog::fixtures::seed_products;
use storefront_catalog::{
    FilterState, PageRequest, Product, ProductCategory, SortDirection, SortField, SortSpec, run_pipeline,
};

/// Repeat the seed catalog until it holds `n` products with distinct ids.
fn catalog_of(n: usize) -> Vec<Product> {
    let seed = seed_products();
    (0..n)
        .map(|i| {
            let mut p = seed[i % seed.len()].clone();
            p.id = format!("bench-{i}").parse().unwrap();
            p.name = format!("{} {i}", p.name);
            p.price += (i % 97) as f64;
            p
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_pipeline");

    let state = FilterState::default()
        .with_query("o")
        .with_categories([ProductCategory::Electronics, ProductCategory::Books, ProductCategory::Home])
        .with_sort(SortSpec::new(SortField::Name, SortDirection::Descending));
    let request = PageRequest::new(2, 25).unwrap();

    for size in [100usize, 1_000, 10_000] {
        let products = catalog_of(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("filter_sort_page", size), &products, |b, products| {
            b.iter(|| run_pipeline(black_box(products), black_box(&state), request))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
