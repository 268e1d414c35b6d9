use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlqb::{Filter, QueryBuilder};

/// Build a query with `n` columns and `n` equality predicates:
/// SELECT `col0`,`col1`,... FROM `t` WHERE (`col0` = 0 AND `col1` = 1 ...)
fn build_select(n: usize) -> QueryBuilder {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut qb = QueryBuilder::new();
    qb.select(columns).unwrap().from("t").unwrap();
    for i in 0..n {
        qb.where_eq(&format!("col{i}"), i as i64).unwrap();
    }
    qb
}

fn bench_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/sql");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let qb = build_select(n);
                black_box(qb.sql());
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut qb = QueryBuilder::new();
                qb.from("t").unwrap();
                qb.where_in("id", values.iter().copied()).unwrap();
                black_box(qb.sql());
            });
        });
    }

    group.finish();
}

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/joins");

    for n in [1, 5, 10, 25] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut qb = QueryBuilder::new();
                qb.from("t0").unwrap();
                for i in 1..=n {
                    let local = format!("t{}", i - 1);
                    qb.left_join(&format!("t{i}"), &local, ("id", "next_id")).unwrap();
                }
                black_box(qb.sql());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sql,
    bench_build_and_render,
    bench_in_list,
    bench_joins
);
criterion_main!(benches);
