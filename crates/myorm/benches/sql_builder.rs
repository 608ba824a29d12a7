use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use myorm::{Connection, Cursor, DriverResult, Example, Op, Orm, Row, Value};

/// A connection that only backs statement rendering; the benches never
/// execute anything.
struct NoopConn;

impl Connection for NoopConn {
    fn cursor(&self) -> DriverResult<Box<dyn Cursor + '_>> {
        Err("benches never execute".into())
    }

    fn commit(&self) -> DriverResult<()> {
        Ok(())
    }

    fn rollback(&self) -> DriverResult<()> {
        Ok(())
    }

    fn close(&self) -> DriverResult<()> {
        Ok(())
    }
}

fn projected_orm(n: usize) -> Orm<NoopConn> {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
    let mut orm = Orm::new(NoopConn, "bench");
    orm.select_columns(&refs);
    orm
}

fn example_with_terms(n: usize) -> Example {
    let mut example = Example::new();
    for i in 0..n {
        example = example.and(&format!("col{i}"), Op::eq(i as i64));
    }
    example
}

fn bench_select_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/select");

    for n in [1, 5, 10, 50, 100] {
        let orm = projected_orm(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &orm, |b, orm| {
            b.iter(|| black_box(orm.select_stmt()));
        });
    }

    group.finish();
}

fn bench_example_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/example_build");

    for n in [1, 5, 10, 50] {
        let example = example_with_terms(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &example, |b, example| {
            b.iter(|| black_box(example.build()));
        });
    }

    group.finish();
}

fn bench_filtered_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/filtered_select");

    for n in [1, 5, 10, 50] {
        let orm = Orm::new(NoopConn, "bench");
        let example = example_with_terms(n);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(orm, example),
            |b, (orm, example)| {
                b.iter(|| black_box(orm.select_by_example_stmt(example)));
            },
        );
    }

    group.finish();
}

fn bench_insert_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert");

    for n in [1, 5, 10, 50] {
        let orm = Orm::new(NoopConn, "bench");
        let row: Row = (0..n)
            .map(|i| (format!("col{i}"), Value::Int(i as i64)))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &row, |b, row| {
            b.iter(|| black_box(orm.insert_stmt(row.clone())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_select_render,
    bench_example_build,
    bench_filtered_select,
    bench_insert_render
);
criterion_main!(benches);
