use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ledgerstat_core::ViewerRole;
use ledgerstat_statement::{aggregate_statement, LedgerRow, StatementContext};

fn synthetic_rows(count: usize) -> Vec<LedgerRow> {
    (0..count)
        .map(|i| {
            let number = if i % 3 == 0 {
                format!("{:03}", i % 1000)
            } else {
                format!("{:02}", i % 100)
            };
            LedgerRow::new(number, (i % 50) as i64 + 1, format!("{}", i % 20), format!("{}", i % 4), "Term")
                .with_name(format!("AG-agent{} - line", i % 13))
                .with_customer(format!("customer{}", i % 97))
                .with_discounts(10.0, 25.0)
                .with_agent_discounts(12.0, 28.0)
                .with_prizes(80.0, 500.0)
                .with_t_prize(100.0)
                .with_win_num("42")
                .with_t_numbers(["042", "420"])
        })
        .collect()
}

fn bench_aggregate_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_statement");
    let ctx = StatementContext::new(ViewerRole::Owner).with_name_prefix("AG-");

    for size in [100usize, 1_000, 10_000] {
        let rows = synthetic_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| aggregate_statement(black_box(rows), black_box(&ctx)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate_statement);
criterion_main!(benches);
