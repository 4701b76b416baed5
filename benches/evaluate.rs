use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use psrquery::{ConditionKind, Interval, Query, Record, Registry, Slot, parse_query};

// ------------- Synthetic catalogue -------------
// roughly the mix of the real catalogue: most entries measure F0 and DM,
// fewer carry a distance, a type or an association
fn catalogue(size: usize) -> Vec<Record> {
    const TYPES: [&str; 4] = ["RADIO", "HE", "RADIO,BINARY", "XINS"];
    (0..size)
        .map(|n| {
            let mut record = Record::new()
                .with("F0", Slot::new(0.5 + (n % 700) as f64).with_error(1e-9))
                .with_value("DM", (n % 900) as f64 * 0.7);
            if n % 3 == 0 {
                record = record.with_value("DIST", (n % 25) as f64 * 0.4);
            }
            if n % 5 != 0 {
                record = record.with_value("TYPE", TYPES[n % TYPES.len()]);
            }
            if n % 40 == 0 {
                record = record.with_value("ASSOC", "GC:47Tuc[fck+06]");
            }
            record
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let registry = Registry::global();
    let records = catalogue(3_000);

    c.bench_function("parse query", |b| {
        b.iter(|| parse_query(registry, black_box("F0 >= 100 Hz && DIST <= 2500 pc && type(RADIO, HE)")))
    });

    let single = Query::new(registry)
        .and("F0", ConditionKind::Range, Interval::between(1.0, 10.0))
        .unwrap();
    c.bench_function("range 3k", |b| b.iter(|| single.select(black_box(&records)).count()));

    let mixed = parse_query(registry, "F0 >= 100 && DIST in (0.4, 2.0, 4.0) && type(RADIO) && assoc(GC)").unwrap();
    c.bench_function("mixed 3k", |b| b.iter(|| mixed.select(black_box(&records)).count()));

    let large = catalogue(100_000);
    c.bench_function("mixed 100k", |b| b.iter(|| mixed.select(black_box(&large)).count()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
