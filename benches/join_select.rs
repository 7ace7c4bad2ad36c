// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Join selection benchmarks
//!
//! Run with: cargo bench --bench join_select
//!
//! Compares the default pipeline (semi-join pruning, predicate pushdown)
//! against exhaustive enumeration on a selective two-table join.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use joinery::{row, ComparisonPredicate, MemoryTable, Operator, Select, SelectionConfig, Value};

const ORDER_COUNT: usize = 2_000;
const CUSTOMER_COUNT: usize = 500;

fn setup() -> (MemoryTable, MemoryTable) {
    let mut rng = StdRng::seed_from_u64(42);

    let mut customers = MemoryTable::new("customers", ["id", "tier"]);
    for id in 0..CUSTOMER_COUNT {
        let tier: i64 = rng.gen_range(0..4);
        customers
            .push_row(row![id as i64, tier])
            .expect("Failed to push customer");
    }

    let mut orders = MemoryTable::new("orders", ["id", "customer_id", "amount"]);
    for id in 0..ORDER_COUNT {
        // a third of the orders reference customers that do not exist
        let customer = rng.gen_range(0..(CUSTOMER_COUNT * 3 / 2)) as i64;
        let amount: f64 = rng.gen_range(1.0..500.0);
        orders
            .push_row(row![id as i64, customer, amount])
            .expect("Failed to push order");
    }

    (customers, orders)
}

fn run(customers: &MemoryTable, orders: &MemoryTable, config: SelectionConfig) -> usize {
    let mut select = Select::new(customers);
    let c = select.current();
    select
        .column(0)
        .on(ComparisonPredicate::with_value(c.column(1), Operator::Eq, Value::integer(3)));
    let o = select.join(orders);
    select
        .column(2)
        .on_equal(c.column(0), o.column(1))
        .with_config(config);
    select.table().expect("Failed to execute").rows().len()
}

fn bench_join(c: &mut Criterion) {
    let (customers, orders) = setup();

    let mut group = c.benchmark_group("JOIN customers orders");
    group.sample_size(20);

    group.bench_function("semi_join", |b| {
        b.iter(|| black_box(run(&customers, &orders, SelectionConfig::default())))
    });

    group.bench_function("exhaustive", |b| {
        b.iter(|| black_box(run(&customers, &orders, SelectionConfig::exhaustive())))
    });

    group.finish();
}

fn bench_single_table(c: &mut Criterion) {
    let (_, orders) = setup();

    c.bench_function("SELECT distinct ordered", |b| {
        b.iter(|| {
            let mut select = Select::new(&orders);
            let o = select.current();
            select
                .column(1)
                .distinct()
                .order_by(o.column(1), joinery::SortDirection::Descending)
                .limit(black_box(50));
            black_box(select.table().expect("Failed to execute").rows().len())
        })
    });
}

criterion_group!(benches, bench_join, bench_single_table);
criterion_main!(benches);
