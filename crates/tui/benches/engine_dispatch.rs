//! Benchmarks for the list engine.
//!
//! Measures key dispatch on large pages and render projection, the two
//! paths run on every input event.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use runloop_client::Page;
use runloop_tui::engine::{
    Column, ColumnWidth, Effect, ListConfig, ListEngine, ListEvent, ListKey, OperationSpec,
    ResourceNames, project,
};

#[derive(Debug, Clone)]
struct Row {
    id: String,
    name: String,
}

fn row_id(row: &Row) -> &str {
    &row.id
}

fn operations(_: &Row) -> Vec<OperationSpec> {
    vec![
        OperationSpec::navigational("view", "View", 'v'),
        OperationSpec::destructive("delete", "Delete", 'd'),
    ]
}

fn loaded(rows: u16) -> ListEngine<Row> {
    let mut engine = ListEngine::new(
        ListConfig {
            item_id: row_id,
            operations,
            searchable: true,
        },
        rows,
    );
    let Some(Effect::Fetch(req)) = engine.mount().into_iter().next() else {
        unreachable!("mount always fetches");
    };
    let items = (0..req.limit)
        .map(|i| Row {
            id: format!("dbx_{i:06}"),
            name: format!("worker-{i}"),
        })
        .collect();
    engine.dispatch(ListEvent::PageLoaded {
        request: req.id,
        result: Ok(Page::new(items, true, Some(10_000))),
    });
    engine
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for rows in [40u16, 200, 1_000] {
        group.bench_function(format!("scroll_{rows}"), |b| {
            let mut engine = loaded(rows);
            b.iter(|| {
                for _ in 0..50 {
                    black_box(engine.dispatch(ListEvent::Key(ListKey::Down)));
                }
                black_box(engine.dispatch(ListEvent::Key(ListKey::Home)));
            })
        });
    }

    group.bench_function("actions_open_close", |b| {
        let mut engine = loaded(40);
        b.iter(|| {
            black_box(engine.dispatch(ListEvent::Key(ListKey::Enter)));
            black_box(engine.dispatch(ListEvent::Key(ListKey::Esc)));
        })
    });

    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    let columns = vec![
        Column {
            header: "ID",
            width: ColumnWidth::Min(12),
            cell: |r: &Row| r.id.clone(),
        },
        Column {
            header: "Name",
            width: ColumnWidth::Fill,
            cell: |r: &Row| r.name.clone(),
        },
    ];
    let names = ResourceNames {
        singular: "devbox",
        plural: "devboxes",
    };

    for rows in [40u16, 200, 1_000] {
        group.bench_function(format!("rows_{rows}"), |b| {
            let engine = loaded(rows);
            b.iter(|| black_box(project(&engine, &columns, names, |r: &Row| r.name.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_project);
criterion_main!(benches);
