// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the analysis stage. Builds a synthetic export with a
// few thousand articles so the top-article sort dominates.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use newsreport_analysis::{analyze, parse_export};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn synthetic_export(articles: usize) -> String {
    let articles: Vec<_> = (0..articles)
        .map(|i| {
            json!({
                "title": format!("Article {i}"),
                "author": format!("Author {}", i % 17),
                "category": format!("Category {}", i % 12),
                "views": (i * 7919) % 10_007,
                "readTime": i % 20,
            })
        })
        .collect();
    let categories: Vec<_> = (0..12)
        .map(|i| json!({ "name": format!("Category {i}"), "articleCount": i * 3 }))
        .collect();
    let reading_list: Vec<_> = (0..200)
        .map(|i| if i % 3 == 0 { json!({ "completedAt": "2024-05-01" }) } else { json!({}) })
        .collect();
    let history: Vec<_> = (0..500).map(|i| json!({ "timeSpent": i * 11 })).collect();

    json!({
        "articles": articles,
        "categories": categories,
        "bookmarks": vec![json!({}); 40],
        "readingList": reading_list,
        "userPreferences": { "categories": ["Category 1", "Category 4"], "notifications": true },
        "readingHistory": history,
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let raw = synthetic_export(5_000);
    c.bench_function("parse_export (5k articles)", |b| {
        b.iter(|| parse_export(black_box(&raw)).unwrap());
    });
}

fn bench_analyze(c: &mut Criterion) {
    let export = parse_export(&synthetic_export(5_000)).unwrap();
    c.bench_function("analyze (5k articles)", |b| {
        b.iter(|| black_box(analyze(black_box(&export))));
    });
}

criterion_group!(benches, bench_parse, bench_analyze);
criterion_main!(benches);
