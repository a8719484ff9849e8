// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analyzer — reduce a `NewsExport` to the `Summary` record.
//
// Pure and deterministic: identical exports always produce identical summaries.

use std::cmp::Reverse;

use indexmap::IndexMap;
use newsreport_core::{Article, Category, HistoryEntry, NewsExport, ReadingListItem, Summary};
use tracing::debug;

/// Number of articles listed in the "top articles" table.
pub const TOP_ARTICLE_LIMIT: usize = 5;

/// Compute every aggregate the report shows.
pub fn analyze(export: &NewsExport) -> Summary {
    let summary = Summary {
        total_articles: export.articles.len(),
        top_articles: top_articles(&export.articles, TOP_ARTICLE_LIMIT),
        category_counts: category_counts(&export.categories),
        total_bookmarks: export.bookmarks.len(),
        reading_list_progress: reading_list_progress(&export.reading_list),
        user_preferences: export.user_preferences.clone(),
        total_reading_history: export.reading_history.len(),
        total_time_spent: total_time_spent(&export.reading_history),
    };

    debug!(
        total_articles = summary.total_articles,
        top_articles = summary.top_articles.len(),
        categories = summary.category_counts.len(),
        progress = summary.reading_list_progress,
        total_time_spent = summary.total_time_spent,
        "Export analysed"
    );

    summary
}

/// The `limit` most-viewed articles, highest first.
///
/// The sort is stable, so articles with equal views keep their input order.
pub fn top_articles(articles: &[Article], limit: usize) -> Vec<Article> {
    let mut ranked: Vec<&Article> = articles.iter().collect();
    ranked.sort_by_key(|article| Reverse(article.views));
    ranked.into_iter().take(limit).cloned().collect()
}

/// Category name to article count, in input order. A repeated name keeps its
/// first position but takes the later count.
pub fn category_counts(categories: &[Category]) -> IndexMap<String, i64> {
    let mut counts = IndexMap::with_capacity(categories.len());
    for category in categories {
        counts.insert(category.name.clone(), category.article_count);
    }
    counts
}

/// Percentage of completed reading-list entries; `0.0` for an empty list.
pub fn reading_list_progress(reading_list: &[ReadingListItem]) -> f64 {
    let total = reading_list.len();
    if total == 0 {
        return 0.0;
    }
    let completed = reading_list.iter().filter(|item| item.is_completed()).count();
    completed as f64 / total as f64 * 100.0
}

/// Sum of time spent across the reading history, in seconds.
pub fn total_time_spent(history: &[HistoryEntry]) -> u64 {
    history
        .iter()
        .fold(0u64, |acc, entry| acc.saturating_add(entry.time_spent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_export;

    fn article(title: &str, views: i64) -> Article {
        Article {
            title: Some(title.to_string()),
            views,
            ..Article::default()
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(Article::title_or_na).collect()
    }

    #[test]
    fn empty_export_has_no_top_articles() {
        let summary = analyze(&NewsExport::default());
        assert_eq!(summary.total_articles, 0);
        assert!(summary.top_articles.is_empty());
        assert!(summary.category_counts.is_empty());
        assert_eq!(summary.reading_list_progress, 0.0);
        assert_eq!(summary.total_time_spent, 0);
    }

    #[test]
    fn top_articles_sorted_descending_and_truncated() {
        let articles: Vec<Article> = [10, 50, 30, 70, 20, 60, 40]
            .iter()
            .enumerate()
            .map(|(i, views)| article(&format!("a{i}"), *views))
            .collect();

        let top = top_articles(&articles, TOP_ARTICLE_LIMIT);
        let views: Vec<i64> = top.iter().map(|a| a.views).collect();
        assert_eq!(views, vec![70, 60, 50, 40, 30]);
    }

    #[test]
    fn top_articles_stable_on_ties() {
        let articles = vec![
            article("first", 5),
            article("high", 9),
            article("second", 5),
            article("third", 5),
        ];
        let top = top_articles(&articles, TOP_ARTICLE_LIMIT);
        assert_eq!(titles(&top), vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn fewer_than_limit_returns_all() {
        let articles = vec![article("only", 1), article("other", 2)];
        let top = top_articles(&articles, TOP_ARTICLE_LIMIT);
        assert_eq!(top.len(), 2);
        assert_eq!(titles(&top), vec!["other", "only"]);
    }

    #[test]
    fn missing_views_rank_as_zero() {
        let export = parse_export(
            r#"{"articles": [{"title": "none"}, {"title": "some", "views": 1}]}"#,
        )
        .unwrap();
        let summary = analyze(&export);
        assert_eq!(titles(&summary.top_articles), vec!["some", "none"]);
    }

    #[test]
    fn duplicate_category_last_write_wins() {
        let export = parse_export(
            r#"{"categories": [
                {"name": "Tech", "articleCount": 3},
                {"name": "World", "articleCount": 1},
                {"name": "Tech", "articleCount": 7}
            ]}"#,
        )
        .unwrap();
        let counts = analyze(&export).category_counts;
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Tech"], 7);
        let names: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Tech", "World"]);
    }

    #[test]
    fn half_completed_reading_list_is_fifty_percent() {
        let export = parse_export(
            r#"{"readingList": [
                {"completedAt": "2024-01-02"},
                {},
                {"completedAt": "2024-01-05"},
                {"completedAt": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(analyze(&export).reading_list_progress, 50.0);
    }

    #[test]
    fn time_spent_sums_with_missing_as_zero() {
        let export = parse_export(
            r#"{"readingHistory": [{"timeSpent": 120}, {}, {"timeSpent": 45}]}"#,
        )
        .unwrap();
        let summary = analyze(&export);
        assert_eq!(summary.total_reading_history, 3);
        assert_eq!(summary.total_time_spent, 165);
    }

    #[test]
    fn counts_and_preferences_pass_through() {
        let export = parse_export(
            r#"{"bookmarks": [{}, {}, {}],
                "userPreferences": {"categories": ["Tech", "Science"], "theme": "dark"}}"#,
        )
        .unwrap();
        let summary = analyze(&export);
        assert_eq!(summary.total_bookmarks, 3);
        assert_eq!(summary.subscribed_category_count(), 2);
        assert_eq!(summary.user_preferences.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn analysis_is_deterministic() {
        let raw = r#"{"articles": [{"title": "x", "views": 2}, {"title": "y", "views": 2}],
                      "readingList": [{"completedAt": "now"}, {}, {}]}"#;
        let first = analyze(&parse_export(raw).unwrap());
        let second = analyze(&parse_export(raw).unwrap());
        assert_eq!(first, second);
    }
}
