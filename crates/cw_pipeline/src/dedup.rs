use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use cw_core::NewsArticle;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Collapses near-duplicate articles (the same story from multiple sources)
/// by comparing normalized titles with Jaccard similarity over token sets.
///
/// Pairwise against all canonical entries seen so far, so O(n²) in batch
/// size — fine for tens of items, a known limit if batches grow to thousands.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    threshold: f64,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self { threshold: 0.8 }
    }
}

impl Deduplicator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Collapse duplicates, preserving first-appearance order of the
    /// surviving cluster representatives.
    ///
    /// When a new article matches an existing canonical entry it replaces the
    /// entry only if it has a strictly longer description, or the entry lacks
    /// an image the new article has; the longer-description signal is checked
    /// first and wins when the two point in opposite directions.
    pub fn deduplicate(&self, articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
        let mut kept: Vec<NewsArticle> = Vec::new();
        let mut canonical: Vec<String> = Vec::new();

        'next_article: for article in articles {
            let normalized = normalize_title(&article.title);
            for (i, canon) in canonical.iter().enumerate() {
                if jaccard(&normalized, canon) > self.threshold {
                    let existing = &kept[i];
                    let better = article.description.chars().count()
                        > existing.description.chars().count()
                        || (existing.image.is_none() && article.image.is_some());
                    if better {
                        kept[i] = article;
                    }
                    continue 'next_article;
                }
            }
            canonical.push(normalized);
            kept.push(article);
        }

        kept
    }
}

/// Lowercase, strip everything but word characters and spaces, trim.
pub fn normalize_title(title: &str) -> String {
    NON_WORD
        .replace_all(&title.to_lowercase(), "")
        .trim()
        .to_string()
}

/// Token-set similarity: intersection over union of whitespace-split tokens.
/// Not an edit-distance metric — word order doesn't matter.
fn jaccard(a: &str, b: &str) -> f64 {
    let set_a: HashSet<&str> = a.split_whitespace().collect();
    let set_b: HashSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}
