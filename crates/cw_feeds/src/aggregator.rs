use std::sync::Arc;

use futures::future::join_all;

use cw_core::{AggregatorConfig, Error, NewsArticle, Result, TextLimits};
use cw_pipeline::{ArticleRewriter, Classifier, Deduplicator, Gazetteer};

use crate::parser::FeedParser;
use crate::sources::FeedSource;

/// Fans out to every enabled source concurrently, survives partial failures,
/// and merges the results into one deduplicated, recency-sorted, capped list.
///
/// No shared mutable state crosses the fetch tasks: each source produces an
/// independent vector and merging happens only after every task settles.
pub struct NewsAggregator {
    client: reqwest::Client,
    sources: Vec<FeedSource>,
    parser: FeedParser,
    rewriter: Arc<ArticleRewriter>,
    dedup: Deduplicator,
    config: AggregatorConfig,
}

impl NewsAggregator {
    pub fn new(
        sources: Vec<FeedSource>,
        rewriter: Arc<ArticleRewriter>,
        limits: TextLimits,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            sources,
            parser: FeedParser::new(Classifier::default(), Gazetteer::default(), limits),
            rewriter,
            dedup: Deduplicator::new(config.dedup_threshold),
            config,
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Fetch, parse, rewrite, dedupe, sort, cap. Errors only when every
    /// enabled source fails; any partial success yields a result.
    pub async fn aggregate(&self) -> Result<Vec<NewsArticle>> {
        let enabled: Vec<&FeedSource> = self.sources.iter().filter(|s| s.enabled).collect();
        if enabled.is_empty() {
            tracing::warn!("no feed sources enabled");
            return Ok(Vec::new());
        }

        tracing::info!(sources = enabled.len(), "fetching feeds");
        let tasks = enabled.iter().map(|source| self.fetch_source(source));
        let results = join_all(tasks).await;

        let mut merged = Vec::new();
        let mut succeeded = 0usize;
        for (source, result) in enabled.iter().zip(results) {
            match result {
                Ok(items) => {
                    tracing::info!(source = source.name, count = items.len(), "source fetched");
                    succeeded += 1;
                    merged.extend(items);
                }
                Err(e) => {
                    tracing::warn!(source = source.name, error = %e, "source failed");
                }
            }
        }
        if succeeded == 0 {
            return Err(Error::Aggregation("every feed source failed".to_string()));
        }

        let mut rewritten = Vec::with_capacity(merged.len());
        for mut article in merged {
            let out = self.rewriter.rewrite(&article.title, &article.description).await;
            article.original_title = Some(std::mem::replace(&mut article.title, out.title));
            article.description = out.description;
            article.rewritten = out.rewritten;
            rewritten.push(article);
        }

        let mut articles = self.dedup.deduplicate(rewritten);
        articles.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        articles.truncate(self.config.max_articles);
        Ok(articles)
    }

    /// One source's fetch+parse, bounded by the per-source timeout. Timeout
    /// cancels the in-flight request (the future is dropped); no retry here —
    /// the next scheduled run is the retry.
    async fn fetch_source(&self, source: &FeedSource) -> Result<Vec<NewsArticle>> {
        let fetch = async {
            let response = self
                .client
                .get(source.url)
                .header(
                    reqwest::header::ACCEPT,
                    "application/rss+xml, application/xml, text/xml, */*",
                )
                .header(reqwest::header::USER_AGENT, &self.config.user_agent)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(Error::Feed(format!(
                    "HTTP {} from {}",
                    response.status(),
                    source.name
                )));
            }
            Ok(response.text().await?)
        };

        let xml = tokio::time::timeout(self.config.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                Error::Feed(format!(
                    "{} timed out after {:?}",
                    source.name, self.config.fetch_timeout
                ))
            })??;

        Ok(self.parser.parse_feed(&xml, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::OutletConfig;

    fn rewriter() -> Arc<ArticleRewriter> {
        Arc::new(ArticleRewriter::local_only(
            OutletConfig::default(),
            TextLimits::default(),
        ))
    }

    #[tokio::test]
    async fn test_no_enabled_sources_yields_empty_result() {
        let aggregator = NewsAggregator::new(
            Vec::new(),
            rewriter(),
            TextLimits::default(),
            AggregatorConfig::default(),
        );
        let articles = aggregator.aggregate().await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_an_error() {
        // Unroutable address; connection fails immediately on every source.
        let sources = vec![FeedSource {
            slug: "dead",
            name: "Dead Source",
            location: "Nowhere, NC",
            url: "http://127.0.0.1:1/feed.xml",
            base_url: "http://127.0.0.1:1",
            enabled: true,
            filter_crime: false,
        }];
        let aggregator = NewsAggregator::new(
            sources,
            rewriter(),
            TextLimits::default(),
            AggregatorConfig::default(),
        );
        let result = aggregator.aggregate().await;
        assert!(matches!(result, Err(Error::Aggregation(_))));
    }

    #[tokio::test]
    async fn test_disabled_sources_are_not_fetched() {
        // A disabled dead source must not count as a failure.
        let sources = vec![FeedSource {
            slug: "dead",
            name: "Dead Source",
            location: "Nowhere, NC",
            url: "http://127.0.0.1:1/feed.xml",
            base_url: "http://127.0.0.1:1",
            enabled: false,
            filter_crime: false,
        }];
        let aggregator = NewsAggregator::new(
            sources,
            rewriter(),
            TextLimits::default(),
            AggregatorConfig::default(),
        );
        assert!(aggregator.aggregate().await.unwrap().is_empty());
    }
}
