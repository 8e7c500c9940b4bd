use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures::future::join_all;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use cw_core::{AggregatorConfig, Error, FeedGroup, NewsArticle, Result, TextLimits};
use cw_pipeline::{clean_html, truncate_gracefully, Classifier, Gazetteer};

use crate::id::synthetic_id;

lazy_static! {
    static ref LONG_DATE: Regex = Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}\b"
    )
    .unwrap();
    static ref SLASH_DATE: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap();
}

/// A government press-release page to scrape.
#[derive(Debug, Clone)]
pub struct ScrapeSource {
    pub slug: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub url: &'static str,
    pub base_url: &'static str,
}

/// Default department pages.
pub fn default_scrape_sources() -> Vec<ScrapeSource> {
    vec![
        ScrapeSource {
            slug: "cmpd",
            name: "Charlotte-Mecklenburg Police",
            location: "Charlotte, NC",
            url: "https://www.charlottenc.gov/CMPD/News",
            base_url: "https://www.charlottenc.gov",
        },
        ScrapeSource {
            slug: "rpd",
            name: "Raleigh Police Department",
            location: "Raleigh, NC",
            url: "https://raleighnc.gov/news-category/police",
            base_url: "https://raleighnc.gov",
        },
        ScrapeSource {
            slug: "wake-sheriff",
            name: "Wake County Sheriff's Office",
            location: "Wake County, NC",
            url: "https://www.wake.gov/departments-government/sheriffs-office/news",
            base_url: "https://www.wake.gov",
        },
    ]
}

/// Generic press-release page scraper: `<article>` blocks, `h2`-`h4`
/// headlines, first paragraph as the description. Department sites vary in
/// markup, but this shape covers the common CMS layouts; anything it misses
/// simply yields fewer items.
pub struct PageScraper {
    client: reqwest::Client,
    classifier: Classifier,
    gazetteer: Gazetteer,
    limits: TextLimits,
    config: AggregatorConfig,
}

impl PageScraper {
    const MAX_ITEMS_PER_PAGE: usize = 15;

    pub fn new(
        classifier: Classifier,
        gazetteer: Gazetteer,
        limits: TextLimits,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            classifier,
            gazetteer,
            limits,
            config,
        }
    }

    /// Scrape every department page concurrently. A failed page is logged
    /// and contributes no group; only an entirely failed batch is an error.
    pub async fn scrape_all(&self, sources: &[ScrapeSource]) -> Result<Vec<FeedGroup>> {
        let tasks = sources.iter().map(|source| self.scrape_source(source));
        let results = join_all(tasks).await;

        let mut groups = Vec::new();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(items) => {
                    tracing::info!(source = source.name, count = items.len(), "scraped page");
                    groups.push(FeedGroup {
                        source: source.name.to_string(),
                        location: source.location.to_string(),
                        count: items.len(),
                        items,
                    });
                }
                Err(e) => {
                    tracing::warn!(source = source.name, error = %e, "page scrape failed");
                }
            }
        }

        if groups.is_empty() && !sources.is_empty() {
            return Err(Error::Aggregation(
                "every department page failed to scrape".to_string(),
            ));
        }
        Ok(groups)
    }

    async fn scrape_source(&self, source: &ScrapeSource) -> Result<Vec<NewsArticle>> {
        let fetch = async {
            let response = self
                .client
                .get(source.url)
                .header(reqwest::header::USER_AGENT, &self.config.user_agent)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(Error::Scraping(format!(
                    "HTTP {} from {}",
                    response.status(),
                    source.url
                )));
            }
            Ok(response.text().await?)
        };
        let html = tokio::time::timeout(self.config.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                Error::Scraping(format!("{} timed out", source.name))
            })??;
        Ok(self.parse_page(&html, source))
    }

    /// Extract press-release items from a fetched page. Pure, so the markup
    /// handling is testable without network access.
    pub fn parse_page(&self, html: &str, source: &ScrapeSource) -> Vec<NewsArticle> {
        let document = Html::parse_document(html);
        let article_sel = Selector::parse("article").unwrap();
        let heading_sel = Selector::parse("h2, h3, h4").unwrap();
        let link_sel = Selector::parse("a[href]").unwrap();
        let para_sel = Selector::parse("p").unwrap();

        let mut items = Vec::new();
        for element in document.select(&article_sel).take(Self::MAX_ITEMS_PER_PAGE) {
            let Some(heading) = element.select(&heading_sel).next() else {
                continue;
            };
            let title = clean_html(&heading.text().collect::<String>());
            if title.is_empty() {
                continue;
            }

            let link = element
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| resolve_href(href, source.base_url))
                .unwrap_or_else(|| source.url.to_string());

            let description = element
                .select(&para_sel)
                .next()
                .map(|p| {
                    truncate_gracefully(
                        &clean_html(&p.text().collect::<String>()),
                        self.limits.max_feed_description_len,
                    )
                })
                .unwrap_or_default();

            let fragment = element.html();
            let combined = format!("{} {}", title, description);

            items.push(NewsArticle {
                id: synthetic_id(source.slug, &title, source.name),
                title,
                description,
                link,
                pub_date: extract_page_date(&fragment),
                category: self.classifier.classify(&combined),
                location: Some(
                    self.gazetteer
                        .extract(&combined)
                        .unwrap_or_else(|| source.location.to_string()),
                ),
                source: source.name.to_string(),
                image: None,
                original_title: None,
                rewritten: false,
            });
        }
        items
    }
}

fn resolve_href(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Find a publish date in the article markup; absent or unparseable dates
/// fall back to now.
fn extract_page_date(fragment: &str) -> DateTime<Utc> {
    if let Some(m) = LONG_DATE.find(fragment) {
        if let Ok(date) = NaiveDate::parse_from_str(&m.as_str().replace(',', ""), "%B %d %Y") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Utc.from_utc_datetime(&dt);
            }
        }
    }
    if let Some(m) = SLASH_DATE.find(fragment) {
        if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), "%m/%d/%Y") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Utc.from_utc_datetime(&dt);
            }
        }
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::Category;

    fn scraper() -> PageScraper {
        PageScraper::new(
            Classifier::default(),
            Gazetteer::default(),
            TextLimits::default(),
            AggregatorConfig::default(),
        )
    }

    fn source() -> ScrapeSource {
        ScrapeSource {
            slug: "cmpd",
            name: "Charlotte-Mecklenburg Police",
            location: "Charlotte, NC",
            url: "https://www.charlottenc.gov/CMPD/News",
            base_url: "https://www.charlottenc.gov",
        }
    }

    const PAGE: &str = r#"<html><body>
        <article>
          <h2>Armed robbery suspect arrested</h2>
          <p>Detectives arrested a suspect on January 5, 2025 following an investigation.</p>
          <a href="/CMPD/News/release-1">Read more</a>
        </article>
        <article>
          <h3>Missing person located safe</h3>
          <p>The individual reported missing on 12/30/2024 has been found.</p>
          <a href="https://www.charlottenc.gov/CMPD/News/release-2">Read more</a>
        </article>
        <article>
          <div>No heading here, skipped</div>
        </article>
    </body></html>"#;

    #[test]
    fn test_parses_article_blocks() {
        let items = scraper().parse_page(PAGE, &source());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Armed robbery suspect arrested");
        assert_eq!(items[0].category, Category::Arrest);
        assert_eq!(items[0].source, "Charlotte-Mecklenburg Police");
    }

    #[test]
    fn test_relative_link_resolved_against_base() {
        let items = scraper().parse_page(PAGE, &source());
        assert_eq!(
            items[0].link,
            "https://www.charlottenc.gov/CMPD/News/release-1"
        );
        assert_eq!(
            items[1].link,
            "https://www.charlottenc.gov/CMPD/News/release-2"
        );
    }

    #[test]
    fn test_long_date_extracted() {
        let items = scraper().parse_page(PAGE, &source());
        assert_eq!(items[0].pub_date.to_rfc3339(), "2025-01-05T00:00:00+00:00");
    }

    #[test]
    fn test_slash_date_extracted() {
        let items = scraper().parse_page(PAGE, &source());
        assert_eq!(items[1].pub_date.to_rfc3339(), "2024-12-30T00:00:00+00:00");
    }

    #[test]
    fn test_headingless_article_skipped() {
        let items = scraper().parse_page(PAGE, &source());
        assert!(items.iter().all(|i| !i.title.is_empty()));
    }

    #[test]
    fn test_source_location_used_when_no_gazetteer_hit() {
        let items = scraper().parse_page(PAGE, &source());
        assert_eq!(items[0].location.as_deref(), Some("Charlotte, NC"));
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let items = scraper().parse_page("<html><body></body></html>", &source());
        assert!(items.is_empty());
    }
}
