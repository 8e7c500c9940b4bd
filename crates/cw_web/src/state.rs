use cw_feeds::{NewsAggregator, PageScraper, ScrapeSource};

/// Shared handler state. The aggregator and scraper are stateless between
/// requests; every request triggers a fresh fetch.
pub struct AppState {
    pub aggregator: NewsAggregator,
    pub scraper: PageScraper,
    pub scrape_sources: Vec<ScrapeSource>,
}
