pub mod aggregator;
pub mod id;
pub mod parser;
pub mod scrape;
pub mod sources;

pub use aggregator::NewsAggregator;
pub use parser::FeedParser;
pub use scrape::{default_scrape_sources, PageScraper, ScrapeSource};
pub use sources::{default_sources, enabled_sources, FeedSource};
