pub mod config;
pub mod error;
pub mod models;

pub use config::{AggregatorConfig, OutletConfig, RewriteMode, TextLimits};
pub use error::Error;
pub use models::{Category, FeedGroup, FeedsResponse, NewsArticle, NewsResponse, RawItem};

pub type Result<T> = std::result::Result<T, Error>;
