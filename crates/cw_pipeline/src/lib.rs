pub mod classify;
pub mod clean;
pub mod dedup;
pub mod location;
pub mod rewrite;
pub mod truncate;

pub use classify::Classifier;
pub use clean::clean_html;
pub use dedup::Deduplicator;
pub use location::Gazetteer;
pub use rewrite::{ArticleRewriter, LocalRewriter, RewriteOutcome, RewriteStrategy};
pub use truncate::truncate_gracefully;
