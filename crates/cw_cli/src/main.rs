use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cw_core::{AggregatorConfig, OutletConfig, Result, RewriteMode, TextLimits};
use cw_feeds::{
    default_scrape_sources, default_sources, NewsAggregator, PageScraper,
};
use cw_pipeline::{ArticleRewriter, Classifier, Gazetteer};
use cw_web::AppState;

#[derive(Parser, Debug)]
#[command(name = "cw", author, version, about = "North Carolina crime news aggregator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch, rewrite and print the aggregated article list once.
    Fetch {
        /// Keep only the first N articles of the merged result.
        #[arg(long)]
        limit: Option<usize>,
        /// Print the full JSON envelope instead of one line per article.
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP API.
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
    /// List the configured sources and whether each is enabled.
    Sources,
}

fn build_aggregator(mode: &RewriteMode) -> NewsAggregator {
    let rewriter = Arc::new(ArticleRewriter::new(
        mode,
        OutletConfig::default(),
        TextLimits::default(),
    ));
    NewsAggregator::new(
        default_sources(),
        rewriter,
        TextLimits::default(),
        AggregatorConfig::default(),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mode = RewriteMode::from_env();
    match &mode {
        RewriteMode::Local => info!("✏️ Rewrite: local rules"),
        RewriteMode::Endpoint { url } => info!("✏️ Rewrite: custom endpoint at {}", url),
        RewriteMode::Generative { model, .. } => info!("✏️ Rewrite: generative model {}", model),
    }

    match cli.command {
        Commands::Fetch { limit, json } => {
            let aggregator = build_aggregator(&mode);
            let mut articles = aggregator.aggregate().await?;
            if let Some(limit) = limit {
                articles.truncate(limit);
            }
            if json {
                let envelope = cw_core::NewsResponse::ok(articles, None);
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                for article in &articles {
                    println!(
                        "[{}] {} — {} ({})",
                        article.category,
                        article.title,
                        article.source,
                        article.pub_date.format("%Y-%m-%d %H:%M"),
                    );
                }
                info!("🗞️ {} articles", articles.len());
            }
        }
        Commands::Serve { port } => {
            let state = AppState {
                aggregator: build_aggregator(&mode),
                scraper: PageScraper::new(
                    Classifier::default(),
                    Gazetteer::default(),
                    TextLimits::default(),
                    AggregatorConfig::default(),
                ),
                scrape_sources: default_scrape_sources(),
            };
            info!("🗞️ Serving crime news API on port {}", port);
            cw_web::serve(state, port).await?;
        }
        Commands::Sources => {
            for source in default_sources() {
                println!(
                    "{:<20} {:<30} {:<25} {}",
                    source.slug,
                    source.name,
                    source.location,
                    if source.enabled { "enabled" } else { "disabled" },
                );
            }
        }
    }

    Ok(())
}
