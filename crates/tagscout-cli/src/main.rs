use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod discover;

#[derive(Debug, Parser)]
#[command(name = "tagscout")]
#[command(about = "Discover creators posting under hashtags")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl hashtag listings and print discovered creators as JSON
    Discover {
        /// Hashtags to crawl, comma separated or repeated (a leading # is optional)
        #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
        hashtags: Vec<String>,
        /// Maximum posts to read per hashtag
        #[arg(long, default_value = "8")]
        max_posts: usize,
        /// Run the browser headless (default)
        #[arg(long, overrides_with = "headful")]
        headless: bool,
        /// Run the browser with a visible window
        #[arg(long, overrides_with = "headless")]
        headful: bool,
        /// Write the JSON result to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check that the rendering backend is reachable
    Check,
    /// Crawl a single hashtag with a small post budget and a visible browser
    QuickTest {
        /// Hashtag to crawl
        #[arg(default_value = "productivity")]
        hashtag: String,
    },
}

/// Headless unless `--headful` was the last browser flag given.
fn browser_headless(headless: bool, headful: bool) -> bool {
    headless || !headful
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = tagscout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Discover {
            hashtags,
            max_posts,
            headless,
            headful,
            output,
        } => {
            let request = discover::RunRequest {
                hashtags: discover::clean_hashtags(&hashtags)?,
                max_posts,
                headless: browser_headless(headless, headful),
            };
            let result = discover::run_discover(&config, &request).await?;
            discover::write_output(&result, output.as_deref())?;
        }
        Commands::Check => discover::run_check(&config).await?,
        Commands::QuickTest { hashtag } => {
            let request = discover::RunRequest::quick_test(&hashtag)?;
            let result = discover::run_discover(&config, &request).await?;
            discover::write_output(&result, None)?;
        }
    }

    Ok(())
}
