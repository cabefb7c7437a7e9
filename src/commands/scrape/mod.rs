//! `ytcomments scrape`: fetch comment threads for a list of videos and export them.

mod error;
pub mod export;
pub mod fetch;
mod input;
pub mod models;
mod normalize;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use futures::stream::{self, StreamExt};

pub use error::ScrapeError;
use export::{BASE_FILENAME, OutputFormat};
use fetch::CommentFetcher;
use input::InputUrls;
use models::CommentRecord;

use crate::infra::youtube::YoutubeClient;
use crate::shared::config::load_settings;
use crate::shared::env_var::EnvVars;
use crate::shared::logging;

#[derive(Args, Clone, PartialEq, Eq, Debug, Default)]
pub struct ScrapeArgs {
    /// YouTube video URLs (watch, youtu.be, shorts or live links)
    pub urls: Vec<String>,

    /// Settings file (default: ~/.config/ytcomments/settings.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON file with a list of URLs, either `[...]` or `{"urls": [...]}`
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory to write output files to (overrides outputDirectory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum comments and replies per video (overrides maxCommentsPerVideo)
    #[arg(short, long, value_name = "N")]
    pub max_comments: Option<usize>,
}

/// Everything a run needs once settings, environment and input are resolved.
#[derive(Debug)]
struct ScrapePlan {
    api_key: String,
    urls: Vec<String>,
    max_per_video: usize,
    concurrency: usize,
    timeout: Duration,
    output_dir: PathBuf,
    formats: BTreeSet<OutputFormat>,
}

#[tokio::main]
pub async fn run(args: &ScrapeArgs) -> anyhow::Result<()> {
    let plan = prepare(args, &EnvVars::load())?;
    let client = YoutubeClient::new(plan.api_key.clone(), plan.timeout)?;
    execute(&plan, client).await?;
    Ok(())
}

/// Resolve settings and input URLs. Fails before any network activity.
fn prepare(args: &ScrapeArgs, env: &EnvVars) -> anyhow::Result<ScrapePlan> {
    let settings = load_settings(args.config.as_deref())?.with_env_overrides(env);
    logging::init(&settings.log_level, env.json_logs());

    if settings.youtube_api_key.trim().is_empty() {
        return Err(ScrapeError::MissingApiKey.into());
    }

    let InputUrls { urls, .. } = gather_urls(args)?;

    Ok(ScrapePlan {
        api_key: settings.youtube_api_key,
        urls,
        max_per_video: args
            .max_comments
            .filter(|&n| n > 0)
            .unwrap_or(settings.max_comments_per_video),
        concurrency: settings.concurrent_requests.max(1),
        timeout: Duration::from_secs(settings.request_timeout_seconds),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or(settings.output_directory),
        formats: export::parse_formats(&settings.output_formats),
    })
}

/// Input file URLs first, then positional URLs. Invalid entries are dropped.
fn gather_urls(args: &ScrapeArgs) -> anyhow::Result<InputUrls> {
    if args.urls.is_empty() && args.input.is_none() {
        return Err(ScrapeError::NoInput.into());
    }

    let mut candidates = match &args.input {
        Some(path) => input::read_url_file(path)?,
        None => Vec::new(),
    };
    candidates.extend(args.urls.iter().cloned());

    let input = InputUrls::from_candidates(candidates);
    if input.skipped > 0 {
        tracing::warn!(skipped = input.skipped, "skipped invalid YouTube URLs");
    }
    if input.urls.is_empty() {
        return Err(ScrapeError::NoValidUrls {
            skipped: input.skipped,
        }
        .into());
    }

    tracing::info!(count = input.urls.len(), "loaded URLs to process");
    Ok(input)
}

/// Fetch every URL, then export. Returns the written files.
///
/// Nothing is written until all fetches have finished. A run that fetched no comments
/// writes nothing and succeeds.
async fn execute(plan: &ScrapePlan, client: YoutubeClient) -> anyhow::Result<Vec<PathBuf>> {
    let fetcher = CommentFetcher::new(client, plan.max_per_video);
    let records = fetch_all(&fetcher, &plan.urls, plan.concurrency).await;

    if records.is_empty() {
        tracing::warn!("no comments fetched, nothing to export");
        return Ok(Vec::new());
    }

    let written = export::export_all(&plan.output_dir, BASE_FILENAME, &records, &plan.formats)?;
    tracing::info!(
        total = records.len(),
        videos = plan.urls.len(),
        path = %plan.output_dir.display(),
        "scrape complete"
    );
    Ok(written)
}

/// Fetch URLs with at most `concurrency` in flight. Records keep input URL order.
async fn fetch_all(
    fetcher: &CommentFetcher,
    urls: &[String],
    concurrency: usize,
) -> Vec<CommentRecord> {
    let total = urls.len();
    let per_url: Vec<Vec<CommentRecord>> = stream::iter(urls.iter().enumerate())
        .map(|(index, url)| async move {
            tracing::info!(url = %url, index = index + 1, total, "fetching comments");
            match fetcher.fetch_for_url(url).await {
                Ok(outcome) => {
                    if outcome.stop.is_failure() {
                        tracing::warn!(
                            url = %url,
                            fetched = outcome.records.len(),
                            pages = outcome.pages,
                            reason = %outcome.stop,
                            "stopped early, keeping partial results"
                        );
                    } else {
                        tracing::info!(
                            url = %url,
                            fetched = outcome.records.len(),
                            pages = outcome.pages,
                            reason = %outcome.stop,
                            "finished fetching comments"
                        );
                    }
                    outcome.records
                }
                Err(err) => {
                    tracing::error!(url = %url, error = %err, "skipping URL");
                    Vec::new()
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    per_url.into_iter().flatten().collect()
}
