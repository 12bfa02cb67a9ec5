//! Latency probe for deployed overlay endpoints.
//!
//! Samples users from a JSON file and requests each one's slug sequentially
//! against the profile API or a deployed pages origin, pacing requests at a
//! fixed rate, then prints success/failure counts and latency percentiles.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::seq::SliceRandom;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use overlay_client::{profile_slug, ClientResult, ProfileClient, ProfileSource, TemplateFetcher};

mod stats;
use stats::LatencyStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Query the profile API with `?slug=`.
    Api,
    /// Fetch rendered pages at `{pages-url}/{slug}`.
    Pages,
}

#[derive(Debug, Parser)]
#[command(
    name = "overlay-bench",
    about = "Sequential latency probe for overlay endpoints",
    version
)]
struct Cli {
    /// Users file: a JSON array, or an object with a "users" array.
    #[arg(long, default_value = "generated_users.json")]
    users_file: PathBuf,

    /// Number of distinct users to sample.
    #[arg(long, default_value_t = 50)]
    sample_size: usize,

    /// Requests per second.
    #[arg(long, default_value_t = 2.0)]
    rate: f64,

    /// Keep looping over the sample for this many seconds (0 = one pass).
    #[arg(long, default_value_t = 0)]
    duration: u64,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// What to probe.
    #[arg(long, value_enum, default_value_t = Target::Api)]
    target: Target,

    /// Profile API endpoint, required for `--target api`.
    #[arg(long, env = "OVERLAY_PROFILE_API_URL")]
    api_url: Option<String>,

    /// Access code appended to profile API requests.
    #[arg(long, env = "OVERLAY_PROFILE_API_CODE")]
    api_code: Option<String>,

    /// Pages origin, required for `--target pages`.
    #[arg(long, env = "OVERLAY_PAGES_URL")]
    pages_url: Option<String>,

    /// Log per-request details.
    #[arg(long)]
    verbose: bool,
}

enum Prober {
    Api(ProfileClient),
    Pages {
        fetcher: TemplateFetcher,
        base_url: String,
    },
}

impl Prober {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let timeout = Duration::from_millis(cli.timeout_ms);
        match cli.target {
            Target::Api => {
                let base_url = cli
                    .api_url
                    .clone()
                    .context("--api-url (or OVERLAY_PROFILE_API_URL) is required for --target api")?;
                Ok(Self::Api(ProfileClient::with_timeout(
                    ProfileSource::Internal {
                        base_url,
                        access_code: cli.api_code.clone(),
                    },
                    timeout,
                )))
            }
            Target::Pages => {
                let base_url = cli
                    .pages_url
                    .clone()
                    .context("--pages-url (or OVERLAY_PAGES_URL) is required for --target pages")?;
                Ok(Self::Pages {
                    fetcher: TemplateFetcher::with_timeout(timeout),
                    base_url: base_url.trim_end_matches('/').to_string(),
                })
            }
        }
    }

    fn probe(&self, slug: &str) -> ClientResult<()> {
        match self {
            Prober::Api(client) => client.lookup(slug).map(|_| ()),
            Prober::Pages { fetcher, base_url } => {
                fetcher.fetch(&format!("{base_url}/{slug}")).map(|_| ())
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("overlay_client=debug,overlay_bench=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("overlay_client=info,overlay_bench=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let slugs = sample_slugs(&cli.users_file, cli.sample_size)?;
    info!("probing {} slugs against {:?}", slugs.len(), cli.target);

    let prober = Prober::from_cli(&cli)?;
    let interval = if cli.rate > 0.0 {
        Duration::from_secs_f64(1.0 / cli.rate)
    } else {
        Duration::ZERO
    };
    let deadline = (cli.duration > 0).then(|| Instant::now() + Duration::from_secs(cli.duration));

    let mut stats = LatencyStats::default();

    'run: loop {
        for slug in &slugs {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    break 'run;
                }
            }

            let started = Instant::now();
            let outcome = prober.probe(slug);
            let elapsed = started.elapsed();

            match outcome {
                Ok(()) => {
                    stats.record_success(elapsed);
                    info!("{} ({} ms)", slug, elapsed.as_millis());
                }
                Err(err) => {
                    let message = err.to_string();
                    stats.record_failure(slug, &message, elapsed);
                    warn!("{} failed after {} ms: {}", slug, elapsed.as_millis(), message);
                }
            }

            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }

        if deadline.is_none() {
            break;
        }
    }

    println!("{stats}");
    Ok(())
}

/// Load the users file, sample `sample_size` distinct users, and return
/// their slugs (explicit `slug` field, else derived from `name`).
fn sample_slugs(path: &Path, sample_size: usize) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading users file {}", path.display()))?;
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let users = users_in(&parsed);
    if users.is_empty() {
        bail!("no users found in {}", path.display());
    }
    info!("loaded {} users from {}", users.len(), path.display());

    let mut rng = rand::thread_rng();
    let slugs: Vec<String> = users
        .choose_multiple(&mut rng, sample_size.min(users.len()))
        .filter_map(profile_slug)
        .collect();

    if slugs.is_empty() {
        bail!("sampled users carry no usable slugs");
    }
    Ok(slugs)
}

/// The user records in a parsed users file: a bare array, or the `users`
/// field of a wrapping object.
fn users_in(parsed: &Value) -> &[Value] {
    match parsed {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("users")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}
