use std::fs::File;
use std::future::Future;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tokio::signal;
use wikipron_client::WikiBackend;
use wikipron_config::Config;
use wikipron_lang_default::DefaultExtractor;
use wikipron_scrape::{ScrapeError, Scraper, spawn_scrape};

pub mod cli;

use self::cli::Cli;

/// Pairs buffered between the scrape task and the writer
const CHANNEL_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = Config::new();
    cli.apply(&mut config);

    let scraper = Scraper::new(config, Arc::new(DefaultExtractor::new()))
        .context("failed to set up scraper")?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    let written = run(&scraper, BufWriter::new(out), cli.limit, shutdown).await?;
    tracing::info!("Wrote {} {} pairs", written, scraper.config().scrape.language);
    Ok(())
}

/// Write `word\tpron` lines until the scrape ends, `limit` pairs are out, or
/// `shutdown` resolves. Returns the number of pairs written.
pub async fn run<B, W>(
    scraper: &Scraper<B>,
    mut out: W,
    limit: Option<usize>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<usize>
where
    B: WikiBackend + ?Sized + 'static,
    W: Write,
{
    let handle = spawn_scrape(scraper, CHANNEL_CAPACITY);
    let mut shutdown = std::pin::pin!(shutdown);
    let mut written = 0;
    let mut interrupted = false;
    let mut failure: Option<anyhow::Error> = None;

    loop {
        if limit.is_some_and(|limit| written >= limit) {
            handle.cancel();
            break;
        }

        let received = tokio::select! {
            _ = &mut shutdown => None,
            item = handle.receiver.recv() => Some(item),
        };
        let Some(received) = received else {
            tracing::info!("Shutdown requested");
            handle.cancel();
            interrupted = true;
            break;
        };
        // Closed: the run is over
        let Ok(item) = received else { break };

        let pair = match item {
            Ok(pair) => pair,
            Err(e) => {
                let context = describe_failure(&e);
                failure = Some(anyhow::Error::new(e).context(context));
                break;
            }
        };
        if let Err(e) = writeln!(out, "{pair}") {
            handle.cancel();
            failure = Some(anyhow::Error::new(e).context("failed to write pair"));
            break;
        }
        written += 1;
    }

    // Flush and join before reporting a failure
    let flushed = out.flush().context("failed to flush output");
    handle.join().await?;

    if let Some(failure) = failure {
        if let Err(e) = flushed {
            tracing::error!("{e:#}");
        }
        return Err(failure);
    }
    flushed?;

    if interrupted {
        bail!("interrupted after {written} pairs");
    }
    Ok(written)
}

fn describe_failure(error: &ScrapeError) -> &'static str {
    if error.is_connectivity() {
        "Wiktionary could not be reached"
    } else if error.is_malformed() {
        "Wiktionary answered in an unexpected shape"
    } else {
        "scrape failed"
    }
}
