use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use marquee::export::write_json_file;
use marquee::format::{Layout, write_records};
use marquee::{FetchConfig, FetchError, MovieScraper};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Scrape movie listings from a single web page", long_about = None)]
struct Cli {
    #[arg(
        long,
        default_value = marquee::DEFAULT_URL,
        help = "Target page URL"
    )]
    url: String,

    #[arg(long, help = "Print each movie on one line as 'Title: Description'")]
    colon: bool,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = marquee::DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Request timeout in seconds"
    )]
    timeout: u64,

    #[arg(long, help = "Override the browser user agent sent with the request")]
    user_agent: Option<String>,

    #[arg(
        short = 'H',
        long = "header",
        value_name = "NAME: VALUE",
        value_parser = parse_header,
        help = "Extra request header, may be repeated"
    )]
    headers: Vec<(String, String)>,

    #[arg(long, value_name = "PATH", help = "Also save the results as JSON")]
    json: Option<PathBuf>,

    #[arg(long, help = "Fetch each movie's own page for year, duration and summary")]
    details: bool,

    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid header '{s}'. Expected 'NAME: VALUE'"))?;
    if name.trim().is_empty() {
        return Err(format!("Invalid header '{s}'. Header name is empty"));
    }
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn fetch_config(cli: &Cli) -> Result<FetchConfig, FetchError> {
    let mut config = FetchConfig::default().with_timeout(Duration::from_secs(cli.timeout));
    if let Some(user_agent) = &cli.user_agent {
        config = config.with_header("User-Agent", user_agent)?;
    }
    for (name, value) in &cli.headers {
        config = config.with_header(name, value)?;
    }
    Ok(config)
}

fn layout(cli: &Cli) -> Layout {
    if cli.colon {
        Layout::SingleLine
    } else {
        Layout::MultiLine
    }
}

/// Details only show up in the multi-line layout and in JSON, so single-line
/// runs without an export skip the extra requests.
fn wants_details(cli: &Cli) -> bool {
    cli.details && (layout(cli) == Layout::MultiLine || cli.json.is_some())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let config = fetch_config(&cli).unwrap_or_else(|e| {
        log::error!("Invalid args: {e}");
        process::exit(1);
    });

    let scraper = MovieScraper::new(config).unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    let mut records = scraper.scrape(&cli.url).await;
    log::info!("Found {} record(s)", records.len());

    if wants_details(&cli) {
        if !records.is_empty() {
            scraper.enrich(&mut records).await;
        }
    } else if cli.details {
        log::warn!("Skipping details: single-line output does not show them (add --json)");
    }

    if let Some(path) = &cli.json
        && let Err(e) = write_json_file(path, &records)
    {
        log::error!("{}", e);
    }

    let mut out = io::stdout().lock();
    if let Err(e) = write_records(&mut out, &records, layout(&cli)) {
        log::error!("Error writing results: {}", e);
    }
}
