mod extract;
pub mod details;
pub mod export;
pub mod fetch;
pub mod format;
pub mod types;

pub use extract::{extract_movies, fallback_pass, primary_pass, resolve_link};
pub use fetch::{FetchConfig, FetchError, MovieScraper};
pub use types::{MovieDetails, MovieRecord};

pub const DEFAULT_URL: &str = "http://publicdomainmovie.net/";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/117.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
