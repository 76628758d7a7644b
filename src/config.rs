//! Client configuration from the environment and command line.
//!
//! Precedence: CLI flag, then environment (including `.env`), then the
//! library defaults.

use postkit::PostkitConfig;

use crate::cli::Cli;
use crate::error::AppError;

pub const ENV_API_URL: &str = "POSTBOARD_API_URL";
pub const ENV_SEARCH_URL: &str = "POSTBOARD_SEARCH_URL";
pub const ENV_PAGE_SIZE: &str = "POSTBOARD_PAGE_SIZE";
pub const ENV_PASSWORD: &str = "POSTBOARD_PASSWORD";

/// Build the client configuration for this run.
pub fn load_config(cli: &Cli) -> Result<PostkitConfig, AppError> {
    let _ = dotenvy::dotenv(); // load .env if present
    resolve(cli, |key| std::env::var(key).ok())
}

fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<PostkitConfig, AppError> {
    let mut config = PostkitConfig::default();

    if let Some(url) = cli.api_url.clone().or_else(|| env(ENV_API_URL)) {
        config.api_url = url;
    }
    if let Some(url) = cli.search_url.clone().or_else(|| env(ENV_SEARCH_URL)) {
        config.search_api_url = url;
    }
    match (cli.page_size, env(ENV_PAGE_SIZE)) {
        (Some(size), _) => config.page_size = size,
        (None, Some(raw)) => {
            config.page_size = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("{ENV_PAGE_SIZE} is not a number: {raw}")))?;
        }
        (None, None) => {}
    }
    if config.page_size == 0 {
        return Err(AppError::Config("page size must be at least 1".into()));
    }

    config.validate()?;
    Ok(config)
}

/// The password from the command line, else from the environment.
pub fn resolve_password(given: Option<&str>) -> Result<String, AppError> {
    match given {
        Some(p) => Ok(p.to_string()),
        None => std::env::var(ENV_PASSWORD)
            .map_err(|_| AppError::Config(format!("--password or {ENV_PASSWORD} is required"))),
    }
}
