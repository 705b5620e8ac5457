//! Log setup. The terminal belongs to the game, so events go to a file in
//! the app directory instead of stderr.

use crate::config::DEFAULT_LOG_FILTER;
use crate::utils::AppDirs;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Takes precedence over the config's `log_filter`.
pub const LOG_ENV_VAR: &str = "FLAPPER_LOG";

/// Parse `EnvFilter` directives, rejecting anything that does not parse
/// cleanly. `EnvFilter` reads an unknown word as a target name, so targets
/// are also limited to module-path characters.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, String> {
    if directives.trim().is_empty() {
        return Err("filter is empty".to_string());
    }
    for directive in directives.split(',').map(str::trim) {
        let target = directive
            .split(|c: char| c == '[' || c == '=')
            .next()
            .unwrap_or_default();
        let valid_target = target
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'));
        let opens = directive.matches('[').count();
        let balanced_span = opens <= 1 && opens == directive.matches(']').count();
        if directive.is_empty() || !valid_target || !balanced_span {
            return Err(format!("'{}' is not a filter directive", directive));
        }
    }
    EnvFilter::try_new(directives).map_err(|e| e.to_string())
}

/// First filter that parses: `env`, then `configured`, then `info`.
pub fn choose_filter(env: Option<&str>, configured: &str) -> EnvFilter {
    env.and_then(|value| parse_filter(value).ok())
        .or_else(|| parse_filter(configured).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Pick the filter from `$FLAPPER_LOG` and the configured fallback.
pub fn resolve_filter(configured: &str) -> EnvFilter {
    let env = std::env::var(LOG_ENV_VAR).ok();
    choose_filter(env.as_deref(), configured)
}

/// Install the global subscriber, appending to `flapper.log`.
pub fn init(dirs: &AppDirs, configured_filter: &str) -> io::Result<()> {
    dirs.ensure()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dirs.log_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
