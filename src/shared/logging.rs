//! Structured logging setup.
//!
//! Diagnostics are emitted with `tracing` macros and written to stderr so
//! that stdout only ever carries base image references. The level comes from
//! `--log-level`, then `BASE_IMAGE_INVENTORY_LOG_LEVEL`, then defaults to
//! `warn`. A set `RUST_LOG` takes precedence over all of them.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted when no explicit level is given
pub const LOG_LEVEL_ENV: &str = "BASE_IMAGE_INVENTORY_LOG_LEVEL";

static INIT: Once = Once::new();

/// Parses a log level from a string, falling back to `WARN`
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}

/// Resolves the effective level from an explicit value or the environment
pub fn resolve_level(explicit: Option<&str>) -> Level {
    match explicit {
        Some(level_str) => parse_level(level_str),
        None => env::var(LOG_LEVEL_ENV)
            .map(|level_str| parse_level(&level_str))
            .unwrap_or(Level::WARN),
    }
}

/// Initializes the global subscriber. Later calls are ignored.
pub fn init_logging(explicit_level: Option<&str>) {
    INIT.call_once(|| {
        let level = resolve_level(explicit_level);
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter.add_directive(LevelFilter::from_level(level).into());
            for directive in ["h2=warn", "hyper=warn", "hyper_util=warn", "reqwest=warn"] {
                if let Ok(directive) = directive.parse() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init();
    });
}
