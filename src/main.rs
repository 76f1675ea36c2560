//! Play snake in a window.

use gridsnake::Config;
use miette::Result;

/// Environment variable pointing to a different configuration file.
const CONFIG_PATH_VAR: &str = "GRIDSNAKE_CONFIG";

/// Configuration file used when the environment variable is not set.
const DEFAULT_CONFIG_PATH: &str = "data/options.toml";

fn main() -> Result<()> {
    // Show info logs by default, can be overwritten with `RUST_LOG`
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    let config = Config::load(path)?;

    let session = gridsnake::run(&config)?;

    session.report();

    Ok(())
}
