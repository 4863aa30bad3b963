// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, Settings};

/// Loads the application settings from the `config` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings rooted at `config_dir`.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(config_dir: &Path) -> Result<Settings> {
    load_layered(config_dir, environment_source())
}

/// Settings from environment variables (e.g., `APP__STRATEGY__PARAMS__TICKER=MSFT`).
/// The prefix is `APP`, separator is `__`.
///
/// Values stay strings: strategy params are an opaque table, and a ticker such
/// as `7203` or `0700` must not turn into a number on the way through.
fn environment_source() -> Environment {
    Environment::with_prefix("APP").separator("__")
}

fn load_layered(config_dir: &Path, environment_vars: Environment) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::from(config_dir.join("base")))
        // 2. Load the environment-specific configuration file.
        .add_source(File::from(config_dir.join(&environment)).required(false))
        // 3. Load settings from environment variables.
        .add_source(environment_vars)
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}
