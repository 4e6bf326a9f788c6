//! Runtime settings for the `rolodex` binary.
//!
//! Layered with the `config` crate, lowest precedence first:
//! 1. built-in defaults,
//! 2. the TOML file given by `--config` (optional; default `rolodex.toml`),
//! 3. `ROLODEX_*` environment variables (e.g. `ROLODEX_STORE_PATH`).

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

/// Environment variable prefix.
const ENV_PREFIX: &str = "ROLODEX";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding the saved snapshot. A leading `~` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  /// Start with the sample contacts when nothing has been saved yet.
  #[serde(default = "default_seed")]
  pub seed_sample_contacts: bool,
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/rolodex/rolodex.db") }

fn default_seed() -> bool { true }

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5233 }

impl Settings {
  /// Read `path` (if it exists) and the process environment.
  pub fn load(path: &Path) -> Result<Self> {
    Self::from_sources(
      config::File::from(path).required(false),
      config::Environment::with_prefix(ENV_PREFIX),
    )
    .with_context(|| format!("failed to load settings from {}", path.display()))
  }

  fn from_sources<F>(file: F, env: config::Environment) -> Result<Self>
  where
    F: config::Source + Send + Sync + 'static,
  {
    let settings = config::Config::builder()
      .add_source(file)
      .add_source(env.try_parsing(true))
      .build()
      .context("failed to read configuration")?;

    let mut parsed: Settings = settings
      .try_deserialize()
      .context("failed to deserialise Settings")?;
    parsed.store_path = expand_tilde(&parsed.store_path);
    Ok(parsed)
  }

  /// `host:port` for the HTTP listener.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
