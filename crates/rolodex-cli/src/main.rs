//! `rolodex` — a personal address book on the command line.
//!
//! # Usage
//!
//! ```
//! rolodex list jo
//! rolodex add --name "Ama Owusu" --phone 0201112222 --favorite
//! rolodex export --timestamp
//! rolodex --config ~/.config/rolodex.toml serve
//! ```

mod commands;
mod config;
mod output;
mod prompt;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use commands::BookCommand;
use rolodex_core::book::AddressBook;
use rolodex_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser)]
#[command(author, version, about = "Personal address book")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rolodex.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  #[command(flatten)]
  Book(BookCommand),
  /// Serve the JSON API over HTTP.
  Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Commands keep stderr quiet unless asked; the server reports by default.
  let default_level = match cli.command {
    Command::Serve => LevelFilter::INFO,
    Command::Book(_) => LevelFilter::WARN,
  };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let settings = Settings::load(&cli.config)?;

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  let mut book = AddressBook::open(store, settings.seed_sample_contacts)
    .await
    .context("failed to load contacts")?;

  match cli.command {
    Command::Book(command) => {
      let message = commands::run(&mut book, command, &mut prompt::confirm).await?;
      println!("{message}");
    }
    Command::Serve => serve(book, &settings).await?,
  }

  Ok(())
}

async fn serve(book: AddressBook<SqliteStore>, settings: &Settings) -> anyhow::Result<()> {
  let app = axum::Router::new().nest("/api", rolodex_api::api_router(rolodex_api::share(book)));
  let address = settings.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
