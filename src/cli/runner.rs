//! CLI runner - executes commands

use crate::cache::{CacheSnapshot, CacheStore, FileStore};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::pagination::list_url;
use crate::source::HttpListSource;
use crate::types::{ListConfig, MovieRecord};
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.source_config()?;

        match &self.cli.command {
            Commands::Fetch { user_id, list } => {
                self.fetch(&config, ListConfig::new(user_id, list)).await
            }
            Commands::Url { user_id, list } => {
                let list = ListConfig::new(user_id, list);
                list.validate()?;
                println!("{}", list_url(config.site(), &list));
                Ok(())
            }
            Commands::Cache => self.show_cache(&config).await,
        }
    }

    /// Load the source config, applying command-line overrides
    fn source_config(&self) -> Result<SourceConfig> {
        let mut config = match &self.cli.config {
            Some(path) => SourceConfig::from_file(path)?,
            None => SourceConfig::default(),
        };

        if let Some(path) = &self.cli.cache_file {
            config.cache_file = Some(path.clone());
        }

        Ok(config)
    }

    async fn fetch(&self, config: &SourceConfig, list: ListConfig) -> Result<()> {
        list.validate()?;
        let source = HttpListSource::from_config(config)?;

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping at the next page");
                on_interrupt.cancel();
            }
        });

        let records = source.records_with_cancel(&list, &cancel).await?;
        print!("{}", render_records(&records, self.cli.format)?);
        Ok(())
    }

    async fn show_cache(&self, config: &SourceConfig) -> Result<()> {
        let path = config
            .cache_file
            .as_ref()
            .ok_or_else(|| Error::config("No cache file configured (use --cache-file)"))?;

        let snapshot = FileStore::open(path)?.snapshot().await?;
        print!(
            "{}",
            render_cache(&snapshot, Utc::now(), self.cli.format)?
        );
        Ok(())
    }
}

/// Records as JSON lines or an aligned listing
fn render_records(records: &[MovieRecord], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            for record in records {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
        }
        OutputFormat::Pretty => {
            for record in records {
                let id = if record.has_id() {
                    record.external_id.as_str()
                } else {
                    "-"
                };
                out.push_str(&format!("{id:<11} {}  <{}>\n", record.title, record.canonical_url));
            }
            out.push_str(&format!("{} movies\n", records.len()));
        }
    }
    Ok(out)
}

/// Cache entries, sorted by key
fn render_cache(
    snapshot: &CacheSnapshot,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String> {
    let mut keys: Vec<_> = snapshot.entries.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        let entry = &snapshot.entries[key];
        match format {
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "key": key,
                    "records": entry.records.len(),
                    "created_at": entry.created_at,
                    "expires_at": entry.expires_at(),
                    "live": entry.is_live(now),
                });
                out.push_str(&line.to_string());
                out.push('\n');
            }
            OutputFormat::Pretty => {
                let status = if entry.is_live(now) { "live" } else { "expired" };
                out.push_str(&format!(
                    "{key}  {} records  created {}  {status}\n",
                    entry.records.len(),
                    entry.created_at.to_rfc3339()
                ));
            }
        }
    }
    Ok(out)
}
