//! Fanella command line client
//!
//! Usage: `fanella [FILE...]`
//!
//! Uploads every argument as a file source, then logs every page of sources
//! owned by the caller.

use anyhow::Context;
use fanella::blocking::Client;
use fanella::utils::{error_label, init_logging};
use fanella::{config, FanellaConfig, NewSource, PageQuery};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    let dotenv = dotenvy::dotenv();

    init_logging(LevelFilter::INFO);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = config::load().unwrap_or_else(|e| {
        warn!(error = %e, "No configuration found, using defaults");
        FanellaConfig::default()
    });

    let client = Client::from_config(config)
        .inspect_err(|e| error!(category = error_label(e), error = %e, "connect failed"))
        .context("failed to connect to Fanella")?;
    let sources = client.sources();

    for path in std::env::args_os().skip(1) {
        let source = NewSource::file(&path)?;
        let created = sources
            .create(source)
            .inspect_err(|e| error!(category = error_label(e), error = %e, "upload failed"))
            .with_context(|| format!("failed to upload {}", std::path::Path::new(&path).display()))?;
        info!(id = created.meta.id, name = %created.name, "uploaded source");
    }

    for (index, page) in sources.pages(PageQuery::default()).enumerate() {
        let page = page
            .inspect_err(|e| error!(category = error_label(e), error = %e, "listing failed"))
            .context("failed to list sources")?;
        for source in &page {
            info!(
                page = index + 1,
                id = source.meta.id,
                name = %source.name,
                state = source.task.state.as_deref().unwrap_or("unknown"),
                "source"
            );
        }
    }

    Ok(())
}
