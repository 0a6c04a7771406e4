//! Feed generation pipeline.
//!
//! ```text
//! Collector ─► FeedBuilder ─► xml::serialize ─► xml::validate_rss ─► write_feed
//! ```
//!
//! Item errors are logged and the item is dropped. Configuration and
//! serialization errors abort the run.

use crate::{
    collector::{Collector, Glob},
    config::SiteConfig,
    debug,
    feed::{
        Feed, FeedBuilder, FeedError,
        xml::{self, XmlOptions},
    },
    log,
    utils::plural_count,
};
use anyhow::{Context, Result};
use std::fs;

/// Result of one pipeline run.
#[derive(Debug)]
pub struct FeedOutput {
    pub feed: Feed,
    pub xml: String,
    /// Documents dropped because of item errors.
    pub skipped: usize,
    /// Draft documents left out.
    pub drafts: usize,
}

impl FeedOutput {
    pub fn items(&self) -> usize {
        self.feed.items.len()
    }
}

/// Collect, build, serialize and validate the feed. Nothing is written.
pub fn generate(config: &SiteConfig) -> Result<FeedOutput, FeedError> {
    let content = &config.feed.content;
    if !content.is_dir() {
        return Err(FeedError::Configuration(format!(
            "content directory `{}` does not exist",
            content.display()
        )));
    }

    let mut builder = FeedBuilder::new(&config.channel_options())?;
    let collector = Collector::new(content, Glob::new(&config.feed.pattern)?);
    debug!(
        "collect";
        "{} under {}",
        collector.glob().as_str(),
        collector.root().display()
    );

    let mut skipped = 0;
    let mut drafts = 0;
    for result in collector.documents() {
        let pushed = result.and_then(|doc| {
            if doc.is_draft() && !config.feed.drafts {
                debug!("draft"; "skip {}", config.root_relative(&doc.path).display());
                drafts += 1;
                return Ok(());
            }
            builder.push(&doc).map(|_| ())
        });

        match pushed {
            Ok(()) => {}
            Err(e) if e.is_item_error() => {
                log!("warning"; "{}", relativize(config, e));
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let feed = builder.finish();
    let xml = xml::serialize(
        &feed,
        &XmlOptions {
            pretty: !config.feed.minify,
        },
    )?;
    xml::validate_rss(&xml)?;

    Ok(FeedOutput {
        feed,
        xml,
        skipped,
        drafts,
    })
}

/// Write the generated document to `<output>/<path>`.
pub fn write_feed(config: &SiteConfig, output: &FeedOutput) -> Result<()> {
    let path = config.feed.output_file();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    fs::write(&path, &output.xml)
        .with_context(|| format!("failed to write `{}`", path.display()))?;

    log!(
        "feed";
        "{} ({})",
        config.root_relative(&path).display(),
        plural_count(output.items(), "item")
    );
    Ok(())
}

/// Show item paths relative to the project root in warnings.
fn relativize(config: &SiteConfig, err: FeedError) -> FeedError {
    match err {
        FeedError::ItemExtraction { path, reason } => FeedError::ItemExtraction {
            path: config.root_relative(&path),
            reason,
        },
        FeedError::Io(path, source) => FeedError::Io(config.root_relative(&path), source),
        other => other,
    }
}
