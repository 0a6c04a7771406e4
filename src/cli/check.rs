//! `sitefeed check`: run the whole pipeline without writing.
//!
//! Configuration is validated while loading; this adds collection,
//! serialization and the RSS read-back check.

use crate::{config::SiteConfig, generator::generate, log, utils::plural_count};
use anyhow::Result;

pub fn check_feed(config: &SiteConfig) -> Result<()> {
    let output = generate(config)?;

    log!(
        "check";
        "ok, {} would be written to {}",
        plural_count(output.items(), "item"),
        config.root_relative(config.feed.output_file()).display()
    );
    if output.skipped > 0 {
        log!("warning"; "{} skipped", plural_count(output.skipped, "document"));
    }
    Ok(())
}
