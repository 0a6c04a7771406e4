//! `sitefeed build`: generate the feed and write it to the output directory.

use crate::{
    config::SiteConfig,
    generator::{generate, write_feed},
    log,
    utils::plural_count,
};
use anyhow::Result;

pub fn build_feed(config: &SiteConfig) -> Result<()> {
    let output = generate(config)?;
    write_feed(config, &output)?;

    if output.skipped > 0 {
        log!("feed"; "{} skipped", plural_count(output.skipped, "document"));
    }
    if output.drafts > 0 {
        log!("feed"; "{} skipped", plural_count(output.drafts, "draft"));
    }
    Ok(())
}
