//! `sitefeed init`: write a starter configuration file.

use crate::log;
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Generate sitefeed.toml content with comments.
pub fn generate_config_template() -> String {
    format!(
        r#"# sitefeed configuration file (v{version})

[site]
# Channel title and description
title = "Coder Spirit"
description = "Geeky Computer Science stuff."
# Canonical site URL, item links are `url + slug`
url = "https://example.com"
# Emitted as <language>, leave empty to omit
language = "en-us"
# Raw XML injected into <channel> as-is
custom_data = ""
# XSL stylesheet for browsers, e.g. "/rss/styles.xsl"
# stylesheet = ""

# Extra namespaces declared on <rss>
[site.xmlns]
# media = "http://search.yahoo.com/mrss/"

[feed]
# Directory the pattern is matched against
content = "src/pages"
# Glob selecting feed documents
pattern = "blog/**/*.mdx"
# Output directory and file name
output = "dist"
path = "feed.xml"
# Include documents marked `draft: true`
drafts = false
# Item link trailing slash: "ignore", "always" or "never"
trailing_slash = "ignore"
# Compact XML output
minify = true
"#,
        version = env!("CARGO_PKG_VERSION")
    )
}

/// Write the starter config into `dir`.
///
/// An existing file is only replaced with `force`.
pub fn write_config(dir: &Path, file_name: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(file_name);
    if path.exists() && !force {
        bail!(
            "'{}' already exists.\n\
             Use `sitefeed init --force` to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(&path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(path)
}

/// Entry point for `sitefeed init`.
pub fn init_config(file_name: &Path, force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let path = write_config(&cwd, file_name, force)?;
    log!("init"; "wrote {}", path.display());
    Ok(())
}
