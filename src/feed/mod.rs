//! RSS 2.0 feed model.
//!
//! A [`Feed`] is built once per run from [`ChannelOptions`] and the
//! collected documents, serialized, then dropped:
//!
//! - [`builder`]: documents → items, link resolution, duplicate detection
//! - [`date`]: publish date parsing and RFC 822 formatting
//! - [`xml`]: RSS serialization and read-back validation

pub mod builder;
pub mod date;
mod error;
pub mod xml;

pub use builder::FeedBuilder;
pub use date::PubDate;
pub use error::FeedError;

use crate::config::TrailingSlash;
use std::collections::BTreeMap;
use url::Url;

/// Channel metadata as handed to the builder.
#[derive(Debug, Clone, Default)]
pub struct ChannelOptions {
    pub title: String,
    pub description: String,
    /// Canonical site URL; required.
    pub site: Option<String>,
    pub language: Option<String>,
    /// Raw XML injected into `<channel>` verbatim.
    pub custom_data: Option<String>,
    pub stylesheet: Option<String>,
    pub xmlns: BTreeMap<String, String>,
    pub trailing_slash: TrailingSlash,
}

/// The `<channel>` of a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    /// Absolute site URL.
    pub link: String,
    pub language: Option<String>,
    pub custom_data: Option<String>,
    pub stylesheet: Option<String>,
    pub xmlns: BTreeMap<String, String>,
}

/// One `<item>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    /// Absolute URL, unique within the feed.
    pub link: String,
    pub pub_date: PubDate,
    pub description: Option<String>,
}

/// A channel and its items in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub channel: Channel,
    pub items: Vec<Item>,
}

/// Check that `site` is an absolute http(s) URL with a host.
pub fn parse_site_url(site: &str) -> Result<Url, String> {
    let url = Url::parse(site.trim()).map_err(|e| format!("invalid site URL `{site}`: {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "site URL scheme '{}' not supported, must be http or https",
            url.scheme()
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("site URL `{site}` has no host"));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_url() {
        assert!(parse_site_url("https://example.com").is_ok());
        assert!(parse_site_url("http://localhost:4321/blog/").is_ok());

        assert!(parse_site_url("").is_err());
        assert!(parse_site_url("example.com").is_err());
        assert!(parse_site_url("/blog").is_err());
        assert!(parse_site_url("ftp://example.com").is_err());
        assert!(parse_site_url("mailto:me@example.com").is_err());
    }
}
