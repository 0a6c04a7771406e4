//! Feed assembly: documents in, [`Feed`] out.
//!
//! Links are resolved as `site + slug`. The builder keeps the order in which
//! documents are pushed and rejects a second item with the same link.

use super::{Channel, ChannelOptions, Feed, FeedError, Item, PubDate, parse_site_url};
use crate::{collector::Document, config::TrailingSlash};
use rustc_hash::FxHashSet;

pub struct FeedBuilder {
    channel: Channel,
    /// Site URL without trailing `/`, prepended to every slug.
    base: String,
    trailing_slash: TrailingSlash,
    items: Vec<Item>,
    links: FxHashSet<String>,
}

impl FeedBuilder {
    /// Validate channel options and start an empty feed.
    ///
    /// Fails when `site` is missing or not an absolute http(s) URL, since
    /// every item link is derived from it.
    pub fn new(options: &ChannelOptions) -> Result<Self, FeedError> {
        let site = options
            .site
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FeedError::Configuration("`site` is not set".into()))?;
        parse_site_url(site).map_err(FeedError::Configuration)?;

        let channel = Channel {
            title: options.title.clone(),
            description: options.description.clone(),
            link: site.to_string(),
            language: options.language.clone(),
            custom_data: options.custom_data.clone(),
            stylesheet: options.stylesheet.clone(),
            xmlns: options.xmlns.clone(),
        };

        Ok(Self {
            channel,
            base: site.trim_end_matches('/').to_string(),
            trailing_slash: options.trailing_slash,
            items: Vec::new(),
            links: FxHashSet::default(),
        })
    }

    /// Map a document onto an item and append it.
    ///
    /// An unparsable publish date or an already used link fails this item
    /// only; the builder stays usable.
    pub fn push(&mut self, document: &Document) -> Result<&Item, FeedError> {
        let fm = &document.frontmatter;

        let raw_date = fm.pub_date.as_deref().unwrap_or_default();
        let pub_date = PubDate::parse(raw_date).ok_or_else(|| {
            FeedError::item(&document.path, format!("invalid publish date `{raw_date}`"))
        })?;

        let link = self.resolve_link(&document.slug);
        if self.links.contains(&link) {
            return Err(FeedError::item(
                &document.path,
                format!("duplicate link {link}"),
            ));
        }
        self.links.insert(link.clone());

        let description = fm
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.items.push(Item {
            title: document.title().trim().to_string(),
            link,
            pub_date,
            description,
        });
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn finish(self) -> Feed {
        Feed {
            channel: self.channel,
            items: self.items,
        }
    }

    /// `site + slug`, unless the slug is already an absolute URL.
    fn resolve_link(&self, slug: &str) -> String {
        let link = if parse_site_url(slug).is_ok() {
            slug.to_string()
        } else {
            format!("{}/{}", self.base, slug.trim_start_matches('/'))
        };

        match self.trailing_slash {
            TrailingSlash::Ignore => link,
            TrailingSlash::Always if link.ends_with('/') => link,
            TrailingSlash::Always => link + "/",
            TrailingSlash::Never => {
                let trimmed = link.trim_end_matches('/');
                // never strip the slash that terminates the host
                if trimmed.len() <= self.base.len() {
                    link
                } else {
                    trimmed.to_string()
                }
            }
        }
    }
}
