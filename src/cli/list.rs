//! `sitefeed list`: print the items the feed would contain.

use crate::{
    config::SiteConfig,
    feed::Item,
    generator::{FeedOutput, generate},
    log,
    utils::plural_count,
};
use anyhow::Result;
use serde::Serialize;

/// One listed item.
#[derive(Debug, Serialize)]
struct ListedItem<'a> {
    title: &'a str,
    link: &'a str,
    #[serde(rename = "pubDate")]
    pub_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> From<&'a Item> for ListedItem<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            title: &item.title,
            link: &item.link,
            pub_date: item.pub_date.to_rfc822(),
            description: item.description.as_deref(),
        }
    }
}

pub fn list_items(config: &SiteConfig, json: bool, pretty: bool) -> Result<()> {
    let output = generate(config)?;

    if json {
        println!("{}", to_json(&output, pretty)?);
        return Ok(());
    }

    for item in &output.feed.items {
        println!(
            "{}  {}  {}",
            item.pub_date.as_datetime().format("%Y-%m-%d"),
            item.link,
            item.title
        );
    }
    log!("list"; "{}", plural_count(output.items(), "item"));
    Ok(())
}

fn to_json(output: &FeedOutput, pretty: bool) -> serde_json::Result<String> {
    let items: Vec<ListedItem<'_>> = output.feed.items.iter().map(ListedItem::from).collect();
    if pretty {
        serde_json::to_string_pretty(&items)
    } else {
        serde_json::to_string(&items)
    }
}
