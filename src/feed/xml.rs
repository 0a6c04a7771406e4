//! RSS 2.0 serialization.
//!
//! The document is written event by event with `quick-xml` so the channel's
//! `custom_data` fragment can be spliced in verbatim. Everything else goes
//! through `BytesText` and is escaped.

use super::{Feed, FeedError, Item};
use quick_xml::{
    Reader, Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event},
};
use rss::validation::Validate;
use std::{fmt::Display, io::Write};

/// Indentation of a `<channel>` child in pretty output.
const CHANNEL_CHILD_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlOptions {
    /// Indent nested elements by two spaces.
    pub pretty: bool,
}

fn ser_err(e: impl Display) -> FeedError {
    FeedError::Serialization(e.to_string())
}

/// Serialize a feed to an RSS 2.0 document.
pub fn serialize(feed: &Feed, options: &XmlOptions) -> Result<String, FeedError> {
    let channel = &feed.channel;
    if let Some(fragment) = channel.custom_data.as_deref() {
        check_fragment(fragment)
            .map_err(|e| FeedError::Serialization(format!("invalid custom data: {e}")))?;
    }

    let mut writer = if options.pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ser_err)?;

    if let Some(href) = channel.stylesheet.as_deref() {
        let pi = format!(r#"xml-stylesheet href="{}" type="text/xsl""#, escape(href));
        writer
            .write_event(Event::PI(BytesPI::new(pi)))
            .map_err(ser_err)?;
    }

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    for (prefix, uri) in &channel.xmlns {
        rss.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
    }
    writer.write_event(Event::Start(rss)).map_err(ser_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(ser_err)?;

    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    if let Some(language) = channel.language.as_deref() {
        write_text_element(&mut writer, "language", language)?;
    }

    if let Some(fragment) = channel.custom_data.as_deref() {
        let out = writer.get_mut();
        if options.pretty {
            write!(out, "\n{CHANNEL_CHILD_INDENT}").map_err(ser_err)?;
        }
        out.write_all(fragment.trim().as_bytes()).map_err(ser_err)?;
    }

    for item in &feed.items {
        write_item(&mut writer, item)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(ser_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(ser_err)?;

    String::from_utf8(writer.into_inner()).map_err(ser_err)
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &Item) -> Result<(), FeedError> {
    writer
        .write_event(Event::Start(BytesStart::new("item")))
        .map_err(ser_err)?;

    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "link", &item.link)?;
    if let Some(description) = item.description.as_deref() {
        write_text_element(writer, "description", description)?;
    }
    write_text_element(writer, "pubDate", &item.pub_date.to_rfc822())?;

    writer
        .write_event(Event::End(BytesEnd::new("item")))
        .map_err(ser_err)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), FeedError> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))
        .map_err(ser_err)?;
    Ok(())
}

/// Check that a raw fragment is well-formed XML content.
///
/// Tags must balance and the fragment may not carry its own declaration.
/// Text and comments around elements are allowed; an empty fragment is fine.
pub fn check_fragment(fragment: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(fragment);
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(e)) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    format!(
                        "closing tag `</{}>` without opening tag",
                        String::from_utf8_lossy(e.name().as_ref())
                    )
                })?;
            }
            Ok(Event::Decl(_)) => return Err("unexpected XML declaration".into()),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {e}",
                    reader.error_position()
                ));
            }
        }
    }

    if depth > 0 {
        return Err(format!("{depth} unclosed tag(s)"));
    }
    Ok(())
}

/// Parse a serialized document back and run the RSS validator on it.
pub fn validate_rss(xml: &str) -> Result<rss::Channel, FeedError> {
    let channel = rss::Channel::read_from(xml.as_bytes())
        .map_err(|e| FeedError::Serialization(format!("generated RSS does not parse: {e}")))?;
    channel
        .validate()
        .map_err(|e| FeedError::Serialization(format!("RSS validation failed: {e}")))?;
    Ok(channel)
}
