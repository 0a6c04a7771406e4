//! Frontmatter extraction from content documents.
//!
//! Supported formats:
//! - YAML, delimited by `---`
//! - TOML, delimited by `+++`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata read from the head of a content document.
///
/// # Standard Fields
///
/// | Field         | Aliases                | Used for            |
/// |---------------|------------------------|---------------------|
/// | `title`       |                        | `<title>`           |
/// | `pubDate`     | `pub_date`, `date`     | `<pubDate>`         |
/// | `description` | `summary`              | `<description>`     |
/// | `slug`        | `link`                 | `<link>` path       |
/// | `draft`       |                        | draft filtering     |
///
/// Any other field lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    pub title: Option<String>,
    #[serde(rename = "pubDate", alias = "pub_date", alias = "date")]
    pub pub_date: Option<String>,
    #[serde(alias = "summary")]
    pub description: Option<String>,
    #[serde(alias = "link")]
    pub slug: Option<String>,
    pub draft: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Frontmatter block syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

impl FrontmatterFormat {
    pub const fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split a document into `(format, frontmatter, body)`.
///
/// The opening delimiter must be the first non-blank line and the closing
/// delimiter must sit on its own line. Returns `None` without frontmatter.
pub fn split(source: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = source.trim_start_matches('\u{feff}').trim_start();

    let format = [FrontmatterFormat::Yaml, FrontmatterFormat::Toml]
        .into_iter()
        .find(|f| content.starts_with(f.delimiter()))?;
    let delimiter = format.delimiter();

    let after_open = content[delimiter.len()..]
        .strip_prefix("\r\n")
        .or_else(|| content[delimiter.len()..].strip_prefix('\n'))?;

    // The block may be empty: closing delimiter right after the opening one
    let close_start = std::iter::once(0)
        .chain(after_open.match_indices('\n').map(|(i, _)| i + 1))
        .find(|&start| is_delimiter_line(&after_open[start..], delimiter))?;

    let frontmatter = after_open[..close_start].trim_end_matches(['\r', '\n']);
    let rest = &after_open[close_start..];
    let body = rest
        .split_once('\n')
        .map_or("", |(_, body)| body)
        .trim_start_matches(['\r', '\n']);

    Some((format, frontmatter, body))
}

/// Whether `line` starts with `delimiter` alone on its line.
fn is_delimiter_line(line: &str, delimiter: &str) -> bool {
    line.strip_prefix(delimiter)
        .map(|rest| rest.trim_start_matches([' ', '\t']))
        .is_some_and(|rest| {
            rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
        })
}

/// Extract and parse frontmatter.
///
/// Returns `Ok(None)` when the document has no frontmatter block and an
/// error message when the block does not parse.
pub fn extract(source: &str) -> Result<Option<(Frontmatter, &str)>, String> {
    let Some((format, raw, body)) = split(source) else {
        return Ok(None);
    };

    let frontmatter = match format {
        FrontmatterFormat::Yaml => parse_yaml(raw)?,
        FrontmatterFormat::Toml => parse_toml(raw)?,
    };

    Ok(Some((frontmatter, body)))
}

fn parse_yaml(raw: &str) -> Result<Frontmatter, String> {
    if raw.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(raw).map_err(|e| format!("invalid YAML frontmatter: {e}"))
}

/// TOML dates are native datetimes; turn them back into text so they go
/// through the same publish-date parser as YAML dates.
fn parse_toml(raw: &str) -> Result<Frontmatter, String> {
    let mut table: toml::Table =
        toml::from_str(raw).map_err(|e| format!("invalid TOML frontmatter: {e}"))?;

    for (_, value) in table.iter_mut() {
        if let toml::Value::Datetime(datetime) = value {
            *value = toml::Value::String(datetime.to_string());
        }
    }

    toml::Value::Table(table)
        .try_into()
        .map_err(|e| format!("invalid TOML frontmatter: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let source = "---\ntitle: \"Post One\"\npubDate: 2024-01-01\ndescription: First post\n---\n\n# Body";
        let (fm, body) = extract(source).unwrap().unwrap();

        assert_eq!(fm.title.as_deref(), Some("Post One"));
        assert_eq!(fm.pub_date.as_deref(), Some("2024-01-01"));
        assert_eq!(fm.description.as_deref(), Some("First post"));
        assert!(!fm.draft);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_yaml_aliases() {
        let source = "---\ntitle: Hello\ndate: 2024-03-05T10:00:00Z\nsummary: short\nslug: /custom/hello\n---\n";
        let (fm, _) = extract(source).unwrap().unwrap();

        assert_eq!(fm.pub_date.as_deref(), Some("2024-03-05T10:00:00Z"));
        assert_eq!(fm.description.as_deref(), Some("short"));
        assert_eq!(fm.slug.as_deref(), Some("/custom/hello"));
    }

    #[test]
    fn test_yaml_extra_fields() {
        let source = "---\ntitle: Hello\ndraft: true\ntags: [rust, rss]\nlayout: ../../layouts/Post.astro\n---\n";
        let (fm, _) = extract(source).unwrap().unwrap();

        assert!(fm.draft);
        assert_eq!(fm.extra.get("tags"), Some(&serde_json::json!(["rust", "rss"])));
        assert_eq!(
            fm.extra.get("layout"),
            Some(&serde_json::json!("../../layouts/Post.astro"))
        );
    }

    #[test]
    fn test_toml_frontmatter_with_native_date() {
        let source = "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ndraft = false\n+++\nbody";
        let (fm, body) = extract(source).unwrap().unwrap();

        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.pub_date.as_deref(), Some("2024-01-01"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_frontmatter() {
        let source = "---\r\ntitle: Windows\r\ndate: 2024-01-01\r\n---\r\nbody";
        let (fm, body) = extract(source).unwrap().unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = extract("---\n---\nbody").unwrap().unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(extract("# Just content").unwrap().is_none());
        // unterminated block is not frontmatter
        assert!(extract("---\ntitle: x\nno closing").unwrap().is_none());
        // horizontal rule inside a line is not a delimiter
        assert!(extract("---title: x\n---").unwrap().is_none());
    }

    #[test]
    fn test_closing_delimiter_on_own_line() {
        let source = "---\ntitle: Rules\n----\n---foo\n---\nbody";
        let (_, raw, body) = split(source).unwrap();
        assert_eq!(raw, "title: Rules\n----\n---foo");
        assert_eq!(body, "body");

        // only look-alike lines, so the block never closes
        assert!(split("---\ntitle: x\n----\n---foo\nbody").is_none());

        let (_, raw, body) = split("+++\ntitle = \"x\"\n+++   \r\nbody").unwrap();
        assert_eq!(raw, "title = \"x\"");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_invalid_frontmatter() {
        let err = extract("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(err.contains("YAML"));

        let err = extract("+++\ntitle = \n+++\n").unwrap_err();
        assert!(err.contains("TOML"));
    }
}
