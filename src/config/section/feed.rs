//! `[feed]` section configuration: content discovery and output.

use crate::collector::Glob;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How item links treat a trailing `/`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Keep the slug as written (default).
    #[default]
    Ignore,
    /// Always end links with `/`.
    Always,
    /// Never end links with `/`.
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Directory the pattern is matched against.
    pub content: PathBuf,
    /// Glob selecting content documents, relative to `content`.
    pub pattern: String,
    /// Output file name, relative to `output`.
    pub path: PathBuf,
    /// Output directory.
    pub output: PathBuf,
    /// Include documents with `draft: true`.
    pub drafts: bool,
    /// Trailing slash policy for item links.
    pub trailing_slash: TrailingSlash,
    /// Compact XML output.
    pub minify: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            content: "src/pages".into(),
            pattern: "blog/**/*.mdx".into(),
            path: "feed.xml".into(),
            output: "dist".into(),
            drafts: false,
            trailing_slash: TrailingSlash::Ignore,
            minify: true,
        }
    }
}

impl FeedConfig {
    pub const PATTERN: FieldPath = FieldPath::new("feed.pattern");
    pub const PATH: FieldPath = FieldPath::new("feed.path");

    /// Validate feed configuration.
    ///
    /// # Checks
    /// - `pattern` compiles
    /// - `path` is a relative file path
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(e) = Glob::new(&self.pattern) {
            diag.error_with_hint(
                Self::PATTERN,
                e.to_string(),
                "use a glob like \"blog/**/*.mdx\"",
            );
        }

        if self.path.as_os_str().is_empty() || self.path.is_absolute() {
            diag.error_with_hint(
                Self::PATH,
                format!("`{}` must be a relative file name", self.path.display()),
                "use format like \"feed.xml\" or \"rss/feed.xml\"",
            );
        }
    }

    /// Where the feed is written.
    pub fn output_file(&self) -> PathBuf {
        self.output.join(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.feed.content, PathBuf::from("src/pages"));
        assert_eq!(config.feed.pattern, "blog/**/*.mdx");
        assert_eq!(config.feed.path, PathBuf::from("feed.xml"));
        assert_eq!(config.feed.output, PathBuf::from("dist"));
        assert!(!config.feed.drafts);
        assert!(config.feed.minify);
        assert_eq!(config.feed.trailing_slash, TrailingSlash::Ignore);
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config(
            "[feed]\ncontent = \"content\"\npattern = \"posts/*.md\"\npath = \"rss.xml\"\ndrafts = true\ntrailing_slash = \"always\"\nminify = false",
        );
        assert_eq!(config.feed.content, PathBuf::from("content"));
        assert_eq!(config.feed.pattern, "posts/*.md");
        assert_eq!(config.feed.output_file(), PathBuf::from("dist/rss.xml"));
        assert!(config.feed.drafts);
        assert!(!config.feed.minify);
        assert_eq!(config.feed.trailing_slash, TrailingSlash::Always);
    }

    #[test]
    fn test_validate_bad_pattern() {
        let feed = FeedConfig {
            pattern: "blog/{a,b".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        feed.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, FeedConfig::PATTERN);
    }

    #[test]
    fn test_validate_empty_path() {
        let feed = FeedConfig {
            path: PathBuf::new(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        feed.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, FeedConfig::PATH);
    }
}
