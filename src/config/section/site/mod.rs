//! `[site]` section configuration.
//!
//! Channel-level metadata for the generated feed.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Coder Spirit"
//! description = "Geeky Computer Science stuff."
//! url = "https://example.com"
//! language = "en-us"
//! custom_data = "<copyright>CC BY 4.0</copyright>"
//! stylesheet = "/rss/styles.xsl"
//!
//! [site.xmlns]
//! media = "http://search.yahoo.com/mrss/"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::feed::{parse_site_url, xml::check_fragment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Site metadata, mapped onto the RSS `<channel>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Channel title.
    pub title: String,

    /// Channel description.
    pub description: String,

    /// Canonical site URL; every item link is derived from it.
    pub url: Option<String>,

    /// Language tag for `<language>`. Empty to omit the element.
    pub language: String,

    /// Raw XML injected into `<channel>` as-is.
    pub custom_data: String,

    /// XSL stylesheet emitted as an `xml-stylesheet` processing instruction.
    pub stylesheet: Option<String>,

    /// Extra namespace declarations on `<rss>` (`prefix = "uri"`).
    pub xmlns: BTreeMap<String, String>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: None,
            language: "en-us".into(),
            custom_data: String::new(),
            stylesheet: None,
            xmlns: BTreeMap::new(),
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const LANGUAGE: FieldPath = FieldPath::new("site.language");
    pub const CUSTOM_DATA: FieldPath = FieldPath::new("site.custom_data");
    pub const XMLNS: FieldPath = FieldPath::new("site.xmlns");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` is not empty
    /// - `url` is set, absolute, and uses http or https
    /// - `custom_data` is a well-formed XML fragment
    /// - `xmlns` prefixes are plain names
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error_with_hint(
                Self::TITLE,
                "feed title is empty",
                "set site.title, e.g.: \"My Blog\"",
            );
        }

        match &self.url {
            None => diag.error_with_hint(
                Self::URL,
                "site url is not configured, item links are derived from it",
                "set site.url, e.g.: \"https://example.com\"",
            ),
            Some(url) => {
                if let Err(e) = parse_site_url(url) {
                    diag.error_with_hint(Self::URL, e, "use format like https://example.com");
                }
            }
        }

        if let Err(e) = check_fragment(&self.custom_data) {
            diag.error_with_hint(
                Self::CUSTOM_DATA,
                e,
                "custom_data is written verbatim and must be well-formed XML",
            );
        }

        if !self.language.is_empty() && self.custom_data.contains("<language") {
            diag.warn(
                Self::LANGUAGE,
                "custom_data also contains <language>, the channel will carry two; set site.language = \"\" to keep only the custom one",
            );
        }

        for prefix in self.xmlns.keys() {
            let valid = !prefix.is_empty()
                && prefix
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
            if !valid {
                diag.error(Self::XMLNS, format!("invalid namespace prefix `{prefix}`"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let site = SiteInfoConfig::default();
        assert_eq!(site.language, "en-us");
        assert!(site.url.is_none());
        assert!(site.custom_data.is_empty());
        assert!(site.xmlns.is_empty());
    }

    #[test]
    fn test_parse_site_section() {
        let config = test_parse_config(
            "url = \"https://example.com\"\ncustom_data = \"<ttl>60</ttl>\"\n[site.xmlns]\nmedia = \"http://search.yahoo.com/mrss/\"",
        );
        assert_eq!(config.site.url.as_deref(), Some("https://example.com"));
        assert_eq!(config.site.custom_data, "<ttl>60</ttl>");
        assert_eq!(
            config.site.xmlns.get("media").map(String::as_str),
            Some("http://search.yahoo.com/mrss/")
        );
    }

    fn validated(site: &SiteInfoConfig) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        diag
    }

    fn valid_site() -> SiteInfoConfig {
        SiteInfoConfig {
            title: "Coder Spirit".into(),
            description: "Geeky Computer Science stuff.".into(),
            url: Some("https://example.com".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        let diag = validated(&valid_site());
        assert!(!diag.has_errors());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_validate_missing_url() {
        let site = SiteInfoConfig {
            url: None,
            ..valid_site()
        };
        let diag = validated(&site);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, SiteInfoConfig::URL);
    }

    #[test]
    fn test_validate_relative_url() {
        let site = SiteInfoConfig {
            url: Some("/blog".into()),
            ..valid_site()
        };
        assert!(validated(&site).has_errors());

        let site = SiteInfoConfig {
            url: Some("ftp://example.com".into()),
            ..valid_site()
        };
        assert!(validated(&site).has_errors());
    }

    #[test]
    fn test_validate_malformed_custom_data() {
        let site = SiteInfoConfig {
            custom_data: "<language>en-us".into(),
            ..valid_site()
        };
        let diag = validated(&site);
        assert_eq!(diag.errors()[0].field, SiteInfoConfig::CUSTOM_DATA);
    }

    #[test]
    fn test_validate_duplicate_language_warns() {
        let site = SiteInfoConfig {
            custom_data: "<language>en-us</language>".into(),
            ..valid_site()
        };
        let diag = validated(&site);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);

        let site = SiteInfoConfig {
            language: String::new(),
            custom_data: "<language>en-us</language>".into(),
            ..valid_site()
        };
        assert!(validated(&site).warnings().is_empty());
    }

    #[test]
    fn test_validate_bad_xmlns_prefix() {
        let mut site = valid_site();
        site.xmlns.insert("bad prefix".into(), "urn:x".into());
        assert!(validated(&site).has_errors());
    }
}
