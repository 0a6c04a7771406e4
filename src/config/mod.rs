//! Site configuration management for `sitefeed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── feed       # [feed]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section  | Purpose                                              |
//! |----------|------------------------------------------------------|
//! | `[site]` | Channel metadata (title, description, url, language) |
//! | `[feed]` | Content root, glob pattern, output path, drafts      |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{FeedConfig, SiteInfoConfig, TrailingSlash};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli},
    feed::ChannelOptions,
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitefeed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Channel metadata
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Discovery and output settings
    #[serde(default)]
    pub feed: FeedConfig,
}

impl SiteConfig {
    /// Load configuration for a feed command.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let Some(config_path) = find_config_file(&cwd, &cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file '{}' not found, run 'sitefeed init' to create one",
                cli.config.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);

        if let Some(args) = cli.command.build_args() {
            config.apply_build_args(args);
        }
        config.finalize();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub(crate) fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Channel options handed to the feed builder.
    pub fn channel_options(&self) -> ChannelOptions {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());

        ChannelOptions {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            site: self.site.url.clone(),
            language: non_empty(&self.site.language),
            custom_data: non_empty(&self.site.custom_data),
            stylesheet: self.site.stylesheet.as_deref().and_then(non_empty),
            xmlns: self.site.xmlns.clone(),
            trailing_slash: self.feed.trailing_slash,
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.feed.output, args.output.as_ref());
        Self::update_option(&mut self.feed.content, args.content.as_ref());
        Self::update_option(&mut self.feed.minify, args.minify.as_ref());
        Self::update_option(&mut self.feed.drafts, args.drafts.as_ref());

        // Override site URL if provided via CLI
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve the project root and make content/output paths absolute.
    ///
    /// `feed.path` stays relative; it is joined onto `feed.output` at write time.
    fn finalize(&mut self) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let root = normalize_path(&root);

        self.feed.content = normalize_path(&root.join(&self.feed.content));
        self.feed.output = normalize_path(&root.join(&self.feed.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.feed.validate(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a ready-to-use config rooted at `root` (paths already absolute).
#[cfg(test)]
pub fn test_site_config(root: &Path) -> SiteConfig {
    let mut config = test_parse_config("url = \"https://example.com\"");
    config.site.title = "Coder Spirit".into();
    config.site.description = "Geeky Computer Science stuff.".into();
    config.config_path = root.join("sitefeed.toml");
    config.root = root.to_path_buf();
    config.feed.content = root.join("src/pages");
    config.feed.output = root.join("dist");
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\ntitle = \"My Blog\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert_eq!(config.site.language, "en-us");
        assert!(config.feed.minify);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\nauthor = \"nobody\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
        assert!(ignored.iter().any(|f| f.contains("author")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\ndescription = \"Test\"\n[feed]\npattern = \"*.md\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_channel_options() {
        let mut config = test_parse_config("url = \"https://example.com\"\nstylesheet = \"\"");
        config.feed.trailing_slash = TrailingSlash::Never;

        let options = config.channel_options();
        assert_eq!(options.title, "Test");
        assert_eq!(options.site.as_deref(), Some("https://example.com"));
        assert_eq!(options.language.as_deref(), Some("en-us"));
        assert!(options.custom_data.is_none());
        assert!(options.stylesheet.is_none());
        assert_eq!(options.trailing_slash, TrailingSlash::Never);
    }

    #[test]
    fn test_apply_build_args() {
        let mut config = test_parse_config("url = \"https://example.com\"");
        let args = BuildArgs {
            output: Some("public".into()),
            content: None,
            minify: Some(false),
            drafts: Some(true),
            site_url: Some("https://blog.example.org".into()),
            verbose: false,
        };
        config.apply_build_args(&args);

        assert_eq!(config.feed.output, PathBuf::from("public"));
        assert_eq!(config.feed.content, PathBuf::from("src/pages"));
        assert!(!config.feed.minify);
        assert!(config.feed.drafts);
        assert_eq!(config.site.url.as_deref(), Some("https://blog.example.org"));
    }

    #[test]
    fn test_finalize_resolves_against_config_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = test_parse_config("");
        config.config_path = dir.path().join("sitefeed.toml");
        config.finalize();

        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.feed.content, root.join("src/pages"));
        assert_eq!(config.feed.output, root.join("dist"));
        assert_eq!(
            config.root_relative(config.feed.output_file()),
            PathBuf::from("dist/feed.xml")
        );
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let config = SiteConfig {
            feed: FeedConfig {
                pattern: "{unclosed".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        // empty title, missing url, bad pattern
        assert_eq!(diag.errors().len(), 3);
    }
}
