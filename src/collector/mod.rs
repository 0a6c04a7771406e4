//! Feed item collection.
//!
//! Walks the content directory, keeps the files matching the configured
//! glob, and reads their frontmatter:
//!
//! ```text
//! src/pages/blog/post-1.mdx ─► Glob::is_match ─► frontmatter ─► Document { slug: "/blog/post-1" }
//! ```
//!
//! Every call to [`Collector::documents`] re-scans the filesystem. Files are
//! visited in sorted order, so discovery order is stable between runs.

pub mod frontmatter;
mod glob;

pub use frontmatter::Frontmatter;
pub use glob::Glob;

use crate::{debug, feed::FeedError, utils::path::to_slash};
use jwalk::WalkDir;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::{Path, PathBuf};

/// Characters escaped inside a link path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A discovered content document with usable frontmatter.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file.
    pub path: PathBuf,
    /// Link path relative to the site, e.g. `/blog/post-1`.
    pub slug: String,
    pub frontmatter: Frontmatter,
}

impl Document {
    /// Read and parse a document from disk.
    pub fn load(path: &Path, relative: &Path) -> Result<Self, FeedError> {
        let source =
            std::fs::read_to_string(path).map_err(|e| FeedError::Io(path.to_path_buf(), e))?;
        Self::from_source(path, relative, &source)
    }

    /// Build a document from its source text.
    ///
    /// Fails when the frontmatter is missing, does not parse, or lacks a
    /// title or publish date.
    pub fn from_source(path: &Path, relative: &Path, source: &str) -> Result<Self, FeedError> {
        let frontmatter = match frontmatter::extract(source) {
            Ok(Some((frontmatter, _body))) => frontmatter,
            Ok(None) => return Err(FeedError::item(path, "no frontmatter")),
            Err(reason) => return Err(FeedError::item(path, reason)),
        };

        let missing: Vec<&str> = [
            ("title", &frontmatter.title),
            ("pubDate", &frontmatter.pub_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(FeedError::item(
                path,
                format!("missing required frontmatter: {}", missing.join(", ")),
            ));
        }

        let slug = match frontmatter.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slug_from_path(relative),
        };

        Ok(Self {
            path: path.to_path_buf(),
            slug,
            frontmatter,
        })
    }

    pub fn title(&self) -> &str {
        self.frontmatter.title.as_deref().unwrap_or_default()
    }

    pub fn is_draft(&self) -> bool {
        self.frontmatter.draft
    }
}

/// Derive a link path from a file path relative to the content root.
///
/// - `blog/post-1.mdx` -> `/blog/post-1`
/// - `blog/index.mdx` -> `/blog`
/// - `index.md` -> `/`
/// - `blog/hello world.md` -> `/blog/hello%20world`
pub fn slug_from_path(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let stem = to_slash(&stem);

    let mut segments: Vec<&str> = stem.split('/').filter(|s| !s.is_empty()).collect();
    if segments.last() == Some(&"index") {
        segments.pop();
    }

    let encoded: Vec<String> = segments
        .iter()
        .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
        .collect();

    format!("/{}", encoded.join("/"))
}

/// Discovers documents under `root` whose relative path matches `glob`.
#[derive(Debug, Clone)]
pub struct Collector {
    root: PathBuf,
    glob: Glob,
}

impl Collector {
    pub fn new(root: impl Into<PathBuf>, glob: Glob) -> Self {
        Self {
            root: root.into(),
            glob,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn glob(&self) -> &Glob {
        &self.glob
    }

    /// Lazily yield one result per matching file, in sorted path order.
    ///
    /// Hidden files and directories are skipped. A file that fails to
    /// load, or a directory that cannot be read, produces an `Err` for that
    /// entry only.
    pub fn documents(&self) -> impl Iterator<Item = Result<Document, FeedError>> + '_ {
        WalkDir::new(&self.root)
            .sort(true)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    let path = entry.path();
                    let relative = path.strip_prefix(&self.root).ok()?.to_path_buf();
                    if self.glob.is_match(&to_slash(&relative)) {
                        debug!("collect"; "matched {}", relative.display());
                        Some(Ok((path, relative)))
                    } else {
                        None
                    }
                }
                Ok(_) => None,
                Err(e) => Some(Err(walk_error(&self.root, e))),
            })
            .map(|found| found.and_then(|(path, relative)| Document::load(&path, &relative)))
    }
}

/// A walk failure, attributed to the entry that could not be read.
fn walk_error(root: &Path, err: jwalk::Error) -> FeedError {
    let path = err.path().unwrap_or(root).to_path_buf();
    FeedError::Io(path, err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Non-hidden temp dir, so the walk root itself is never skipped.
    fn tempdir() -> TempDir {
        tempfile::Builder::new().prefix("sitefeed-").tempdir().unwrap()
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\npubDate: {date}\n---\n\nbody\n")
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path(Path::new("blog/post-1.mdx")), "/blog/post-1");
        assert_eq!(slug_from_path(Path::new("blog/2024/a.b.md")), "/blog/2024/a.b");
        assert_eq!(slug_from_path(Path::new("blog/index.mdx")), "/blog");
        assert_eq!(slug_from_path(Path::new("index.md")), "/");
        assert_eq!(
            slug_from_path(Path::new("blog/hello world.md")),
            "/blog/hello%20world"
        );
        assert_eq!(slug_from_path(Path::new("blog/café.md")), "/blog/caf%C3%A9");
    }

    #[test]
    fn test_document_from_source() {
        let doc = Document::from_source(
            Path::new("/site/src/pages/blog/post-1.mdx"),
            Path::new("blog/post-1.mdx"),
            &post("Post One", "2024-01-01"),
        )
        .unwrap();

        assert_eq!(doc.slug, "/blog/post-1");
        assert_eq!(doc.title(), "Post One");
        assert!(!doc.is_draft());
    }

    #[test]
    fn test_document_slug_override() {
        let source = "---\ntitle: Moved\ndate: 2024-01-01\nslug: /archive/moved/\n---\n";
        let doc = Document::from_source(Path::new("a.md"), Path::new("a.md"), source).unwrap();
        assert_eq!(doc.slug, "/archive/moved/");
    }

    #[test]
    fn test_document_missing_fields() {
        let source = "---\ndescription: nothing else\n---\n";
        let err = Document::from_source(Path::new("a.md"), Path::new("a.md"), source).unwrap_err();
        let FeedError::ItemExtraction { path, reason } = err else {
            panic!("expected item error");
        };
        assert_eq!(path, PathBuf::from("a.md"));
        assert!(reason.contains("title"));
        assert!(reason.contains("pubDate"));

        let source = "---\ntitle: \"  \"\npubDate: 2024-01-01\n---\n";
        let err = Document::from_source(Path::new("a.md"), Path::new("a.md"), source).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_document_without_frontmatter() {
        let err =
            Document::from_source(Path::new("a.md"), Path::new("a.md"), "# hello").unwrap_err();
        assert!(err.to_string().contains("no frontmatter"));
    }

    #[test]
    fn test_collector_matches_and_sorts() {
        let dir = tempdir();
        let root = dir.path();
        write(root, "blog/b.mdx", &post("B", "2024-01-02"));
        write(root, "blog/a.mdx", &post("A", "2024-01-01"));
        write(root, "blog/2023/c.mdx", &post("C", "2023-05-01"));
        write(root, "blog/notes.md", &post("Not matched", "2024-01-01"));
        write(root, "about.mdx", &post("About", "2024-01-01"));
        write(root, "blog/.hidden.mdx", &post("Hidden", "2024-01-01"));

        let collector = Collector::new(root, Glob::new("blog/**/*.mdx").unwrap());
        let slugs: Vec<String> = collector
            .documents()
            .map(|doc| doc.unwrap().slug)
            .collect();

        assert_eq!(slugs, vec!["/blog/2023/c", "/blog/a", "/blog/b"]);
    }

    #[test]
    fn test_collector_is_restartable() {
        let dir = tempdir();
        write(dir.path(), "blog/a.mdx", &post("A", "2024-01-01"));

        let collector = Collector::new(dir.path(), Glob::new("blog/*.mdx").unwrap());
        assert_eq!(collector.documents().count(), 1);

        write(dir.path(), "blog/b.mdx", &post("B", "2024-01-02"));
        assert_eq!(collector.documents().count(), 2);
    }

    #[test]
    fn test_unreadable_entry_is_reported() {
        let dir = tempdir();
        let missing = dir.path().join("gone");

        let collector = Collector::new(&missing, Glob::new("**/*.mdx").unwrap());
        let results: Vec<_> = collector.documents().collect();

        assert_eq!(results.len(), 1);
        let Err(err) = &results[0] else {
            panic!("expected walk error");
        };
        assert!(err.is_item_error());
        assert!(matches!(err, FeedError::Io(path, _) if *path == missing));
    }

    #[test]
    fn test_collector_reports_bad_documents() {
        let dir = tempdir();
        write(dir.path(), "blog/good.mdx", &post("Good", "2024-01-01"));
        write(dir.path(), "blog/no-title.mdx", "---\npubDate: 2024-01-01\n---\n");

        let collector = Collector::new(dir.path(), Glob::new("blog/*.mdx").unwrap());
        let results: Vec<_> = collector.documents().collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(FeedError::ItemExtraction { .. })
        ));
    }
}
