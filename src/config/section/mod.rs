//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitefeed.toml`:
//!
//! | Module | TOML Section | Purpose                             |
//! |--------|--------------|-------------------------------------|
//! | `site` | `[site]`     | Channel metadata (title, url, ...)  |
//! | `feed` | `[feed]`     | Content discovery and feed output   |

mod feed;
mod site;

pub use feed::{FeedConfig, TrailingSlash};
pub use site::SiteInfoConfig;
