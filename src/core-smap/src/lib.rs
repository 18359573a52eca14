//! # Segmented Sitemap Generation
//!
//! Collects URL entries and writes them as Sitemaps 0.9 `urlset` documents, splitting
//! the output across several files when one would exceed the protocol's per-file limits
//! (50,000 URLs or 50 MB).
//!
//! ## Features
//!
//! - Entity-escape and URL-validate every location when it is added
//! - Split entries into ordered segments by count and estimated size
//! - Serialize each segment into a `urlset` document
//! - Write `sitemap.xml`, `sitemap1.xml`, `sitemap2.xml`, ... in segment order
//! - Log through an injected `tracing` dispatcher, or the global one
//!
//! ## Example
//!
//! ```no_run
//! use core_smap::{ChangeFreq, LastmodFormat, Sitemap, SitemapOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = SitemapOptions::builder()
//!         .lastmod_format(LastmodFormat::YearMonthDay)
//!         .build();
//!
//!     let mut sitemap = Sitemap::new(options);
//!     sitemap.add_entry("https://example.com/", ChangeFreq::Daily, None, 1.0)?;
//!     sitemap.add_entry("https://example.com/docs?page=1&lang=en", ChangeFreq::Weekly, None, 0.8)?;
//!
//!     for file in sitemap.generate("public/sitemap.xml")? {
//!         println!("{}: {} entries", file.path.display(), file.entries);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod entry;
mod errors;
pub mod input;
mod logging;
mod segment;
mod sitemap;
pub mod xml;

pub use config::{
    BoundaryPolicy, ENV_MAX_BYTES, ENV_MAX_URLS, MAX_BYTES_PER_SEGMENT, MAX_ENTRIES_PER_SEGMENT, SegmentLimits,
    SitemapOptions, SitemapOptionsBuilder,
};
pub use entry::{ChangeFreq, Entry, LastmodFormat, escape_location};
pub use errors::{Result, SitemapError};
pub use logging::{LOG_TARGET, setup_logging};
pub use segment::{Segment, segment, segment_name};
pub use sitemap::{Sitemap, WrittenSegment, split_file_path};
