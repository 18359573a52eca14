//! The sitemap session: accumulates entries and writes segmented sitemap files.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::Dispatch;

use crate::config::SitemapOptions;
use crate::entry::{ChangeFreq, Entry};
use crate::errors::{Result, SitemapError};
use crate::logging::LOG_TARGET;
use crate::segment::{Segment, segment};
use crate::xml::serialize;

/// A file produced by [`Sitemap::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSegment {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: usize,
}

/// Accumulates validated entries and generates one or more sitemap files from them.
///
/// Entries keep their insertion order, which decides the segment each one lands in.
/// Generation never modifies the store, so it can be repeated.
///
/// ```no_run
/// use core_smap::{ChangeFreq, Sitemap, SitemapOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut sitemap = Sitemap::new(SitemapOptions::default());
/// sitemap.add_entry("https://example.com/", ChangeFreq::Daily, None, 1.0)?;
/// sitemap.add_entry("https://example.com/about", "monthly", None, None)?;
/// let written = sitemap.generate("public/sitemap.xml")?;
/// println!("wrote {} file(s)", written.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Sitemap {
    entries: Vec<Entry>,
    options: SitemapOptions,
    dispatch: Option<Dispatch>,
}

impl Sitemap {
    /// Logs through the global tracing subscriber.
    pub fn new(options: SitemapOptions) -> Self {
        Self {
            entries: Vec::new(),
            options,
            dispatch: None,
        }
    }

    /// Logs every line this session emits through `dispatch` instead of the global subscriber.
    pub fn with_dispatch(options: SitemapOptions, dispatch: Dispatch) -> Self {
        Self {
            entries: Vec::new(),
            options,
            dispatch: Some(dispatch),
        }
    }

    pub fn options(&self) -> &SitemapOptions {
        &self.options
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    /// Validates, escapes and appends a new entry.
    ///
    /// # Errors
    ///
    /// - [`SitemapError::InvalidPriority`] if the priority is outside [0.0, 1.0]
    /// - [`SitemapError::InvalidLocation`] if the escaped location does not parse as a URL
    ///
    /// The store is unchanged on error.
    pub fn add_entry<F, D, P>(&mut self, location: &str, change_frequency: F, last_modified: D, priority: P) -> Result<()>
    where
        F: AsRef<str>,
        D: Into<Option<NaiveDate>>,
        P: Into<Option<f64>>,
    {
        let format = self.options.lastmod_format;
        let result = Entry::new(
            location,
            change_frequency.as_ref(),
            last_modified.into(),
            priority.into(),
            format,
        );

        match result {
            Ok(entry) => {
                self.entries.push(entry);
                Ok(())
            }
            Err(error) => {
                self.in_scope(|| tracing::warn!(target: LOG_TARGET, "Rejected entry '{}': {}", location, error));
                Err(error)
            }
        }
    }

    /// Adds `count` placeholder entries (`http://testing.loc/page{N}.html`, daily, today, 0.5).
    /// Returns how many were added.
    pub fn fill_with_test_entries(&mut self, count: usize) -> usize {
        let today = Utc::now().date_naive();
        (0..count)
            .filter(|i| {
                self.add_entry(&format!("http://testing.loc/page{i}.html"), ChangeFreq::Daily, today, 0.5)
                    .is_ok()
            })
            .count()
    }

    /// Writes every stored entry to the debug log, one line each.
    pub fn log_entries(&self) {
        self.in_scope(|| {
            for (i, entry) in self.entries.iter().enumerate() {
                tracing::debug!(target: LOG_TARGET, "[{:>3}] {:?}", i, entry);
            }
        })
    }

    /// Splits the store into segments named after `base_name`, using this session's limits and policy.
    pub fn segments(&self, base_name: &str) -> Vec<Segment<'_>> {
        self.in_scope(|| {
            segment(
                base_name,
                &self.entries,
                &self.options.limits,
                self.options.boundary_policy,
            )
        })
    }

    /// Generates sitemap files from the stored entries.
    ///
    /// `path` names the first file; later segments get a numeric suffix on the file stem:
    /// `out/sitemap.xml`, `out/sitemap1.xml`, `out/sitemap2.xml`, ... Files are written in
    /// segment order.
    ///
    /// # Errors
    ///
    /// - [`SitemapError::EmptyStore`] if no entry was added; nothing is written
    /// - [`SitemapError::InvalidOutputPath`] if `path` has no file name
    /// - [`SitemapError::Io`] if a file cannot be created or written; generation stops
    ///   there and files already written are left in place
    pub fn generate(&self, path: impl AsRef<Path>) -> Result<Vec<WrittenSegment>> {
        self.in_scope(|| self.generate_files(path.as_ref()))
    }

    fn generate_files(&self, path: &Path) -> Result<Vec<WrittenSegment>> {
        if self.entries.is_empty() {
            tracing::error!(target: LOG_TARGET, "{}", SitemapError::EmptyStore);
            return Err(SitemapError::EmptyStore);
        }

        let (dir, base_name, extension) = split_file_path(path)?;
        if self.options.debug {
            tracing::debug!(
                target: LOG_TARGET,
                "DIR: '{}' FILENAME: '{}' EXT: '{}'",
                dir.display(),
                base_name,
                extension
            );
        }

        let segments = segment(
            &base_name,
            &self.entries,
            &self.options.limits,
            self.options.boundary_policy,
        );

        let mut written = Vec::with_capacity(segments.len());
        for segment in &segments {
            let target = dir.join(format!("{}{}", segment.name, extension));
            if self.options.debug {
                tracing::debug!(
                    target: LOG_TARGET,
                    "SEGMENT {}: '{}' -> '{}' ({} entries)",
                    segment.index,
                    segment.name,
                    target.display(),
                    segment.entries.len()
                );
            }

            let xml = serialize(segment.entries.iter().copied())?;
            if self.options.debug {
                tracing::trace!(target: LOG_TARGET, "OUTXML: {}", String::from_utf8_lossy(&xml));
            }

            if let Err(error) = write_file(&target, &xml) {
                tracing::error!(target: LOG_TARGET, "{}", error);
                return Err(error);
            }

            if self.options.debug {
                tracing::debug!(target: LOG_TARGET, "[{}] Created sitemap of {} bytes", target.display(), xml.len());
            } else {
                tracing::info!(target: LOG_TARGET, "Created sitemap {}", target.display());
            }

            written.push(WrittenSegment {
                path: target,
                entries: segment.entries.len(),
                bytes: xml.len(),
            });
        }

        Ok(written)
    }
}

/// The file is closed when it goes out of scope, on success and on error.
fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let io_error = |source: std::io::Error| SitemapError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_error)?;
    file.write_all(contents).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    Ok(())
}

/// Splits an output path into its directory, file stem and extension (with the leading dot).
///
/// ```
/// # use core_smap::split_file_path;
/// # use std::path::{Path, PathBuf};
/// let (dir, stem, ext) = split_file_path(Path::new("out/sitemap.xml")).unwrap();
/// assert_eq!(dir, PathBuf::from("out"));
/// assert_eq!(stem, "sitemap");
/// assert_eq!(ext, ".xml");
/// ```
pub fn split_file_path(path: &Path) -> Result<(PathBuf, String, String)> {
    let stem = path
        .file_stem()
        .ok_or_else(|| SitemapError::InvalidOutputPath(path.to_path_buf()))?;

    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    Ok((dir, stem.to_string_lossy().into_owned(), extension))
}
