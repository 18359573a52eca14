//! Configuration options for sitemap generation.

use common_smap::{EnvNumberError, env_usize};

use crate::entry::LastmodFormat;

/// Most `<url>` entries a single sitemap file may hold.
pub const MAX_ENTRIES_PER_SEGMENT: usize = 50_000;

/// Most bytes (50 MB) of estimated serialized entries a single sitemap file may hold.
pub const MAX_BYTES_PER_SEGMENT: usize = 52_428_800;

/// Environment variable overriding [`MAX_ENTRIES_PER_SEGMENT`].
pub const ENV_MAX_URLS: &str = "SITEMAP_MAX_URLS";

/// Environment variable overriding [`MAX_BYTES_PER_SEGMENT`].
pub const ENV_MAX_BYTES: &str = "SITEMAP_MAX_BYTES";

/// Per-file bounds used when splitting entries into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLimits {
    pub max_entries: usize,
    pub max_bytes: usize,
}

impl Default for SegmentLimits {
    fn default() -> Self {
        Self {
            max_entries: MAX_ENTRIES_PER_SEGMENT,
            max_bytes: MAX_BYTES_PER_SEGMENT,
        }
    }
}

impl SegmentLimits {
    /// Protocol limits, overridden by `SITEMAP_MAX_URLS` and `SITEMAP_MAX_BYTES` when set.
    pub fn from_env() -> Result<Self, EnvNumberError> {
        Ok(Self {
            max_entries: env_usize(ENV_MAX_URLS, MAX_ENTRIES_PER_SEGMENT)?,
            max_bytes: env_usize(ENV_MAX_BYTES, MAX_BYTES_PER_SEGMENT)?,
        })
    }
}

/// What happens to the entry whose arrival crosses a segment limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// The crossing entry becomes the first entry of the next segment.
    #[default]
    Carry,
    /// The crossing entry is left out of every segment. Matches output of earlier releases.
    Drop,
}

/// Configuration options for a sitemap session.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptions {
    /// Log every segmentation and serialization decision
    pub debug: bool,
    /// Per-file entry count and size bounds
    pub limits: SegmentLimits,
    /// How `<lastmod>` dates are rendered
    pub lastmod_format: LastmodFormat,
    /// Placement of the entry that crosses a limit
    pub boundary_policy: BoundaryPolicy,
}

impl SitemapOptions {
    /// Creates a new builder for SitemapOptions.
    pub fn builder() -> SitemapOptionsBuilder {
        SitemapOptionsBuilder::default()
    }
}

/// Builder for SitemapOptions.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptionsBuilder {
    debug: bool,
    max_entries: Option<usize>,
    max_bytes: Option<usize>,
    lastmod_format: Option<LastmodFormat>,
    boundary_policy: Option<BoundaryPolicy>,
}

impl SitemapOptionsBuilder {
    /// Enables debug diagnostics.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets both segment limits at once.
    pub fn limits(mut self, limits: SegmentLimits) -> Self {
        self.max_entries = Some(limits.max_entries);
        self.max_bytes = Some(limits.max_bytes);
        self
    }

    /// Sets the maximum number of entries per segment.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Sets the maximum estimated byte size per segment.
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Sets how `<lastmod>` dates are rendered.
    pub fn lastmod_format(mut self, format: LastmodFormat) -> Self {
        self.lastmod_format = Some(format);
        self
    }

    /// Sets the placement of limit-crossing entries.
    pub fn boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = Some(policy);
        self
    }

    /// Builds the SitemapOptions.
    ///
    /// Zero limits are raised to 1.
    pub fn build(self) -> SitemapOptions {
        SitemapOptions {
            debug: self.debug,
            limits: SegmentLimits {
                max_entries: self.max_entries.unwrap_or(MAX_ENTRIES_PER_SEGMENT).max(1),
                max_bytes: self.max_bytes.unwrap_or(MAX_BYTES_PER_SEGMENT).max(1),
            },
            lastmod_format: self.lastmod_format.unwrap_or_default(),
            boundary_policy: self.boundary_policy.unwrap_or_default(),
        }
    }
}
