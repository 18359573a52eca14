//! Sitemap entries: validation, entity escaping and lastmod rendering.

use chrono::NaiveDate;
use url::Url;

use crate::errors::{Result, SitemapError};

/// Advisory hint describing how often the page at a location changes.
///
/// These are the tokens defined by the Sitemaps 0.9 protocol. Entries accept any
/// string, so these exist for convenience rather than enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const ALL: [ChangeFreq; 7] = [
        ChangeFreq::Always,
        ChangeFreq::Hourly,
        ChangeFreq::Daily,
        ChangeFreq::Weekly,
        ChangeFreq::Monthly,
        ChangeFreq::Yearly,
        ChangeFreq::Never,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl AsRef<str> for ChangeFreq {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a last-modification date is rendered into `<lastmod>` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastmodFormat {
    /// `YYYY-DD-MM`: day and month swapped relative to the protocol.
    /// Reproduces sitemaps produced by earlier releases of this generator.
    #[default]
    YearDayMonth,
    /// `YYYY-MM-DD`: the W3C date form the protocol documents.
    YearMonthDay,
}

impl LastmodFormat {
    pub const YEAR_DAY_MONTH: &'static str = "%Y-%d-%m";
    pub const YEAR_MONTH_DAY: &'static str = "%Y-%m-%d";

    /// The chrono format string for this mode.
    pub fn pattern(&self) -> &'static str {
        match self {
            LastmodFormat::YearDayMonth => Self::YEAR_DAY_MONTH,
            LastmodFormat::YearMonthDay => Self::YEAR_MONTH_DAY,
        }
    }

    pub fn render(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// Replaces the five reserved XML characters with their named entities.
///
/// Single left-to-right pass: already escaped input is escaped again
/// (`&amp;` becomes `&amp;amp;`).
///
/// # Examples
///
/// ```
/// # use core_smap::escape_location;
/// assert_eq!(escape_location("a&b<c"), "a&amp;b&lt;c");
/// ```
pub fn escape_location(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            '>' => escaped.push_str("&gt;"),
            '<' => escaped.push_str("&lt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One `<url>` record. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    location: String,
    change_frequency: String,
    last_modified: String,
    priority: Option<f64>,
}

impl Entry {
    /// Validates the priority, escapes and parses the location, and renders the date.
    ///
    /// The stored location is the URL parser's normalized form of the escaped input.
    pub fn new(
        location: &str,
        change_frequency: &str,
        last_modified: Option<NaiveDate>,
        priority: Option<f64>,
        lastmod_format: LastmodFormat,
    ) -> Result<Self> {
        if let Some(p) = priority
            && !(0.0..=1.0).contains(&p)
        {
            return Err(SitemapError::InvalidPriority(p));
        }

        let escaped = escape_location(location);
        let url = Url::parse(&escaped).map_err(|source| SitemapError::InvalidLocation {
            location: location.to_string(),
            source,
        })?;

        Ok(Entry {
            location: url.to_string(),
            change_frequency: change_frequency.to_string(),
            last_modified: last_modified.map(|d| lastmod_format.render(d)).unwrap_or_default(),
            priority,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Empty when the caller supplied no change frequency.
    pub fn change_frequency(&self) -> &str {
        &self.change_frequency
    }

    /// Empty when the caller supplied no date.
    pub fn last_modified(&self) -> &str {
        &self.last_modified
    }

    pub fn priority(&self) -> Option<f64> {
        self.priority
    }

    /// Approximate serialized size used for segment size accounting: the character
    /// lengths of every field, with the priority in scientific notation.
    pub fn estimated_size(&self) -> usize {
        self.location.chars().count()
            + self.change_frequency.chars().count()
            + self.last_modified.chars().count()
            + self.priority.map(|p| scientific(p).len()).unwrap_or(0)
    }
}

/// Scientific notation with a signed, at least two digit exponent: `5e-01`, `8.5e-01`, `1e+00`.
pub(crate) fn scientific(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}
