//! Loading entries from JSON lines.

use std::io::BufRead;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::logging::LOG_TARGET;
use crate::sitemap::Sitemap;

/// One input line: `{"loc": "...", "changefreq": "daily", "lastmod": "2024-01-31", "priority": 0.5}`.
/// Only `loc` is required.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EntryRecord {
    pub loc: String,
    #[serde(default)]
    pub changefreq: String,
    #[serde(default)]
    pub lastmod: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<f64>,
}

/// Outcome of [`load_json_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub added: usize,
    /// 1-based line numbers that were not added, with the reason.
    pub skipped: Vec<(usize, String)>,
}

/// Adds one entry per non-blank line of `reader` to `sitemap`.
///
/// Lines that are not valid JSON records, or that the sitemap rejects, are skipped and
/// reported; they never abort the load. Reading errors do. Each skipped line is logged
/// once, through the sitemap's dispatcher.
pub fn load_json_lines<R: BufRead>(sitemap: &mut Sitemap, reader: R) -> std::io::Result<LoadReport> {
    let mut report = LoadReport::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<EntryRecord>(&line) {
            Ok(record) => record,
            Err(error) => {
                let reason = error.to_string();
                sitemap.in_scope(|| tracing::warn!(target: LOG_TARGET, "Skipping line {}: {}", line_number, reason));
                report.skipped.push((line_number, reason));
                continue;
            }
        };

        // add_entry logs its own rejections.
        match sitemap.add_entry(&record.loc, &record.changefreq, record.lastmod, record.priority) {
            Ok(()) => report.added += 1,
            Err(error) => report.skipped.push((line_number, error.to_string())),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SitemapOptions;
    use crate::entry::LastmodFormat;

    #[test]
    fn test_load_json_lines() {
        let input = r#"{"loc": "http://example.com/a", "changefreq": "daily", "lastmod": "2024-01-31", "priority": 0.5}
{"loc": "http://example.com/b"}

not json
{"loc": "http://example.com/c", "priority": 2.0}
{"loc": "relative/path"}
{"loc": "http://example.com/d", "priority": 0.0}
"#;
        let options = SitemapOptions::builder().lastmod_format(LastmodFormat::YearMonthDay).build();
        let mut sitemap = Sitemap::new(options);
        let report = load_json_lines(&mut sitemap, input.as_bytes()).unwrap();

        assert_eq!(report.added, 3);
        assert_eq!(
            report.skipped.iter().map(|(line, _)| *line).collect::<Vec<_>>(),
            vec![4, 5, 6]
        );
        assert!(report.skipped[1].1.contains("priority"));

        let entries = sitemap.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].last_modified(), "2024-01-31");
        assert_eq!(entries[0].change_frequency(), "daily");
        assert_eq!(entries[1].location(), "http://example.com/b");
        assert_eq!(entries[1].priority(), None);
        assert_eq!(entries[2].priority(), Some(0.0));
    }
}
