//! Sitemaps 0.9 `urlset` serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::entry::Entry;
use crate::errors::Result;

/// Namespace of the `urlset` root element.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Serializes entries into a complete sitemap document.
///
/// Produces:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url>
///     <loc>https://example.com/page</loc>
///     <lastmod>2024-01-01</lastmod>
///     <changefreq>daily</changefreq>
///     <priority>0.5</priority>
///   </url>
/// </urlset>
/// ```
///
/// Entry text was entity-escaped when the entry was created, so it is written
/// as-is. `lastmod` and `changefreq` are omitted when empty, `priority` when unset.
pub fn serialize<'a, I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
    ))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", entry.location())?;
        if !entry.last_modified().is_empty() {
            write_text_element(&mut writer, "lastmod", entry.last_modified())?;
        }
        if !entry.change_frequency().is_empty() {
            write_text_element(&mut writer, "changefreq", entry.change_frequency())?;
        }
        if let Some(priority) = entry.priority() {
            write_text_element(&mut writer, "priority", &priority.to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(writer.into_inner())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LastmodFormat;
    use chrono::NaiveDate;
    use quick_xml::Reader;

    /// Child elements of each `<url>` as (name, raw text) pairs.
    fn parse_urls(xml: &[u8]) -> Vec<Vec<(String, String)>> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut urls = Vec::new();
        let mut current: Vec<(String, String)> = Vec::new();
        let mut element = String::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => element = String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
                Event::Text(text) => current.push((element.clone(), String::from_utf8(text.to_vec()).unwrap())),
                Event::End(e) if e.name().as_ref() == b"url" => urls.push(std::mem::take(&mut current)),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        urls
    }

    fn pairs(fields: &[(String, String)]) -> Vec<(&str, &str)> {
        fields.iter().map(|(n, t)| (n.as_str(), t.as_str())).collect()
    }

    fn entry(location: &str, change_frequency: &str, last_modified: Option<NaiveDate>, priority: Option<f64>) -> Entry {
        Entry::new(location, change_frequency, last_modified, priority, LastmodFormat::YearMonthDay).unwrap()
    }

    #[test]
    fn test_document_header() {
        let entries = vec![entry("http://example.com/a", "daily", None, Some(0.5))];
        let xml = String::from_utf8(serialize(&entries).unwrap()).unwrap();
        assert!(xml.starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"
        ));
        assert!(xml.ends_with("</urlset>"));
        assert!(xml.contains("<loc>http://example.com/a</loc>"));
        assert!(xml.contains("<priority>0.5</priority>"));
    }

    #[test]
    fn test_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let entries = vec![
            entry("http://example.com/a?x=1&y=2", "daily", Some(date), Some(0.8)),
            entry("http://example.com/b", "", None, None),
            entry("http://example.com/c", "never", None, Some(0.0)),
            entry("http://example.com/d", "", Some(date), Some(1.0)),
        ];

        let urls = parse_urls(&serialize(&entries).unwrap());
        assert_eq!(urls.len(), entries.len());

        let loc_values: Vec<&str> = urls.iter().map(|fields| fields[0].1.as_str()).collect();
        let stored: Vec<&str> = entries.iter().map(|e| e.location()).collect();
        assert_eq!(loc_values, stored);
        assert_eq!(loc_values[0], "http://example.com/a?x=1&amp;y=2");

        assert_eq!(
            pairs(&urls[0]),
            vec![
                ("loc", "http://example.com/a?x=1&amp;y=2"),
                ("lastmod", "2023-12-31"),
                ("changefreq", "daily"),
                ("priority", "0.8"),
            ]
        );
        assert_eq!(pairs(&urls[1]), vec![("loc", "http://example.com/b")]);
        assert_eq!(
            pairs(&urls[2]),
            vec![("loc", "http://example.com/c"), ("changefreq", "never"), ("priority", "0")]
        );
        assert_eq!(
            pairs(&urls[3]),
            vec![("loc", "http://example.com/d"), ("lastmod", "2023-12-31"), ("priority", "1")]
        );
    }

    #[test]
    fn test_no_double_escaping() {
        let entries = vec![entry("http://example.com/?q=a&b", "", None, None)];
        let xml = String::from_utf8(serialize(&entries).unwrap()).unwrap();
        assert!(xml.contains("<loc>http://example.com/?q=a&amp;b</loc>"));
        assert!(!xml.contains("&amp;amp;"));
    }

    #[test]
    fn test_empty_urlset() {
        let xml = String::from_utf8(serialize(std::iter::empty()).unwrap()).unwrap();
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(parse_urls(xml.as_bytes()).is_empty());
    }
}
