use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use cw_core::{NewsArticle, RawItem, TextLimits};
use cw_pipeline::{clean_html, truncate_gracefully, Classifier, Gazetteer};

use crate::id::synthetic_id;
use crate::sources::FeedSource;

lazy_static! {
    static ref ITEM: Regex = Regex::new(r"(?is)<item[^>]*>.*?</item>").unwrap();
    static ref MEDIA_URL: Regex =
        Regex::new(r#"(?i)<media:(?:content|thumbnail)[^>]+url=["']([^"']+)["']"#).unwrap();
    static ref IMG_SRC: Regex = Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).unwrap();
}

/// Pull a named element's text out of an item fragment, CDATA-wrapped form
/// first, then plain. This is deliberately pattern matching rather than XML
/// parsing: real government feeds routinely contain stray unescaped
/// characters that break strict parsers.
fn extract_field(item: &str, field: &str) -> Option<String> {
    let cdata = Regex::new(&format!(
        r"(?is)<{field}[^>]*>\s*<!\[CDATA\[(.*?)\]\]>\s*</{field}>"
    ))
    .ok()?;
    if let Some(caps) = cdata.captures(item) {
        return Some(caps[1].to_string());
    }
    let plain = Regex::new(&format!(r"(?is)<{field}[^>]*>(.*?)</{field}>")).ok()?;
    plain.captures(item).map(|caps| caps[1].to_string())
}

/// Image probing order: namespaced media tag attribute, then an inline
/// `<img>` inside content:encoded or the description body.
fn extract_image(item: &str) -> Option<String> {
    if let Some(caps) = MEDIA_URL.captures(item) {
        return Some(caps[1].to_string());
    }
    let body = extract_field(item, "content:encoded")
        .or_else(|| extract_field(item, "description"))?;
    IMG_SRC.captures(&body).map(|caps| caps[1].to_string())
}

/// Leftover CDATA markers from the plain-text extraction path.
fn strip_cdata(text: &str) -> String {
    text.replace("<![CDATA[", "").replace("]]>", "")
}

fn parse_pub_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    Utc::now()
}

/// Tolerant RSS item parser: extracts a bounded field set per `<item>`,
/// funnels the text through cleaning/classification, and drops items that
/// lack the identity fields (title and link).
#[derive(Debug, Clone, Default)]
pub struct FeedParser {
    classifier: Classifier,
    gazetteer: Gazetteer,
    limits: TextLimits,
}

impl FeedParser {
    pub fn new(classifier: Classifier, gazetteer: Gazetteer, limits: TextLimits) -> Self {
        Self {
            classifier,
            gazetteer,
            limits,
        }
    }

    pub fn parse_feed(&self, xml: &str, source: &FeedSource) -> Vec<NewsArticle> {
        ITEM.find_iter(xml)
            .filter_map(|m| self.parse_item(m.as_str(), source))
            .collect()
    }

    fn parse_item(&self, item: &str, source: &FeedSource) -> Option<NewsArticle> {
        let raw = RawItem {
            // Missing title or link means the item has no usable identity.
            raw_title_html: extract_field(item, "title")?,
            raw_link: extract_field(item, "link")?,
            raw_description_html: extract_field(item, "description").unwrap_or_default(),
            raw_pub_date: extract_field(item, "pubDate"),
            raw_image_url: extract_image(item),
            raw_category: extract_field(item, "category"),
        };
        self.convert(raw, source)
    }

    fn convert(&self, raw: RawItem, source: &FeedSource) -> Option<NewsArticle> {
        let title = clean_html(&strip_cdata(&raw.raw_title_html));
        if title.is_empty() {
            return None;
        }
        let description = truncate_gracefully(
            &clean_html(&strip_cdata(&raw.raw_description_html)),
            self.limits.max_feed_description_len,
        );

        if source.filter_crime && !self.classifier.is_crime_related(&title, &description) {
            return None;
        }

        let combined = format!(
            "{} {} {}",
            raw.raw_category.as_deref().unwrap_or_default(),
            title,
            description
        );
        let category = self.classifier.classify(&combined);
        let location = self
            .gazetteer
            .extract(&combined)
            .unwrap_or_else(|| source.location.to_string());

        Some(NewsArticle {
            id: synthetic_id(source.slug, &title, source.name),
            link: resolve_link(raw.raw_link.trim(), source.base_url),
            pub_date: parse_pub_date(raw.raw_pub_date.as_deref()),
            title,
            description,
            category,
            location: Some(location),
            source: source.name.to_string(),
            image: raw.raw_image_url,
            original_title: None,
            rewritten: false,
        })
    }
}

/// Make a link absolute against the source's base URL when needed.
fn resolve_link(link: &str, base_url: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(link)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => link.to_string(),
    }
}
