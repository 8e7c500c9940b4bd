use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article-like record extracted from a source, before any cleaning.
/// Never serialized or stored; it only exists between extraction and rewrite.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub raw_title_html: String,
    pub raw_description_html: String,
    pub raw_link: String,
    pub raw_pub_date: Option<String>,
    pub raw_image_url: Option<String>,
    pub raw_category: Option<String>,
}

/// The closed set of crime categories. Classification always lands on one of
/// these; free-text categories from feeds are mapped or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Wanted")]
    Wanted,
    #[serde(rename = "Missing Person")]
    MissingPerson,
    #[serde(rename = "Arrest")]
    Arrest,
    #[serde(rename = "Homicide")]
    Homicide,
    #[serde(rename = "Shooting")]
    Shooting,
    #[serde(rename = "Drug Offense")]
    DrugOffense,
    #[serde(rename = "Theft")]
    Theft,
    #[serde(rename = "Assault")]
    Assault,
    #[serde(rename = "DUI/DWI")]
    DuiDwi,
    #[serde(rename = "Gang Activity")]
    GangActivity,
    #[serde(rename = "Fraud Alert")]
    Fraud,
    #[serde(rename = "Traffic Safety")]
    TrafficSafety,
    #[serde(rename = "Crime News")]
    CrimeNews,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Wanted => "Wanted",
            Category::MissingPerson => "Missing Person",
            Category::Arrest => "Arrest",
            Category::Homicide => "Homicide",
            Category::Shooting => "Shooting",
            Category::DrugOffense => "Drug Offense",
            Category::Theft => "Theft",
            Category::Assault => "Assault",
            Category::DuiDwi => "DUI/DWI",
            Category::GangActivity => "Gang Activity",
            Category::Fraud => "Fraud Alert",
            Category::TrafficSafety => "Traffic Safety",
            Category::CrimeNews => "Crime News",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::CrimeNews
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical output unit. Field names on the wire match the frontend's
/// existing JSON contract (camelCase, ISO-8601 pubDate).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: DateTime<Utc>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    pub rewritten: bool,
}

/// Envelope for the aggregated article list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub success: bool,
    pub articles: Vec<NewsArticle>,
    pub total_articles: usize,
    /// Set when the list comes from a single named source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewsResponse {
    pub fn ok(articles: Vec<NewsArticle>, message: Option<String>) -> Self {
        Self {
            success: true,
            total_articles: articles.len(),
            articles,
            source: None,
            error: None,
            message,
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            articles: Vec::new(),
            total_articles: 0,
            source: None,
            error: Some(error.into()),
            message: None,
            timestamp: Utc::now(),
        }
    }
}

/// Articles from a single source, for the grouped feeds endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedGroup {
    pub source: String,
    pub location: String,
    pub items: Vec<NewsArticle>,
    pub count: usize,
}

/// Envelope for the per-source grouped view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedsResponse {
    pub success: bool,
    pub feeds: Vec<FeedGroup>,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_to_display_name() {
        let json = serde_json::to_string(&Category::DrugOffense).unwrap();
        assert_eq!(json, "\"Drug Offense\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::DrugOffense);
    }

    #[test]
    fn test_article_wire_format_is_camel_case() {
        let article = NewsArticle {
            id: "wral-abc123-1700000000000".to_string(),
            title: "Test".to_string(),
            description: "Desc".to_string(),
            link: "https://example.com/a".to_string(),
            pub_date: Utc::now(),
            category: Category::CrimeNews,
            location: None,
            source: "WRAL News".to_string(),
            image: None,
            original_title: None,
            rewritten: false,
        };
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("pubDate").is_some());
        assert!(json.get("pub_date").is_none());
        // Empty optionals stay off the wire entirely.
        assert!(json.get("location").is_none());
        assert_eq!(json["category"], "Crime News");
    }

    #[test]
    fn test_source_tag_only_serialized_when_set() {
        let resp = NewsResponse::ok(Vec::new(), None);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("source").is_none());

        let tagged = NewsResponse::ok(Vec::new(), None).with_source("WRAL News");
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["source"], "WRAL News");
    }

    #[test]
    fn test_failure_envelope_is_well_formed() {
        let resp = NewsResponse::failure("Failed to fetch crime news");
        assert!(!resp.success);
        assert!(resp.articles.is_empty());
        assert_eq!(resp.total_articles, 0);
        assert!(resp.error.is_some());
    }
}
