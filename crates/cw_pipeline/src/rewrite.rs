use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use cw_core::{Error, OutletConfig, Result, RewriteMode, TextLimits};

use crate::clean::clean_html;
use crate::truncate::truncate_with_ratios;

lazy_static! {
    // "By John Doe - " author bylines.
    static ref BYLINE: Regex = Regex::new(r"(?i)^By\s+[^-]+-\s*").unwrap();
    // "Monday, January 5, 2024 - " style datelines.
    static ref DATELINE: Regex =
        Regex::new(r"(?i)^\w+,\s+\w+\s+\d+,?\s+\d{4}\s*[-:]\s*").unwrap();
    // Description datelines also appear with an em dash separator.
    static ref DESC_DATELINE: Regex =
        Regex::new(r"(?i)^\w+,\s+\w+\s+\d+,?\s+\d{4}\s*[-:—]\s*").unwrap();
    // "RALEIGH — " wire-style city prefixes.
    static ref CITY_DASH: Regex = Regex::new(r"(?i)^\w+\s+—\s+").unwrap();
}

/// A cleaned, publishable (title, description) pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rewritten {
    pub title: String,
    pub description: String,
}

/// Result of running the rewrite chain, including provenance.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub title: String,
    pub description: String,
    /// True only when an external strategy produced the text.
    pub rewritten: bool,
}

/// One way of turning a raw (title, description) pair into a publishable one.
/// Strategies are tried in order by [`ArticleRewriter`]; only the local
/// strategy is required to be infallible.
#[async_trait]
pub trait RewriteStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn rewrite(&self, title: &str, description: &str) -> Result<Rewritten>;
}

/// Rule-based rewrite: clean markup, strip branding/bylines/datelines, inject
/// attribution, and truncate. Never fails.
#[derive(Debug, Clone)]
pub struct LocalRewriter {
    outlet: OutletConfig,
    limits: TextLimits,
    brand_prefix: Regex,
    brand_suffix: Regex,
}

impl LocalRewriter {
    pub fn new(outlet: OutletConfig, limits: TextLimits) -> Self {
        let brand = regex::escape(&outlet.site_brand);
        // Patterns are built from config so the compile can't be cached in a
        // static; regex::escape keeps dots in "WRAL.com" literal.
        let brand_prefix = Regex::new(&format!(r"(?i)^{brand}\s*[-:]\s*")).unwrap();
        let brand_suffix = Regex::new(&format!(r"(?i)\s*\|\s*{brand}$")).unwrap();
        Self {
            outlet,
            limits,
            brand_prefix,
            brand_suffix,
        }
    }

    /// Clean a headline: markup out, branding and bylines stripped, bounded
    /// length. Stripping happens before truncation so removed prefixes never
    /// count against the budget.
    pub fn rewrite_title(&self, title: &str) -> String {
        let cleaned = clean_html(title);
        let cleaned = self.brand_prefix.replace(&cleaned, "");
        let cleaned = self.brand_suffix.replace(&cleaned, "");
        let cleaned = BYLINE.replace(&cleaned, "");
        let cleaned = DATELINE.replace(&cleaned, "");
        self.truncate(cleaned.trim(), self.limits.max_title_len)
    }

    /// Clean a description and ensure it opens with source attribution.
    /// Attribution is injected before truncation so the credit sentence is
    /// never cut from the front; only the tail is truncated.
    pub fn rewrite_description(&self, description: &str) -> String {
        let cleaned = clean_html(description);
        let cleaned = BYLINE.replace(&cleaned, "");
        let cleaned = DESC_DATELINE.replace(&cleaned, "");
        let cleaned = CITY_DASH.replace(&cleaned, "");
        let cleaned = cleaned.trim();

        let lower = cleaned.to_lowercase();
        let attributed = if !cleaned.is_empty()
            && !lower.contains("according to")
            && !lower.contains(&self.outlet.marker)
        {
            format!(
                "According to {}, {}",
                self.outlet.attribution_name,
                lowercase_first(cleaned)
            )
        } else {
            cleaned.to_string()
        };

        self.truncate(&attributed, self.limits.max_description_len)
    }

    fn truncate(&self, text: &str, max_len: usize) -> String {
        truncate_with_ratios(
            text,
            max_len,
            self.limits.sentence_min_ratio,
            self.limits.word_min_ratio,
        )
    }
}

#[async_trait]
impl RewriteStrategy for LocalRewriter {
    fn name(&self) -> &str {
        "local"
    }

    async fn rewrite(&self, title: &str, description: &str) -> Result<Rewritten> {
        Ok(Rewritten {
            title: self.rewrite_title(title),
            description: self.rewrite_description(description),
        })
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_lowercase(), chars.as_str()),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct EndpointResponse {
    title: Option<String>,
    description: Option<String>,
}

/// Delegates the rewrite to a custom HTTP endpoint speaking
/// `{title, description}` JSON both ways.
pub struct EndpointRewriter {
    url: String,
    client: reqwest::Client,
}

impl EndpointRewriter {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RewriteStrategy for EndpointRewriter {
    fn name(&self) -> &str {
        "endpoint"
    }

    async fn rewrite(&self, title: &str, description: &str) -> Result<Rewritten> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({
                "title": title,
                "description": description,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Rewrite(format!(
                "rewrite endpoint returned {}",
                response.status()
            )));
        }

        let body: EndpointResponse = response.json().await?;
        // A field the endpoint omits falls back to the input field.
        Ok(Rewritten {
            title: body.title.unwrap_or_else(|| title.to_string()),
            description: body.description.unwrap_or_else(|| description.to_string()),
        })
    }
}

/// Delegates the rewrite to a generative AI messages endpoint. The model
/// responds with free text; the first balanced `{...}` block in it is parsed
/// as the `{title, description}` object.
pub struct GenerativeRewriter {
    api_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GenerativeRewriter {
    const API_VERSION: &'static str = "2023-06-01";
    const MAX_TOKENS: u32 = 1024;

    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            api_url,
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    fn prompt(title: &str, description: &str) -> String {
        format!(
            "Rewrite this crime news article for a North Carolina crime news website.\n\n\
             ORIGINAL TITLE: {title}\n\n\
             ORIGINAL DESCRIPTION: {description}\n\n\
             Instructions:\n\
             - Keep all facts accurate (names, locations, charges, dates)\n\
             - Use professional journalistic tone\n\
             - Make it 200-300 words\n\
             - Add \"According to [source]\" attribution\n\n\
             Return as JSON:\n\
             {{\n  \"title\": \"rewritten headline\",\n  \"description\": \"rewritten article text\"\n}}"
        )
    }
}

#[async_trait]
impl RewriteStrategy for GenerativeRewriter {
    fn name(&self) -> &str {
        "generative"
    }

    async fn rewrite(&self, title: &str, description: &str) -> Result<Rewritten> {
        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", Self::API_VERSION)
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": Self::MAX_TOKENS,
                "messages": [{
                    "role": "user",
                    "content": Self::prompt(title, description),
                }],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Rewrite(format!(
                "generative API returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let text = body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| Error::Rewrite("missing content text in response".to_string()))?;

        let object = extract_json_object(text)
            .ok_or_else(|| Error::Rewrite("no JSON object in model output".to_string()))?;
        let rewritten: Rewritten = serde_json::from_str(object)?;
        Ok(rewritten)
    }
}

/// Find the first balanced `{...}` block in free text, respecting string
/// literals so braces inside quoted values don't unbalance the scan.
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// The rewrite orchestrator: tries the configured external strategy, falls
/// back to the local rule-based rewrite on any failure. A rewrite always
/// succeeds with some output; callers never see an error from this step.
pub struct ArticleRewriter {
    external: Option<Box<dyn RewriteStrategy>>,
    local: LocalRewriter,
}

impl ArticleRewriter {
    pub fn new(mode: &RewriteMode, outlet: OutletConfig, limits: TextLimits) -> Self {
        let external: Option<Box<dyn RewriteStrategy>> = match mode {
            RewriteMode::Local => None,
            RewriteMode::Endpoint { url } => Some(Box::new(EndpointRewriter::new(url.clone()))),
            RewriteMode::Generative {
                api_url,
                api_key,
                model,
            } => Some(Box::new(GenerativeRewriter::new(
                api_url.clone(),
                api_key.clone(),
                model.clone(),
            ))),
        };
        Self {
            external,
            local: LocalRewriter::new(outlet, limits),
        }
    }

    pub fn local_only(outlet: OutletConfig, limits: TextLimits) -> Self {
        Self::new(&RewriteMode::Local, outlet, limits)
    }

    pub fn is_external(&self) -> bool {
        self.external.is_some()
    }

    pub async fn rewrite(&self, title: &str, description: &str) -> RewriteOutcome {
        if let Some(strategy) = &self.external {
            match strategy.rewrite(title, description).await {
                Ok(out) => {
                    return RewriteOutcome {
                        title: out.title,
                        description: out.description,
                        rewritten: true,
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "external rewrite failed, falling back to local"
                    );
                }
            }
        }

        RewriteOutcome {
            title: self.local.rewrite_title(title),
            description: self.local.rewrite_description(description),
            rewritten: false,
        }
    }
}
