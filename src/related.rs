use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use scraper::{Html, Selector};
use tracing::{debug, warn};

pub const MAX_RELATED_SEARCHES: usize = 10;

/// Looks up search phrases related to a query by scraping a search results page.
#[derive(Debug, Clone)]
pub struct RelatedSearchClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl RelatedSearchClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP client setup failed, using defaults without timeout");
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Never fails: any network or parse error is logged and yields no suggestions.
    pub async fn fetch(&self, query: &str) -> Vec<String> {
        match self.try_fetch(query).await {
            Ok(suggestions) => {
                debug!(query, count = suggestions.len(), "related searches fetched");
                suggestions
            }
            Err(e) => {
                warn!(query, error = %format!("{:#}", e), "related search lookup failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<String>> {
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", self.base_url))?;
        let body = res.text().await.context("Failed to read search page body")?;
        parse_related_searches(&body)
    }
}

/// Paragraph texts longer than two words, at most [`MAX_RELATED_SEARCHES`] of them.
pub fn parse_related_searches(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let paragraph_selector =
        Selector::parse("p").map_err(|e| anyhow!("Invalid paragraph selector: {e}"))?;

    Ok(document
        .select(&paragraph_selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| text.split_whitespace().count() > 2)
        .take(MAX_RELATED_SEARCHES)
        .collect())
}
