use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use tracing::debug;

use crate::models::{Catalog, WriteOutcome};

pub struct ActivitiesClient {
    client: Client,
    base_url: String,
}

impl ActivitiesClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Fetch the full activity catalog.
    pub async fn list(&self) -> Result<Catalog> {
        let url = format!("{}/activities", self.base_url);

        let resp = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .context("Failed to fetch activities")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("Failed to read activities response")?;
        debug!("Activities response (status {}): {}", status, text);

        let catalog: Catalog = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse activities (status {status}): {text}"))?;

        debug!("Fetched {} activities", catalog.len());
        Ok(catalog)
    }

    /// Sign `email` up for `activity`.
    pub async fn signup(&self, activity: &str, email: &str) -> Result<WriteOutcome> {
        self.write(Method::POST, activity, "signup", email)
            .await
            .context("Failed to send signup request")
    }

    /// Remove `email` from `activity`'s roster.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<WriteOutcome> {
        self.write(Method::DELETE, activity, "unregister", email)
            .await
            .context("Failed to send unregister request")
    }

    /// Shared write path: both endpoints take the activity name in the path
    /// and the email as a query parameter, both percent-encoded, and answer
    /// with `{message}` on 2xx or an optional `{detail}` otherwise.
    async fn write(
        &self,
        method: Method,
        activity: &str,
        action: &str,
        email: &str,
    ) -> Result<WriteOutcome> {
        let url = format!(
            "{}/activities/{}/{}?email={}",
            self.base_url,
            urlencoding::encode(activity),
            action,
            urlencoding::encode(email),
        );

        let resp = self
            .client
            .request(method, &url)
            .headers(self.default_headers())
            .send()
            .await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .with_context(|| format!("Failed to read {action} response"))?;
        debug!("{} response (status {}): {}", action, status, text);

        if status.is_success() {
            let body: serde_json::Value = serde_json::from_str(&text).with_context(|| {
                format!("Failed to parse {action} response (status {status}): {text}")
            })?;
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            Ok(WriteOutcome::Accepted { message })
        } else {
            // Error bodies are best-effort JSON; a missing or malformed
            // `detail` still counts as an application-level rejection.
            let detail = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(|d| d.as_str())
                        .map(|d| d.to_string())
                });
            Ok(WriteOutcome::Rejected { detail })
        }
    }
}
