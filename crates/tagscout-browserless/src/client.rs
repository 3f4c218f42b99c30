//! HTTP client for the Browserless REST API.
//!
//! Only two endpoints are used: `POST /content` renders a page and returns
//! its HTML, and `GET /json/version` reports the browser behind the
//! instance. The optional API token is sent as the `token` query parameter,
//! and the headless flag travels as the `launch` query parameter.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tagscout_core::AppConfig;

use crate::error::BrowserlessError;
use crate::retry::retry_with_backoff;

const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// One `/content` render.
#[derive(Debug, Clone, Copy)]
pub struct ContentRequest<'a> {
    pub url: &'a str,
    pub navigation_timeout: Duration,
    /// Have Browserless wait for this selector before snapshotting.
    pub wait_for: Option<(&'a str, Duration)>,
}

impl<'a> ContentRequest<'a> {
    #[must_use]
    pub fn new(url: &'a str, navigation_timeout: Duration) -> Self {
        Self {
            url,
            navigation_timeout,
            wait_for: None,
        }
    }

    #[must_use]
    pub fn wait_for(mut self, selector: &'a str, timeout: Duration) -> Self {
        self.wait_for = Some((selector, timeout));
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentBody<'a> {
    url: &'a str,
    goto_options: GotoOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_for_selector: Option<WaitForSelector<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions {
    timeout: u64,
    wait_until: &'static str,
}

#[derive(Serialize)]
struct WaitForSelector<'a> {
    selector: &'a str,
    timeout: u64,
}

impl<'a> From<&ContentRequest<'a>> for ContentBody<'a> {
    fn from(request: &ContentRequest<'a>) -> Self {
        Self {
            url: request.url,
            goto_options: GotoOptions {
                timeout: millis(request.navigation_timeout),
                wait_until: "domcontentloaded",
            },
            wait_for_selector: request.wait_for.map(|(selector, timeout)| WaitForSelector {
                selector,
                timeout: millis(timeout),
            }),
        }
    }
}

#[derive(Deserialize)]
struct VersionInfo {
    #[serde(rename = "Browser")]
    browser: String,
}

/// Client for a Browserless instance.
///
/// Use [`BrowserlessClient::new`] with an explicit base URL (a wiremock
/// server in tests) or [`BrowserlessClient::from_config`] in the binary.
pub struct BrowserlessClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    headless: bool,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl BrowserlessClient {
    /// # Errors
    ///
    /// Returns [`BrowserlessError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BrowserlessError::InvalidUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, BrowserlessError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tagscout/0.1 (creator-discovery)")
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| BrowserlessError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            token: token.filter(|t| !t.is_empty()).map(str::to_owned),
            headless: true,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// # Errors
    ///
    /// Same as [`BrowserlessClient::new`].
    pub fn from_config(config: &AppConfig, headless: bool) -> Result<Self, BrowserlessError> {
        Ok(Self::new(
            &config.browserless_url,
            config.browserless_token.as_deref(),
            config.http_timeout_secs,
        )?
        .headless(headless))
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Renders `request.url` and returns the page HTML.
    ///
    /// # Errors
    ///
    /// - [`BrowserlessError::Api`] on a non-2xx status (408 when Browserless
    ///   gave up waiting).
    /// - [`BrowserlessError::Http`] on network failure.
    pub async fn content(&self, request: &ContentRequest<'_>) -> Result<String, BrowserlessError> {
        let endpoint = &self.endpoint("content")?;
        let body = &ContentBody::from(request);
        let launch = self.launch_param();
        let launch = launch.as_str();

        tracing::debug!(url = request.url, "requesting rendered page");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .authorised(self.client.post(endpoint.clone()))
                .query(&[("launch", launch)])
                .json(body)
                .send()
                .await?;
            read_text(response).await
        })
        .await
    }

    /// Browser version reported by the instance. Used as a readiness check.
    ///
    /// # Errors
    ///
    /// - [`BrowserlessError::Api`] / [`BrowserlessError::Http`] when the
    ///   instance is not reachable or refuses the request.
    /// - [`BrowserlessError::Deserialize`] when the body is not the expected
    ///   version document.
    pub async fn version(&self) -> Result<String, BrowserlessError> {
        let endpoint = self.endpoint("json/version")?;
        let response = self.authorised(self.client.get(endpoint)).send().await?;
        let body = read_text(response).await?;
        let info: VersionInfo =
            serde_json::from_str(&body).map_err(|e| BrowserlessError::Deserialize {
                context: "json/version".to_owned(),
                source: e,
            })?;
        Ok(info.browser)
    }

    fn endpoint(&self, path: &str) -> Result<Url, BrowserlessError> {
        self.base_url
            .join(path)
            .map_err(|e| BrowserlessError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    fn authorised(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.query(&[("token", token.as_str())]),
            None => builder,
        }
    }

    fn launch_param(&self) -> String {
        serde_json::json!({ "headless": self.headless }).to_string()
    }
}

/// Asserts a 2xx status and returns the body text.
async fn read_text(response: reqwest::Response) -> Result<String, BrowserlessError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BrowserlessError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.text().await?)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
