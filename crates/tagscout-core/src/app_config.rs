#[derive(Clone)]
pub struct AppConfig {
    pub browserless_url: String,
    pub browserless_token: Option<String>,
    pub platform_base_url: String,
    pub log_level: String,
    pub max_requests_per_minute: u32,
    pub min_request_interval_secs: u64,
    pub navigation_timeout_secs: u64,
    pub marker_timeout_secs: u64,
    pub http_timeout_secs: u64,
    /// Whole-run deadline checked between hashtags. `None` disables it.
    pub run_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("browserless_url", &self.browserless_url)
            .field(
                "browserless_token",
                &self.browserless_token.as_ref().map(|_| "[redacted]"),
            )
            .field("platform_base_url", &self.platform_base_url)
            .field("log_level", &self.log_level)
            .field("max_requests_per_minute", &self.max_requests_per_minute)
            .field("min_request_interval_secs", &self.min_request_interval_secs)
            .field("navigation_timeout_secs", &self.navigation_timeout_secs)
            .field("marker_timeout_secs", &self.marker_timeout_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("run_timeout_secs", &self.run_timeout_secs)
            .finish()
    }
}
