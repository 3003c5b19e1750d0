use std::fmt;

/// Spotify Web API connection settings.
///
/// Built from explicit values only. The CLI resolves flags and environment
/// before constructing one.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (no trailing slash).
    pub base_url: String,
    /// OAuth bearer token, forwarded verbatim.
    pub access_token: String,
}

impl ApiConfig {
    /// The public Spotify Web API.
    pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

    /// Build a config from explicit values (useful for tests and CLI flags).
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.into(),
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

// The token never shows up in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
