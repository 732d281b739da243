use serde::{Deserialize, Serialize};

use crate::api::ApiMode;
use crate::error::{NumlabError, NumlabResult};

/// Primary environment variable holding the solver base URL.
pub const API_URL_ENV: &str = "NUMLAB_API_URL";
/// Fallback variable name kept for deployments that already export it.
pub const API_URL_FALLBACK_ENV: &str = "API_URL";
/// Selects `legacy` or `extended` client mode.
pub const MODE_ENV: &str = "NUMLAB_MODE";

/// Process-wide client configuration, read once at startup.
///
/// Serializable so tools can persist it next to their own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    api_url: String,
    #[serde(default)]
    pub mode: ApiMode,
}

impl ClientConfig {
    /// Validates `api_url` and normalizes it to end with `/`.
    pub fn new(api_url: impl AsRef<str>) -> NumlabResult<Self> {
        Ok(Self {
            api_url: normalize_base_url(api_url.as_ref())?,
            mode: ApiMode::default(),
        })
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ApiMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn from_env() -> NumlabResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (environment, dotenv
    /// map, test fixture).
    pub fn from_lookup<F>(lookup: F) -> NumlabResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_ENV)
            .or_else(|| lookup(API_URL_FALLBACK_ENV))
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                NumlabError::Config(format!(
                    "set `{API_URL_ENV}` (or `{API_URL_FALLBACK_ENV}`) to the solver base url"
                ))
            })?;

        let mode = match lookup(MODE_ENV) {
            Some(raw) => raw.parse()?,
            None => ApiMode::default(),
        };

        Ok(Self::new(api_url)?.with_mode(mode))
    }

    pub fn from_json_str(input: &str) -> NumlabResult<Self> {
        let raw: Self = serde_json::from_str(input)
            .map_err(|e| NumlabError::Config(format!("failed to parse client config json: {e}")))?;
        Ok(Self::new(&raw.api_url)?.with_mode(raw.mode))
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `base + resource`, the exact URL a request for `resource` goes to.
    #[must_use]
    pub fn endpoint(&self, resource: &str) -> String {
        format!("{}{resource}", self.api_url)
    }
}

fn normalize_base_url(raw: &str) -> NumlabResult<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| NumlabError::Config(format!("invalid api url `{trimmed}`: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(NumlabError::Config(format!(
            "api url must use http or https, got `{}`",
            url.scheme()
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(NumlabError::Config(
            "api url must not carry a query or fragment".to_owned(),
        ));
    }

    let mut normalized = url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}
