//! Backend configuration injected into the views through Dioxus context.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Mesh project that owns the tour content.
pub const DEFAULT_PROJECT: &str = "musetech";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid mesh URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("mesh URL `{0}` must use http or https")]
    UnsupportedScheme(String),

    #[error("project name must not be empty")]
    EmptyProject,
}

/// Where the content backend lives and how to talk to it.
///
/// `base_url` is the Mesh API root (e.g. `https://cms.example/api/v2`); it
/// never ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshConfig {
    base_url: String,
    project: String,
    api_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    mesh_url: String,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    api_token: Option<String>,
}

impl MeshConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.to_string()));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            api_token: None,
        })
    }

    /// Parse the `config.json` shape shared with the rest of the site:
    /// `{"meshUrl": "...", "project": "musetech", "apiToken": null}`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(raw)?;
        let mut config = Self::new(&raw.mesh_url)?;
        if let Some(project) = raw.project {
            config = config.with_project(&project)?;
        }
        config.api_token = raw.api_token.filter(|token| !token.trim().is_empty());
        Ok(config)
    }

    /// Point at another backend, keeping project and token.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::new(base_url)?.base_url,
            ..self
        })
    }

    pub fn with_project(mut self, project: &str) -> Result<Self, ConfigError> {
        let project = project.trim().trim_matches('/');
        if project.is_empty() {
            return Err(ConfigError::EmptyProject);
        }
        self.project = project.to_string();
        Ok(self)
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    /// Websocket endpoint of the Mesh event-bus bridge.
    pub fn eventbus_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        };
        format!("{ws_base}/eventbus/websocket")
    }
}
