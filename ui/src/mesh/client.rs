use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::core::config::MeshConfig;
use crate::i18n::Locale;

use super::model::Tour;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("tour id must not be empty")]
    EmptyId,

    #[error("tour `{id}` not found")]
    NotFound { id: String },

    #[error("mesh answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to mesh failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not build request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Thin client over the Mesh REST node endpoint.
#[derive(Debug, Clone)]
pub struct MeshClient {
    http: reqwest::Client,
    config: MeshConfig,
}

impl MeshClient {
    pub fn new(config: MeshConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// `{base}/{project}/nodes/{id}` with the id percent-encoded as one segment.
    pub fn node_url(&self, id: &str) -> Result<Url, MeshError> {
        let mut url = Url::parse(self.config.base_url())?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend([self.config.project(), "nodes", id]);
        Ok(url)
    }

    /// Load one tour in `locale`, with node references expanded so the image
    /// path and attribution come along.
    pub async fn fetch_tour(&self, id: &str, locale: Locale) -> Result<Tour, MeshError> {
        if id.trim().is_empty() {
            return Err(MeshError::EmptyId);
        }

        let url = self.node_url(id)?;
        let mut request = self.http.get(url.clone()).query(&[
            ("lang", locale.as_str()),
            ("expandAll", "true"),
            ("resolveLinks", "short"),
        ]);
        if let Some(token) = self.config.api_token() {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%url, %locale, "fetching tour");
        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(MeshError::NotFound { id: id.to_string() }),
            status if !status.is_success() => Err(MeshError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response.json::<Tour>().await?),
        }
    }
}
