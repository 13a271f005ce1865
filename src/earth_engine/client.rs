use bytes::Bytes;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::auth::TokenProvider;
use super::expression::{least_cloudy_thumbnail, scene_count, Expression};
use crate::config::{ServiceAccountCredentials, ServiceConfig};
use crate::imagery::{ImageryArchive, SceneQuery};
use crate::{Error, Result};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

#[derive(Debug, Serialize)]
struct ComputeValueRequest<'a> {
    expression: &'a Expression,
}

#[derive(Debug, Deserialize)]
struct ComputeValueResponse {
    result: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThumbnailRequest<'a> {
    expression: &'a Expression,
    file_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Authenticated handle to the Earth Engine REST API.
///
/// Built once at startup and shared read-only by all requests.
#[derive(Debug)]
pub struct EarthEngineClient {
    http: reqwest::Client,
    base_url: String,
    project: String,
    tokens: TokenProvider,
}

impl EarthEngineClient {
    /// Builds the client and obtains a first access token, so that bad
    /// credentials surface before the server starts listening
    pub async fn connect(
        credentials: &ServiceAccountCredentials,
        config: &ServiceConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let tokens = TokenProvider::new(http.clone(), credentials)?;
        tokens.refresh().await?;

        info!(project = %credentials.project_id, "Earth Engine initialized successfully");

        Ok(Self {
            http,
            base_url: config.earth_engine_url.trim_end_matches('/').to_string(),
            project: credentials.project_id.clone(),
            tokens,
        })
    }

    fn project_url(&self, method: &str) -> String {
        format!("{}/v1/projects/{}/{}", self.base_url, self.project, method)
    }

    /// Evaluates `expression` and returns its JSON result
    pub async fn compute_value(&self, expression: &Expression) -> Result<Value> {
        let request = self
            .http
            .post(self.project_url("value:compute"))
            .json(&ComputeValueRequest { expression });

        let response: ComputeValueResponse = self.send(request).await?.json().await?;
        Ok(response.result)
    }

    /// Registers a PNG thumbnail computation and returns its resource name
    pub async fn create_thumbnail(&self, expression: &Expression) -> Result<String> {
        let request = self.http.post(self.project_url("thumbnails")).json(&ThumbnailRequest {
            expression,
            file_format: "PNG",
        });

        let thumbnail: Thumbnail = self.send(request).await?.json().await?;
        Ok(thumbnail.name)
    }

    /// Downloads the rendered pixels of a thumbnail
    pub async fn fetch_pixels(&self, name: &str) -> Result<Bytes> {
        let url = format!("{}/v1/{}:getPixels", self.base_url, name);
        let bytes = self.send(self.http.get(url)).await?.bytes().await?;

        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(Error::Upstream {
                status: StatusCode::OK.as_u16(),
                message: "thumbnail response is not a PNG image".to_string(),
            });
        }
        Ok(bytes)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => match envelope.error.status {
                Some(code) => format!("{} ({})", envelope.error.message, code),
                None => envelope.error.message,
            },
            Err(_) => body,
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Authentication(message)),
            _ => Err(Error::Upstream {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

impl ImageryArchive for EarthEngineClient {
    async fn count_scenes(&self, query: &SceneQuery) -> Result<u64> {
        let result = self.compute_value(&scene_count(query)).await?;
        let count = result
            .as_u64()
            .or_else(|| result.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
            .ok_or_else(|| Error::Upstream {
                status: StatusCode::OK.as_u16(),
                message: format!("unexpected scene count: {}", result),
            })?;

        debug!(collection = query.collection.id, count, "Counted scenes");
        Ok(count)
    }

    async fn render_least_cloudy(&self, query: &SceneQuery, max_dimension: u32) -> Result<Bytes> {
        let name = self
            .create_thumbnail(&least_cloudy_thumbnail(query, max_dimension))
            .await?;

        let preview: String = name.chars().take(50).collect();
        info!("Generated thumbnail (truncated): {}...", preview);

        self.fetch_pixels(&name).await
    }
}
