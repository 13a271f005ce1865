//! OAuth2 service-account flow (JWT bearer grant)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ServiceAccountCredentials;
use crate::{Error, Result};

pub const EARTH_ENGINE_SCOPES: &str =
    "https://www.googleapis.com/auth/earthengine https://www.googleapis.com/auth/cloud-platform";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are replaced before use
const REFRESH_MARGIN_SECS: i64 = 60;

/// Claims of the signed assertion exchanged for an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Clone)]
pub struct AccessToken {
    pub secret: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Mints and caches access tokens for one service account
pub struct TokenProvider {
    http: reqwest::Client,
    client_email: String,
    token_uri: String,
    key_id: Option<String>,
    key: EncodingKey,
    cached: RwLock<Option<AccessToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    /// Parses the account's private key; no network traffic happens here
    pub fn new(http: reqwest::Client, credentials: &ServiceAccountCredentials) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| {
                Error::Configuration(format!("invalid service account private key: {}", e))
            })?;

        Ok(Self {
            http,
            client_email: credentials.client_email.clone(),
            token_uri: credentials.token_uri.clone(),
            key_id: credentials.private_key_id.clone(),
            key,
            cached: RwLock::new(None),
        })
    }

    /// Signed RS256 assertion issued at `now`
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: EARTH_ENGINE_SCOPES.to_string(),
            aud: self.token_uri.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        encode(&header, &claims, &self.key)
            .map_err(|e| Error::Authentication(format!("failed to sign assertion: {}", e)))
    }

    /// A bearer token valid for at least the refresh margin
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.secret.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.secret.clone());
            }
        }

        let token = self.request_token().await?;
        let secret = token.secret.clone();
        *cached = Some(token);
        Ok(secret)
    }

    /// Exchanges a fresh assertion for a new access token and caches it
    pub async fn refresh(&self) -> Result<AccessToken> {
        let token = self.request_token().await?;
        *self.cached.write().await = Some(token.clone());
        Ok(token)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        debug!(token_uri = %self.token_uri, "Requesting access token");
        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("token endpoint unreachable: {}", e)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(Error::Authentication(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                reason
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let lifetime = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        info!(client_email = %self.client_email, expires_in = lifetime, "Obtained access token");

        Ok(AccessToken {
            secret: token.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}
