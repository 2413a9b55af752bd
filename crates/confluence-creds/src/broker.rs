use std::time::Duration as StdDuration;

use aws_sdk_ssm::Client as SsmClient;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Duration;
use parking_lot::RwLock;
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, SecretString};

use crate::credentials::Credentials;
use crate::error::{CredsError, Result};
use crate::ssm;

/// How close to expiration a cached credential set may get before
/// `current()` proactively triggers a refresh instead of handing it out.
const DEFAULT_WATERMARK: i64 = 5;

/// Brokers temporary S3 credentials from Earthdata Login and republishes
/// them to SSM Parameter Store, caching in memory between calls.
///
/// Follows the archive.podaac.earthdata.nasa.gov four-hop redirect exchange:
/// an unauthenticated `GET` to the S3-credentials endpoint, a `POST` of the
/// basic-auth token to the resulting login redirect, a `GET` of the final
/// redirect to mint the session cookie, then a `GET` of the credentials
/// endpoint again carrying that cookie.
pub struct CredentialBroker {
    http: HttpClient,
    ssm: SsmClient,
    s3_endpoint: String,
    edl_username: String,
    edl_password: SecretString,
    ssm_key_id: String,
    watermark: Duration,
    cached: RwLock<Option<Credentials>>,
}

impl CredentialBroker {
    pub fn new(
        ssm: SsmClient,
        s3_endpoint: String,
        edl_username: String,
        edl_password: SecretString,
        ssm_key_id: String,
    ) -> Self {
        let http = HttpClient::builder()
            .redirect(Policy::none())
            .cookie_store(true)
            .timeout(StdDuration::from_secs(30))
            .build()
            .expect("reqwest client with static config always builds");

        Self {
            http,
            ssm,
            s3_endpoint,
            edl_username,
            edl_password,
            ssm_key_id,
            watermark: Duration::minutes(DEFAULT_WATERMARK),
            cached: RwLock::new(None),
        }
    }

    /// Returns cached credentials if still comfortably valid, otherwise
    /// refreshes and re-persists to SSM first.
    pub async fn current(&self) -> Result<Credentials> {
        if let Some(creds) = self.cached.read().clone() {
            if !creds.needs_refresh(self.watermark) {
                return Ok(creds);
            }
        }
        self.force_refresh().await
    }

    /// Unconditionally performs the Earthdata login exchange and persists
    /// the result, bypassing the cache.
    pub async fn force_refresh(&self) -> Result<Credentials> {
        let creds = self.login_exchange().await?;
        ssm::persist(&self.ssm, &self.ssm_key_id, &creds).await?;
        tracing::info!(
            access_key_id = %creds.access_key_id,
            expiration = %creds.expiration,
            "refreshed S3 credentials"
        );
        *self.cached.write() = Some(creds.clone());
        Ok(creds)
    }

    async fn login_exchange(&self) -> Result<Credentials> {
        let login = self.http.get(&self.s3_endpoint).send().await?;
        let login_location = location_header(&login)?;

        let auth = format!("{}:{}", self.edl_username, self.edl_password.expose_secret());
        let encoded_auth = BASE64.encode(auth);

        let auth_redirect = self
            .http
            .post(&login_location)
            .header("Origin", &self.s3_endpoint)
            .form(&[("credentials", encoded_auth)])
            .send()
            .await?;
        let auth_redirect_location = location_header(&auth_redirect)?;

        // This GET's response carries the EDL session cookie; the cookie
        // jar attached to `self.http` captures it automatically.
        let _final = self.http.get(&auth_redirect_location).send().await?;

        let results = self.http.get(&self.s3_endpoint).send().await?;
        if !results.status().is_success() {
            return Err(CredsError::Login(format!("credentials endpoint returned HTTP {}", results.status())));
        }

        let body = results.text().await?;
        let creds: Credentials = serde_json::from_str(&body)?;
        Ok(creds)
    }
}

fn location_header(response: &reqwest::Response) -> Result<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| CredsError::Login("redirect response missing Location header".to_string()))
}
