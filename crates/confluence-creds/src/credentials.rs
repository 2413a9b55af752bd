use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Temporary S3 credentials obtained via the Earthdata Login exchange.
///
/// `Debug` is derived manually to avoid ever printing `secret_access_key` or
/// `session_token` — only the access key id and expiration are safe to log.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "accessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "secretAccessKey")]
    pub secret_access_key: SecretString,
    #[serde(rename = "sessionToken")]
    pub session_token: SecretString,
    #[serde(rename = "expiration")]
    pub expiration: DateTime<Utc>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl Credentials {
    pub fn expires_in(&self) -> chrono::Duration {
        self.expiration - Utc::now()
    }

    /// Whether these credentials are within `watermark` of expiring, and
    /// should be proactively refreshed rather than used again.
    pub fn needs_refresh(&self, watermark: chrono::Duration) -> bool {
        self.expires_in() <= watermark
    }

    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.expose_secret()
    }

    pub fn session_token(&self) -> &str {
        self.session_token.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(expiration: DateTime<Utc>) -> Credentials {
        Credentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: SecretString::from("shh".to_string()),
            session_token: SecretString::from("tok".to_string()),
            expiration,
        }
    }

    #[test]
    fn debug_output_never_contains_secret_material() {
        let c = creds(Utc::now() + chrono::Duration::hours(1));
        let rendered = format!("{c:?}");
        assert!(!rendered.contains("shh"));
        assert!(!rendered.contains("tok"));
    }

    #[test]
    fn needs_refresh_when_inside_watermark() {
        let c = creds(Utc::now() + chrono::Duration::minutes(2));
        assert!(c.needs_refresh(chrono::Duration::minutes(5)));
        assert!(!c.needs_refresh(chrono::Duration::minutes(1)));
    }
}
