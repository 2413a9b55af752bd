use aws_sdk_ssm::types::{ParameterTier, ParameterType};
use aws_sdk_ssm::Client;

use crate::credentials::Credentials;
use crate::error::{CredsError, Result};

const MAX_ATTEMPTS: u32 = 5;

/// Name of the parameter-store entry holding the bearer token used to
/// authenticate catalog (CMR) searches.
const EDL_TOKEN_PARAMETER: &str = "bearer--edl--token";

/// Reads the Earthdata Login bearer token CMR searches authenticate with,
/// published to parameter store out of band from this pipeline.
pub async fn get_token(client: &Client) -> Result<String> {
    let response = client
        .get_parameter()
        .name(EDL_TOKEN_PARAMETER)
        .with_decryption(true)
        .send()
        .await
        .map_err(|e| CredsError::Ssm(e.to_string()))?;

    response
        .parameter
        .and_then(|p| p.value)
        .ok_or_else(|| CredsError::Ssm(format!("parameter {EDL_TOKEN_PARAMETER} has no value")))
}

/// Persists freshly-obtained S3 credentials to Parameter Store as
/// `SecureString` values, so other processes in the same job array can read
/// them without repeating the Earthdata login exchange.
pub async fn persist(client: &Client, key_id: &str, creds: &Credentials) -> Result<()> {
    put_secure(client, key_id, "s3_creds_key", &creds.access_key_id, "Temporary SWOT S3 bucket key").await?;
    put_secure(
        client,
        key_id,
        "s3_creds_secret",
        creds.secret_access_key(),
        "Temporary SWOT S3 bucket secret",
    )
    .await?;
    put_secure(client, key_id, "s3_creds_token", creds.session_token(), "Temporary SWOT S3 bucket token").await?;
    put_secure(
        client,
        key_id,
        "s3_creds_expiration",
        &creds.expiration.to_rfc3339(),
        "Temporary SWOT S3 bucket expiration",
    )
    .await?;
    Ok(())
}

async fn put_secure(client: &Client, key_id: &str, name: &str, value: &str, description: &str) -> Result<()> {
    let mut last_error = None;
    for attempt in 1..=MAX_ATTEMPTS {
        let result = client
            .put_parameter()
            .name(name)
            .description(description)
            .value(value)
            .r#type(ParameterType::SecureString)
            .key_id(key_id)
            .overwrite(true)
            .tier(ParameterTier::Standard)
            .send()
            .await;

        match result {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::warn!(name, attempt, "SSM put_parameter failed, retrying");
                last_error = Some(e.to_string());
            }
        }
    }
    Err(CredsError::Ssm(last_error.unwrap_or_else(|| "unknown error".to_string())))
}
