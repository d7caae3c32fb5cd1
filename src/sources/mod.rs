//! Upstream source clients and the shared HTTP plumbing they use.

use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SponsorMatchError;

pub(crate) mod openfda;

const ERROR_BODY_MAX_BYTES: usize = 2048;
const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Trimmed, non-empty value of `env_var`.
pub(crate) fn env_value(env_var: &str) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Base URL from `env_var`, falling back to `default`.
pub(crate) fn env_base(default: &'static str, env_var: &str) -> Cow<'static, str> {
    env_value(env_var).map_or(Cow::Borrowed(default), Cow::Owned)
}

/// Returns the process-wide HTTP client, building it on first use.
pub(crate) fn shared_client() -> Result<reqwest::Client, SponsorMatchError> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("sponsor-match/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(SponsorMatchError::HttpClientInit)?;
    Ok(HTTP_CLIENT.get_or_init(|| client).clone())
}

/// One-line, length-capped view of an upstream error body.
pub(crate) fn body_excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let flat = text.trim().replace(['\n', '\r', '\t'], " ");
    if flat.len() <= ERROR_BODY_MAX_BYTES {
        return flat;
    }
    let cut = (0..=ERROR_BODY_MAX_BYTES)
        .rev()
        .find(|&i| flat.is_char_boundary(i))
        .unwrap_or_default();
    format!("{} …", flat[..cut].trim_end())
}

async fn read_body(mut resp: reqwest::Response, api: &str) -> Result<Vec<u8>, SponsorMatchError> {
    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        if body.len() + chunk.len() > DEFAULT_MAX_BODY_BYTES {
            return Err(SponsorMatchError::Api {
                api: api.to_string(),
                message: format!("Response body exceeded {DEFAULT_MAX_BODY_BYTES} bytes"),
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Sends `req` and decodes the JSON body.
///
/// A 404 is "no matches" and yields `Ok(None)`; any other non-2xx status
/// becomes an [`SponsorMatchError::Api`] carrying a body excerpt.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
    api: &str,
) -> Result<Option<T>, SponsorMatchError> {
    let resp = req.send().await?;
    let status = resp.status();
    let body = read_body(resp, api).await?;
    debug!(api, status = status.as_u16(), bytes = body.len(), "upstream response");

    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(SponsorMatchError::Api {
            api: api.to_string(),
            message: format!("HTTP {status}: {}", body_excerpt(&body)),
        });
    }
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|source| SponsorMatchError::ApiJson {
            api: api.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_base_falls_back_to_default() {
        let base = env_base(
            "https://api.fda.gov",
            "SPONSOR_MATCH_TEST_UNSET_BASE_VARIABLE",
        );
        assert_eq!(base, "https://api.fda.gov");
    }

    #[test]
    fn body_excerpt_flattens_whitespace() {
        assert_eq!(body_excerpt(b"  line one\nline\ttwo\r\n"), "line one line two");
    }

    #[test]
    fn body_excerpt_truncates_long_bodies() {
        let body = "é".repeat(ERROR_BODY_MAX_BYTES);
        let excerpt = body_excerpt(body.as_bytes());
        assert!(excerpt.ends_with(" …"));
        assert!(excerpt.len() <= ERROR_BODY_MAX_BYTES + " …".len());
    }
}
