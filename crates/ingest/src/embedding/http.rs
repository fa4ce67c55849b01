//! Request plumbing shared by the HTTP embedding backends.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::EmbeddingError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub(crate) fn client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Send `body` as JSON and decode the response. Non-2xx statuses become
/// `EmbeddingError::Api("{status}: {body}")`.
pub(crate) async fn post_json<B, R>(request: RequestBuilder, body: &B) -> Result<R, EmbeddingError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request.json(body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(EmbeddingError::Api(format!("{status}: {detail}")));
    }

    Ok(response.json().await?)
}

/// Check the first vector against the configured width.
pub(crate) fn check_dimensions(expected: usize, vectors: &[Vec<f32>]) -> Result<(), EmbeddingError> {
    match vectors.first() {
        Some(first) if first.len() != expected => Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: first.len(),
        }),
        _ => Ok(()),
    }
}
