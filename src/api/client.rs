use super::{
    backoff::BackoffPolicy,
    config::ApiConfig,
    error::{map_deserialization_error, map_serialization_error, ClientError, WrappedError},
};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    http_client: reqwest::Client,
    pub config: ApiConfig,
    pub backoff: BackoffPolicy,
}

impl ApiClient {
    pub fn new(config: ApiConfig, backoff: BackoffPolicy) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
            backoff,
        }
    }

    /// Make a POST request to {path} and deserialize the response body.
    ///
    /// The request is rebuilt on every attempt because `reqwest::Request` is
    /// consumed by `execute`; retrying after a rate limit needs a fresh one.
    pub(crate) async fn post<I, O>(&self, path: &str, request: I) -> Result<O, ClientError>
    where
        I: Serialize + std::fmt::Debug,
        O: DeserializeOwned,
    {
        let bytes = self
            .backoff
            .retry(|| {
                let request = &request;
                async move {
                    let serialized_request =
                        serde_json::to_string(request).map_err(map_serialization_error)?;
                    crate::trace!("Serialized request: {}", serialized_request);
                    let http_request = self
                        .http_client
                        .post(self.config.url(path))
                        .headers(self.config.headers())
                        .header(reqwest::header::CONTENT_TYPE, "application/json")
                        .body(serialized_request)
                        .build()?;

                    let response = self
                        .http_client
                        .execute(http_request)
                        .await
                        .map_err(ClientError::Reqwest)?;

                    let status = response.status();
                    let bytes = response.bytes().await.map_err(ClientError::Reqwest)?;

                    // Deserialize response body from either error object or actual response object
                    if !status.is_success() {
                        let wrapped_error: WrappedError = serde_json::from_slice(bytes.as_ref())
                            .map_err(|e| map_deserialization_error(e, bytes.as_ref()))?;

                        if status.as_u16() == 429
                            // API returns 429 also when:
                            // "You exceeded your current quota, please check your plan and billing details."
                            && wrapped_error.error.r#type != Some("insufficient_quota".to_string())
                        {
                            return Err(ClientError::RateLimited {
                                message: wrapped_error.error.message,
                            });
                        }
                        return Err(ClientError::ApiError(wrapped_error.error));
                    }

                    Ok(bytes)
                }
            })
            .await?;

        let response: O = serde_json::from_slice(&bytes)
            .map_err(|e| map_deserialization_error(e, &bytes))?;

        Ok(response)
    }
}
