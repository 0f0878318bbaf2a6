pub mod backoff;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;

use backoff::BackoffPolicy;
use client::ApiClient;
use completion::{CompletionRequest, CompletionResponse, DecodingConfig};
use config::ApiConfig;
use error::ClientError;

/// The remote completion endpoint plus everything a request needs: resolved
/// credentials, model id, fixed decoding parameters, and the retry schedule.
pub struct CompletionBackend {
    pub(crate) client: ApiClient,
    pub model_id: String,
    pub decoding: DecodingConfig,
}

impl CompletionBackend {
    pub fn new(
        mut config: ApiConfig,
        backoff: BackoffPolicy,
        model_id: &str,
        decoding: DecodingConfig,
    ) -> crate::Result<Self> {
        config.load_credentials()?;
        Ok(Self {
            client: ApiClient::new(config, backoff),
            model_id: model_id.to_string(),
            decoding,
        })
    }

    /// One prompt in, the model's trimmed text out. Rate limits are retried
    /// inside the client; any other failure surfaces immediately.
    pub async fn completion_request(&self, prompt: String) -> Result<String, ClientError> {
        let request = CompletionRequest::new(&self.model_id, &self.decoding, prompt);
        let response: CompletionResponse = self.client.post("/chat/completions", request).await?;
        response.into_content()
    }
}
