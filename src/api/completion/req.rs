use serde::{Deserialize, Serialize};

/// Chat-completion request body.
///
/// The whole few-shot prompt travels as a single user message; no session
/// state is carried between requests.
#[derive(Clone, Serialize, Debug, Deserialize)]
pub struct CompletionRequest {
    /// ID of the model to use.
    pub model: String,

    /// Input messages.
    pub messages: Vec<CompletionMessage>,

    /// Amount of randomness injected into the response.
    pub temperature: f32,

    /// The maximum number of tokens to generate.
    pub max_tokens: u32,

    pub top_p: f32,

    pub frequency_penalty: f32,

    pub presence_penalty: f32,
}

impl CompletionRequest {
    pub fn new(model: &str, decoding: &DecodingConfig, prompt: String) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: decoding.temperature,
            max_tokens: decoding.max_tokens,
            top_p: decoding.top_p,
            frequency_penalty: decoding.frequency_penalty,
            presence_penalty: decoding.presence_penalty,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

/// Decoding parameters held fixed across every request of a run.
///
/// Deterministic-leaning defaults: low temperature, no penalties, a generous
/// output budget for a ten-record batch.
#[derive(Clone, Debug)]
pub struct DecodingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 2250,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}
