pub mod req;
pub mod res;

pub use req::{CompletionMessage, CompletionRequest, DecodingConfig};
pub use res::CompletionResponse;
