//! Prompt-style completion requests and responses.

pub(crate) mod request;
pub(crate) mod response;

pub use request::{CompletionsRequest, ResponseFormat, ResponseFormatType};
pub use response::{Choice, CompletionsResponse, Usage};
