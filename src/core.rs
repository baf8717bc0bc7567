pub mod context;
pub mod error;
pub mod http;

pub use context::RequestContext;
pub use error::{ApiErrorKind, ErrorResponse, LlmError, ValidationError};
pub use http::{
    HttpRequest, HttpResponse, HttpTransport, Inspector, InspectorConfig, ReqwestTransport,
};

pub(crate) use error::api_error;
