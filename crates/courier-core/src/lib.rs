//! Shared building blocks for the Courier feature crates

mod error;
mod http_client;
mod upstream;

pub use error::{ErrorBody, HttpError, UNREACHABLE_PROVIDER_MESSAGE, provider_message};
pub use http_client::http_client;
pub use upstream::{Upstream, UpstreamFailure};
