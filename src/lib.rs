//! `jsonfetch` is an async JSON HTTP client bound to a single base URL.
//!
//! Every call goes through one retrying procedure exposed as:
//! - [`JsonFetchClient::get`]
//! - [`JsonFetchClient::post`]
//! - [`JsonFetchClient::put`]
//! - [`JsonFetchClient::patch`]
//!
//! Failed attempts (transport errors, non-2xx statuses, undecodable bodies)
//! are retried immediately up to [`ClientConfig::max_retries`] extra times.

mod client;
mod config;
mod error;
mod headers;
mod options;
mod query;
mod retry;
mod transport;
mod types;
mod value;

pub use client::JsonFetchClient;
pub use config::ClientConfig;
pub use error::{BoxError, JsonFetchError};
pub use options::RequestOptions;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::ResponseEnvelope;
pub use value::QueryValue;

pub type Result<T> = std::result::Result<T, JsonFetchError>;
