//! Outgoing request types

mod headers;
mod method;

pub use headers::HeadersMap;
pub use method::HttpMethod;
