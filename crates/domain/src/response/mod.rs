//! Response expectations

mod expected;
mod expected_header;

pub use expected::ExpectedResponse;
pub use expected_header::{ExpectedHeader, HeaderKind, render_value};
