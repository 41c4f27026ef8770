//! Apitesto Domain - Test definition model
//!
//! This crate defines the typed model of a declarative API test
//! configuration: requests, expected responses with their header
//! directives, load phases and reusable groups.
//! All types here are pure Rust with no I/O dependencies.

pub mod definition;
pub mod error;
pub mod request;
pub mod response;

pub use definition::{
    BaseTest, Config, FunctionalTest, GroupDefinition, LoadTest, Phase, PhaseDuration, ThinkTime,
    Timeout,
};
pub use error::{DomainError, DomainResult};
pub use request::{HeadersMap, HttpMethod};
pub use response::{ExpectedHeader, ExpectedResponse, HeaderKind, render_value};
