//! Test definitions

mod base;
mod config;
mod functional;
mod group;
mod load;

pub use base::{BaseTest, Timeout};
pub use config::Config;
pub use functional::FunctionalTest;
pub use group::GroupDefinition;
pub use load::{LoadTest, Phase, PhaseDuration, ThinkTime};
