//! Configuration document sources

mod file_config_source;

pub use file_config_source::FileConfigSource;
