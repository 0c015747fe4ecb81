//! Utility Module
//!
//! - [`data_url`]: encoding/decoding of `data:` URLs, used to carry the
//!   originally uploaded model bytes through the export pipeline

pub mod data_url;
