//! TruthGuard Core Library
//!
//! Data model, decoding, error taxonomy and configuration shared by the
//! analysis endpoint, its client and the CLI.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod prompt;

pub use analysis::model::{AnalysisResult, Categories, Source, Verdict};
pub use config::ServerConfig;
pub use error::{ErrorKind, TgError, TgResult};
