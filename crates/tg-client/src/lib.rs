//! # TruthGuard Client
//!
//! HTTP client for the analysis endpoint and the idle/analyzing/result
//! session flow that consumers drive it through.

pub mod client;
pub mod session;

pub use client::{AnalysisClient, Analyzer};
pub use session::{AnalysisSession, SessionStatus, MIN_INPUT_CHARS};
