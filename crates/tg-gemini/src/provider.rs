//! Single-shot text completion.

use async_trait::async_trait;
use tg_core::TgResult;

/// An opaque text-completion service.
///
/// Implementations make exactly one upstream call per invocation and return
/// the first text fragment of the response, or an empty string when the
/// response carried none. Failures are reported as `TgError::Upstream`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> TgResult<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
