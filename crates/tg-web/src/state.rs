//! Application state.

use std::sync::Arc;
use tg_core::{ServerConfig, TgError, TgResult};
use tg_gemini::{CompletionProvider, GeminiClient};
use tracing::{info, warn};

/// Application state shared across handlers.
///
/// Holds the outcome of validating the provider configuration, decided once
/// when the state is built.
#[derive(Clone)]
pub struct AppState {
    provider: Result<Arc<dyn CompletionProvider>, TgError>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider: Ok(provider) }
    }

    /// State whose analysis requests fail with `err`.
    pub fn unconfigured(err: TgError) -> Self {
        Self { provider: Err(err) }
    }

    /// Build the Gemini provider from configuration.
    ///
    /// A missing credential does not stop the server: liveness checks keep
    /// working and analysis requests answer with the configuration error.
    pub fn from_config(config: &ServerConfig) -> Self {
        match GeminiClient::from_config(config) {
            Ok(client) => {
                info!(model = %config.model, "Model provider configured");
                Self::new(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Model provider not configured, analysis requests will fail");
                Self::unconfigured(e)
            }
        }
    }

    pub fn provider(&self) -> TgResult<&Arc<dyn CompletionProvider>> {
        self.provider.as_ref().map_err(Clone::clone)
    }
}
