use std::future::Future;
use std::pin::Pin;

/// A single completion request sent to the upstream model.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
}

/// Raw text returned by the provider. Ephemeral, never persisted.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
}

/// Failures a provider call can surface. Auth failures are kept distinct so
/// the caller can report a configuration problem instead of retrying.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Unavailable(String),
}

pub type GenerateFuture =
    Pin<Box<dyn Future<Output = Result<ProviderResponse, ProviderError>> + Send + 'static>>;

/// Provider interface: one non-streaming completion call.
///
/// Providers never retry internally; retry policy (if any) belongs to the
/// caller. The dispatcher bounds the call with a timeout, and dropping the
/// returned future abandons the in-flight request.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, req: GenerateRequest) -> GenerateFuture;
}
