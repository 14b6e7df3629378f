//! Per-request orchestration: validate, build the prompt, call the provider
//! under a timeout, normalize. Holds no state across requests.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;
use crate::normalize::{self, CodeResult};
use crate::prompt;
use crate::provider::{GenerateRequest, Provider, ProviderError};

/// Incoming code-processing request. `task` and `language` arrive as plain
/// strings so unknown values are reported as a validation error with a
/// helpful message instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeRequest {
    pub task: String,
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Runs one request end to end. Nothing in here retries: provider failures
/// are surfaced verbatim and the caller owns retry policy.
pub async fn handle(
    provider: &dyn Provider,
    model: &str,
    timeout: Duration,
    req: CodeRequest,
) -> Result<CodeResult, ApiError> {
    let prompt = prompt::build(
        &req.task,
        &req.language,
        &req.code,
        req.description.as_deref(),
    )?;

    tracing::info!(
        task = %req.task,
        language = %req.language,
        provider = provider.name(),
        "dispatching code request"
    );

    let call = provider.generate(GenerateRequest {
        model: model.to_string(),
        prompt,
    });

    let resp = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(ProviderError::Auth(msg))) => {
            tracing::warn!(%msg, "provider auth failure");
            return Err(ApiError::ProviderAuth(msg));
        }
        Ok(Err(ProviderError::Unavailable(msg))) => {
            tracing::warn!(%msg, "provider unavailable");
            return Err(ApiError::ProviderUnavailable(msg));
        }
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "provider call timed out");
            return Err(ApiError::ProviderTimeout(timeout.as_secs()));
        }
    };

    Ok(normalize::normalize(&resp.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{GenerateFuture, ProviderResponse};
    use crate::provider::stub::StubProvider;

    fn request(task: &str) -> CodeRequest {
        CodeRequest {
            task: task.to_string(),
            language: "python".to_string(),
            code: "def f(): return 1".to_string(),
            description: None,
        }
    }

    /// Provider whose call never completes; exercises the timeout bound.
    struct HangingProvider;

    impl Provider for HangingProvider {
        fn name(&self) -> &'static str {
            "hanging"
        }

        fn generate(&self, _req: GenerateRequest) -> GenerateFuture {
            Box::pin(std::future::pending::<Result<ProviderResponse, ProviderError>>())
        }
    }

    /// Provider that always fails with the given error.
    struct FailingProvider(fn(String) -> ProviderError);

    impl Provider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn generate(&self, _req: GenerateRequest) -> GenerateFuture {
            let make = self.0;
            Box::pin(async move { Err(make("boom".to_string())) })
        }
    }

    #[tokio::test]
    async fn valid_request_completes_with_normalized_result() {
        let provider = StubProvider::with_reply("All good: ```python\nprint(1)\n``` fixed.");
        let result = handle(&provider, "m", Duration::from_secs(5), request("debug"))
            .await
            .unwrap();
        assert_eq!(result.result_code.as_deref(), Some("print(1)"));
        assert!(result.explanation.contains("All good"));
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_before_the_provider_is_called() {
        let provider = HangingProvider;
        let err = handle(&provider, "m", Duration::from_secs(5), request("translate"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_terminates_in_timeout() {
        let provider = HangingProvider;
        let err = handle(&provider, "m", Duration::from_secs(30), request("correct"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ProviderTimeout(30)));

        // A subsequent unrelated request still works: nothing was poisoned.
        let stub = StubProvider::with_reply("fine");
        let result = handle(&stub, "m", Duration::from_secs(30), request("debug"))
            .await
            .unwrap();
        assert_eq!(result.explanation, "fine");
    }

    #[tokio::test]
    async fn auth_failure_maps_to_provider_auth() {
        let provider = FailingProvider(ProviderError::Auth);
        let err = handle(&provider, "m", Duration::from_secs(5), request("debug"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ProviderAuth(_)));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_provider_unavailable() {
        let provider = FailingProvider(ProviderError::Unavailable);
        let err = handle(&provider, "m", Duration::from_secs(5), request("debug"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ProviderUnavailable(_)));
    }
}
