use super::{GenerateFuture, GenerateRequest, Provider, ProviderError, ProviderResponse};

/// In-process provider for tests and offline runs. Replies with a canned
/// text, or echoes the prompt inside a fenced block when none is set.
#[derive(Debug, Default, Clone)]
pub struct StubProvider {
    reply: Option<String>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }
}

impl Provider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn generate(&self, req: GenerateRequest) -> GenerateFuture {
        let text = match &self.reply {
            Some(reply) => reply.clone(),
            None => format!(
                "Stub reply for model {}.\n```text\n{}\n```\nNo model was called.",
                req.model, req.prompt
            ),
        };

        Box::pin(async move { Ok::<_, ProviderError>(ProviderResponse { text }) })
    }
}
