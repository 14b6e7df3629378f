use crate::{config, provider};
use crate::provider::Provider;
use std::sync::Arc;

pub fn build_provider(
    http: &reqwest::Client,
    cfg: Option<&config::Config>,
    provider_name: &str,
) -> anyhow::Result<Arc<dyn Provider>> {
    match provider_name {
        "google" => {
            #[cfg(feature = "google")]
            {
                // A missing key is deliberately not a startup error; it
                // surfaces as an auth failure on the first provider call.
                let api_key = std::env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty())
                    .or_else(|| cfg.and_then(|c| c.google.api_key.clone()));

                if api_key.is_none() {
                    tracing::warn!(
                        "no Gemini credential found; /api/code will fail until GEMINI_API_KEY is set"
                    );
                }

                let p = provider::google::GoogleProvider::new(http.clone(), api_key)?;
                Ok(Arc::new(p))
            }
            #[cfg(not(feature = "google"))]
            {
                let _ = (http, cfg);
                anyhow::bail!("google provider is not enabled in this build")
            }
        }
        "stub" => Ok(Arc::new(provider::stub::StubProvider::new())),
        other => anyhow::bail!("unknown provider: {other}"),
    }
}
