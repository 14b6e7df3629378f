use super::{GenerateFuture, GenerateRequest, Provider, ProviderError, ProviderResponse};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

/// Google Gemini over the Generative Language API.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: Url,
}

impl GoogleProvider {
    /// A missing key is not a construction error: it surfaces as an auth
    /// failure on the first call, so the server can start unconfigured.
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            http,
            api_key,
            api_base: Url::parse("https://generativelanguage.googleapis.com/")?,
        })
    }

    fn build_url(&self, model: &str, key: &str) -> Result<Url, ProviderError> {
        // v1beta:generateContent returns the whole completion in one body.
        // Docs: https://ai.google.dev/api/rest/v1beta/models/generateContent
        let mut url = self
            .api_base
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| ProviderError::Unavailable(format!("invalid request URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }
}

impl Provider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn generate(&self, req: GenerateRequest) -> GenerateFuture {
        let this = self.clone();

        Box::pin(async move {
            let Some(key) = this.api_key.as_deref() else {
                return Err(ProviderError::Auth(
                    "GEMINI_API_KEY is not set (or [google].api_key in config.toml)".to_string(),
                ));
            };

            let url = this.build_url(&req.model, key)?;
            let body = GenerateContentRequest {
                contents: vec![Content {
                    role: Some("user".to_string()),
                    parts: vec![Part {
                        text: Some(req.prompt),
                    }],
                }],
            };

            let resp = this
                .http
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(|e| ProviderError::Unavailable(format!("failed to reach Gemini: {e}")))?;

            let status = resp.status();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                let text = resp.text().await.unwrap_or_default();
                return Err(ProviderError::Auth(format!(
                    "Gemini rejected the credential: HTTP {status}: {text}"
                )));
            }
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(ProviderError::Unavailable(format!(
                    "Gemini API error: HTTP {status}: {text}"
                )));
            }

            let parsed: GenerateContentResponse = resp.json().await.map_err(|e| {
                ProviderError::Unavailable(format!("failed to parse Gemini response: {e}"))
            })?;

            match extract_text(&parsed) {
                Some(text) => Ok(ProviderResponse { text }),
                None => Err(ProviderError::Unavailable(
                    "Gemini response contained no text candidates".to_string(),
                )),
            }
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

fn extract_text(r: &GenerateContentResponse) -> Option<String> {
    // Concatenate all text parts of the first candidate.
    let cand = r.candidates.first()?;
    let content = cand.content.as_ref()?;
    let mut out = String::new();
    for p in &content.parts {
        if let Some(t) = &p.text {
            out.push_str(t);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
