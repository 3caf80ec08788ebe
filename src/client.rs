//! Generative material service client.
//!
//! [`MaterialModel`] is the seam between the planner and whatever produces
//! the bill of materials. [`GeminiClient`] implements it against the Gemini
//! `generateContent` REST API.

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::request::MaterialRequest;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Something that turns a material request into raw response text.
pub trait MaterialModel {
    fn generate(&mut self, request: &MaterialRequest) -> Result<String>;
}

/// Client for the Gemini API.
pub struct GeminiClient {
    client: Client,
    config: PlannerConfig,
}

impl GeminiClient {
    /// Create a client for the given configuration.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client configured from the process environment.
    ///
    /// Fails with `MissingCredential` before any network activity when no key
    /// is set.
    pub fn from_env() -> Result<Self> {
        Self::new(PlannerConfig::from_env()?)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

impl MaterialModel for GeminiClient {
    fn generate(&mut self, request: &MaterialRequest) -> Result<String> {
        let url = self.generate_url();
        debug!("Requesting materials from {}", url);

        let body = GenerateContentRequest::from(request);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, concat!("deck-planner/", env!("CARGO_PKG_VERSION")))
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(PlannerError::TransportFailure(format!(
                "service returned {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        debug!(status = status.as_u16(), bytes = text.len(), "Received response");
        extract_text(&text)
    }
}

/// Pull the generated text out of a `generateContent` reply.
fn extract_text(body: &str) -> Result<String> {
    let reply: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = reply
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(PlannerError::MalformedResponse("empty response".to_string()));
    }
    Ok(text)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f64,
}

impl<'a> From<&'a MaterialRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a MaterialRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeckDimensions;
    use crate::request::build_request;

    #[test]
    fn test_request_body_shape() {
        let request = build_request(&DeckDimensions::default());
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], request.prompt.as_str());
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], request.schema);
        assert_eq!(body["generationConfig"]["temperature"], 0.2);
    }

    #[test]
    fn test_generate_url() {
        let mut config = PlannerConfig::new("secret");
        config.endpoint = "http://localhost:9000/v1beta".to_string();
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.generate_url(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"categoryName\":"},{"text":"\"Lumber\",\"items\":[]}]"}]}}]}"#;
        assert_eq!(
            extract_text(body).unwrap(),
            r#"[{"categoryName":"Lumber","items":[]}]"#
        );
    }

    #[test]
    fn test_extract_text_empty() {
        for body in [r#"{}"#, r#"{"candidates":[]}"#, r#"{"candidates":[{"content":{"parts":[]}}]}"#] {
            assert!(matches!(
                extract_text(body),
                Err(PlannerError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_extract_text_not_json() {
        assert!(matches!(
            extract_text("<html>bad gateway</html>"),
            Err(PlannerError::MalformedResponse(_))
        ));
    }
}
