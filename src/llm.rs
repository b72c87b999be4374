//! LLM client, the single point of entry for the structured-extraction
//! call.
//!
//! Wraps the Anthropic Messages API behind a blocking client with retry on
//! rate limits and server errors. Extraction never fails the pipeline: any
//! error here degrades to the empty record and the document still renders.

use crate::model::CvRecord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Hardcoded to keep extraction behavior stable across deployments.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

const EXTRACTION_SYSTEM: &str = "You extract structured candidate data from CV text. \
Return only a JSON object, no prose and no code fences.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Blocking Anthropic Messages client with retry on 429 and 5xx.
pub struct LlmClient {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes one call to the API, retrying transient failures with
    /// exponential backoff (1s, 2s, 4s).
    pub fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                std::thread::sleep(delay);
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send();

            let response = match response {
                Ok(r) => r,
                Err(err) => {
                    last_error = Some(LlmError::Http(err));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().unwrap_or_default();
                warn!("LLM API returned {status}: {body}");
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json()?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Structured-extraction collaborator: CV text in, normalized record out.
pub struct CvExtractor {
    client: LlmClient,
}

impl CvExtractor {
    pub fn new(api_key: String) -> Self {
        Self {
            client: LlmClient::new(api_key),
        }
    }

    /// Extracts a record from raw CV text. Never fails: any client or
    /// payload problem degrades to the empty record.
    pub fn extract(&self, cv_text: &str) -> CvRecord {
        let prompt = extraction_prompt(cv_text);
        match self.client.call(&prompt, EXTRACTION_SYSTEM) {
            Ok(response) => match response.text() {
                Some(text) => {
                    let payload = extract_json_object(strip_json_fences(text));
                    CvRecord::from_extraction_json(payload)
                }
                None => {
                    warn!("extraction returned no text content");
                    CvRecord::empty()
                }
            },
            Err(err) => {
                warn!("extraction call failed: {err}");
                CvRecord::empty()
            }
        }
    }
}

fn extraction_prompt(cv_text: &str) -> String {
    format!(
        r#"Extract comprehensive information from this CV and return it as JSON.

Rules:
- Extract ALL experiences (up to 20, most recent first).
- Multiple projects at the same company become ONE experience entry; list
  each project inside responsibilities as a header line of the form
  "Project Name: <name>, Location: <location>, Duration: <start - end>"
  followed by that project's responsibilities.
- Include the location in the company field when mentioned, as
  "Company Name, Location: <location>".
- Job titles and the candidate name in proper case, not ALL CAPS.
- Capture every responsibility; if an "Environment:"/"Technologies:" section
  exists, add it as the last entry formatted as
  "Environment/Technologies: <list>". Do not add bullet characters.
- Use "Present" for ongoing positions.
- Extract all technical skills and all certifications with their full names.

Return exactly this structure:
{{
  "candidate_name": "",
  "position": "",
  "education": "",
  "total_experience_years": "",
  "phone": "",
  "email": "",
  "intro_paragraph": "",
  "experiences": [
    {{"company": "", "role": "", "duration": "", "responsibilities": [""]}}
  ],
  "technical_skills": [""],
  "certifications": [""],
  "language_skills": ["Language - Proficiency"]
}}

CV TEXT:
{cv_text}

RETURN ONLY THE JSON:"#
    )
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Narrows model output to the outermost JSON object, tolerating prose
/// around it.
fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
