use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use wellspace_common::{normalize_plan, RoutineDay};

use super::{GenerationError, GenerationService};

/// Client for the Gemini generateContent API.
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Gemini request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    temperature: f32,
}

/// Gemini response format, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn plan_prompt(free_minutes: u32) -> String {
        format!(
            "Create a 21-day wellness routine plan for a user with {free_minutes} minutes of free time per day. \
             For each day, provide a list of 2-3 small, actionable tasks. \
             The plan should be balanced, incorporating a mix of light physical activity (like walking, stretching), \
             mindfulness (breathing exercises, meditation), and focus-building tasks. \
             The tasks should be simple, easy to follow, and require minimal equipment. \
             Gradually increase the intensity or duration slightly over the 21 days if possible. \
             Ensure the output is a JSON array of objects, where each object has a 'day' (number) and a 'tasks' (array of strings)."
        )
    }

    fn plan_response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "day": {
                        "type": "INTEGER",
                        "description": "The day number, from 1 to 21."
                    },
                    "tasks": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "An array of 2-3 short, actionable wellness tasks for the day."
                    }
                },
                "required": ["day", "tasks"]
            }
        })
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate_routine_plan(
        &self,
        free_minutes: u32,
    ) -> Result<Vec<RoutineDay>, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::plan_prompt(free_minutes),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::plan_response_schema(),
                temperature: 0.7,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!("Requesting routine plan from {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service(format!("{}: {}", status, body)));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim())
            .ok_or_else(|| GenerationError::InvalidResponse("no candidates".to_string()))?;

        let entries: Vec<serde_json::Value> = serde_json::from_str(text)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(normalize_plan(&entries))
    }
}
