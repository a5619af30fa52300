use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::models::{AiSummary, Category, CategoryScore, Complaint};

const SUMMARY_INSTRUCTION: &str = r#"As an AI Executive Assistant to the Vice Chancellor, analyze these student grievances and provide a VERY CONCISE executive brief.

TASK:
1. Generate a brief, high-impact bulleted summary (MAX 3-4 BULLETS) of the most urgent institutional issues. Keep it strictly under 100 words.
2. Calculate institutional sentiment scores (0-100) for major categories: Mess, Hostel, Faculty, Facilities, Infrastructure.
3. Provide an overall health score (0-100).
4. Provide empty or minimal department scores as they are no longer the primary focus.

Brevity is the absolute priority. Focus only on critical trends."#;

const FALLBACK_REPORT: &str = "\u{2022} Temporary connectivity issue with the AI engine.\n\u{2022} High volume of tickets may cause delays.\n\u{2022} Please refresh to attempt regeneration.";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Adapter for the Gemini executive-brief call. One attempt, bounded
/// timeout, and a deterministic fallback on every failure path; callers
/// never see an error from this adapter.
pub struct GeminiAgent {
    client: Client,
    api_key: Option<String>,
    api_base: String,
}

impl GeminiAgent {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            api_base: GEMINI_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    fn with_api_base(api_key: Option<String>, api_base: &str) -> Self {
        let mut agent = Self::new(api_key);
        agent.api_base = api_base.to_string();
        agent
    }

    /// Zero-score summary substituted whenever the AI call fails.
    pub fn fallback_summary() -> AiSummary {
        AiSummary {
            report: FALLBACK_REPORT.to_string(),
            overall_health: 0.0,
            category_scores: Category::ALL
                .iter()
                .map(|c| CategoryScore {
                    name: c.as_str().to_string(),
                    score: 0.0,
                })
                .collect(),
            dept_scores: Vec::new(),
        }
    }

    pub async fn generate_summary(&self, complaints: &[Complaint]) -> AiSummary {
        match self.request_summary(complaints).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("AI summary request failed, serving fallback: {}", e);
                Self::fallback_summary()
            }
        }
    }

    async fn request_summary(&self, complaints: &[Complaint]) -> Result<AiSummary, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "GEMINI_API_KEY is not configured".to_string())?;

        let prompt = build_prompt(complaints);
        info!(
            "Requesting executive brief for {} complaints from {}",
            complaints.len(),
            GEMINI_MODEL
        );

        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: summary_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, GEMINI_MODEL, api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| format!("Response read failed: {}", e))?;

        if !status.is_success() {
            return Err(format!("AI service returned {}: {}", status, text));
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&text).map_err(|e| format!("Parse error: {}", e))?;

        let payload = parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| "AI returned an empty response body".to_string())?;

        parse_summary(&payload)
    }
}

/// Complaint set serialized as the plain text lines the brief is built from.
fn complaint_lines(complaints: &[Complaint]) -> String {
    complaints
        .iter()
        .map(|c| {
            let dept = if c.category.requires_department() {
                format!(" (Dept: {})", c.department)
            } else {
                String::new()
            };
            format!(
                "Category: {}{}, Subject: {}, Description: {}, Status: {}",
                c.category, dept, c.subject, c.description, c.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn build_prompt(complaints: &[Complaint]) -> String {
    format!(
        "{}\n\nCOMPLAINTS DATA:\n{}",
        SUMMARY_INSTRUCTION,
        complaint_lines(complaints)
    )
}

fn parse_summary(text: &str) -> Result<AiSummary, String> {
    serde_json::from_str(text).map_err(|e| format!("Malformed summary payload: {}", e))
}

/// Structured-output schema sent with the request, mirroring `AiSummary`.
fn summary_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "report": {
                "type": "STRING",
                "description": "A VERY CONCISE bulleted summary of grievances."
            },
            "overallHealth": {
                "type": "NUMBER",
                "description": "Overall institution satisfaction score from 0-100."
            },
            "categoryScores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Category name" },
                        "score": { "type": "NUMBER", "description": "Score 0-100" }
                    },
                    "required": ["name", "score"]
                }
            },
            "deptScores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "dept": { "type": "STRING" },
                        "score": { "type": "NUMBER" }
                    },
                    "required": ["category", "dept", "score"]
                }
            }
        },
        "required": ["report", "overallHealth", "categoryScores", "deptScores"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, Status};
    use chrono::Utc;

    fn complaint(category: Category, department: Department) -> Complaint {
        Complaint {
            id: "c1".to_string(),
            student_name: "ABHIJEET SINGH".to_string(),
            student_id: "2025071102".to_string(),
            category,
            department,
            subject: "Projector not working".to_string(),
            description: "Room 301 projector fails to start.".to_string(),
            timestamp: Utc::now(),
            status: Status::Pending,
            resolved_at: None,
            resolution_note: None,
            image_url: None,
        }
    }

    #[test]
    fn complaint_lines_mention_department_only_when_routed() {
        let lines = complaint_lines(&[
            complaint(Category::Faculty, Department::Cse),
            complaint(Category::Mess, Department::General),
        ]);

        assert!(lines.contains("Category: Faculty (Dept: Computer Science & Engineering)"));
        assert!(lines.contains("Category: Mess, Subject:"));
        assert!(!lines.contains("Mess (Dept:"));
        assert!(lines.contains("\n---\n"));
    }

    #[test]
    fn valid_payload_parses_into_a_summary() {
        let payload = r#"{
            "report": "• Mess hygiene is the dominant concern.",
            "overallHealth": 64,
            "categoryScores": [{"name": "Mess", "score": 40}],
            "deptScores": [{"category": "Faculty", "dept": "CSE", "score": 70}]
        }"#;

        let summary = parse_summary(payload).unwrap();
        assert_eq!(summary.overall_health, 64.0);
        assert_eq!(summary.category_scores[0].name, "Mess");
        assert_eq!(summary.dept_scores[0].dept, "CSE");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_summary("not json").is_err());
        assert!(parse_summary(r#"{"report": "x"}"#).is_err());
    }

    #[test]
    fn fallback_summary_is_zeroed_out() {
        let fallback = GeminiAgent::fallback_summary();
        assert_eq!(fallback.overall_health, 0.0);
        assert_eq!(fallback.category_scores.len(), 5);
        assert!(fallback.category_scores.iter().all(|s| s.score == 0.0));
        assert!(fallback.dept_scores.is_empty());
        assert!(fallback.report.contains("refresh"));
    }

    #[tokio::test]
    async fn missing_api_key_yields_the_fallback() {
        let agent = GeminiAgent::new(None);
        let summary = agent.generate_summary(&[]).await;
        assert_eq!(summary.overall_health, 0.0);
        assert_eq!(summary.report, FALLBACK_REPORT);
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_the_fallback() {
        // Port 9 (discard) refuses the connection immediately.
        let agent = GeminiAgent::with_api_base(Some("test-key".to_string()), "http://127.0.0.1:9");
        let summary = agent
            .generate_summary(&[complaint(Category::Mess, Department::General)])
            .await;
        assert_eq!(summary.overall_health, 0.0);
        assert_eq!(summary.report, FALLBACK_REPORT);
    }
}
