//! Wire models for the analysis service.
//!
//! The service is an LLM behind an HTTP endpoint, so its responses are
//! decoded tolerantly: missing, `null`, or wrongly-typed fields never fail
//! the whole analysis, they simply decode as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of a `POST /api/analyze` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    /// Trimmed, non-empty input text.
    pub text: String,
}

impl AnalysisRequest {
    /// Build a request from raw user input.
    ///
    /// Returns `None` when the input is empty or whitespace only.
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }
}

/// A sub-idea extracted from the main text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubIdea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Structured analysis returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One-sentence summary of the overall idea.
    #[serde(default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_idea: Option<String>,

    /// Clarity rating, nominally 0-100. Not clamped here.
    #[serde(default, deserialize_with = "lenient_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarity_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,

    #[serde(default, deserialize_with = "lenient_sub_ideas")]
    pub sub_ideas: Vec<SubIdea>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub logic_gaps: Vec<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub improvements: Vec<String>,
}

impl AnalysisResult {
    /// Decode a result from a parsed response body.
    ///
    /// Only JSON objects are accepted; anything else is not an analysis.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// Error shape returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Decode an error body. Anything but a JSON object reads as empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Metadata about a finished analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Endpoint the analysis was requested from.
    pub server_url: String,
    /// Date and time the analysis finished.
    pub analysis_date: DateTime<Utc>,
    /// Length of the submitted text in characters.
    pub input_chars: usize,
    /// Round-trip duration in seconds.
    pub duration_seconds: f64,
}

/// A finished analysis, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub result: AnalysisResult,
}

/// Only strings count as text; anything else is absent.
fn string_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// List entries always render, so non-scalars fall back to their JSON text.
fn entry_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_text(&value))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(entry_text).collect(),
        _ => Vec::new(),
    })
}

fn lenient_sub_ideas<'de, D>(deserializer: D) -> Result<Vec<SubIdea>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .map(|item| SubIdea {
            title: item.get("title").and_then(string_text),
            summary: item.get("summary").and_then(string_text),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_trims_input() {
        let request = AnalysisRequest::new("  plants need sunlight \n").unwrap();
        assert_eq!(request.text, "plants need sunlight");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"text": "plants need sunlight"})
        );
    }

    #[test]
    fn test_request_rejects_blank_input() {
        assert!(AnalysisRequest::new("").is_none());
        assert!(AnalysisRequest::new(" \t\n ").is_none());
    }

    #[test]
    fn test_full_result_decodes() {
        let result = AnalysisResult::from_value(json!({
            "main_idea": "Plants require sunlight",
            "clarity_score": 80,
            "emotion": "curious",
            "sub_ideas": [{"title": "Photosynthesis", "summary": "Light becomes sugar."}],
            "logic_gaps": ["No mechanism given"],
            "improvements": ["Add a source"]
        }))
        .unwrap();

        assert_eq!(result.main_idea.as_deref(), Some("Plants require sunlight"));
        assert_eq!(result.clarity_score, Some(80.0));
        assert_eq!(result.emotion.as_deref(), Some("curious"));
        assert_eq!(result.sub_ideas.len(), 1);
        assert_eq!(result.sub_ideas[0].title.as_deref(), Some("Photosynthesis"));
        assert_eq!(result.logic_gaps, vec!["No mechanism given"]);
        assert_eq!(result.improvements, vec!["Add a source"]);
    }

    #[test]
    fn test_missing_fields_decode_as_absent() {
        let result = AnalysisResult::from_value(json!({})).unwrap();
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_wrong_types_are_tolerated() {
        let result = AnalysisResult::from_value(json!({
            "main_idea": null,
            "clarity_score": "high",
            "emotion": ["sad"],
            "sub_ideas": "none",
            "logic_gaps": {"a": 1},
            "improvements": [1, null, "ok"]
        }))
        .unwrap();

        assert!(result.main_idea.is_none());
        assert!(result.clarity_score.is_none());
        assert!(result.emotion.is_none());
        assert!(result.sub_ideas.is_empty());
        assert!(result.logic_gaps.is_empty());
        assert_eq!(result.improvements, vec!["1", "", "ok"]);

        let numeric = AnalysisResult::from_value(json!({
            "main_idea": 0,
            "emotion": true,
            "sub_ideas": [{"title": 0, "summary": 12}, {"title": false}]
        }))
        .unwrap();

        assert!(numeric.main_idea.is_none());
        assert!(numeric.emotion.is_none());
        assert_eq!(numeric.sub_ideas, vec![SubIdea::default(), SubIdea::default()]);
    }

    #[test]
    fn test_sub_idea_without_object_shape() {
        let result = AnalysisResult::from_value(json!({
            "sub_ideas": ["loose string", {"title": "A"}]
        }))
        .unwrap();

        assert_eq!(result.sub_ideas[0], SubIdea::default());
        assert_eq!(result.sub_ideas[1].title.as_deref(), Some("A"));
        assert!(result.sub_ideas[1].summary.is_none());
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(AnalysisResult::from_value(json!(null)).is_none());
        assert!(AnalysisResult::from_value(json!([1, 2])).is_none());
        assert!(AnalysisResult::from_value(json!("text")).is_none());
    }

    #[test]
    fn test_error_body_decodes() {
        let body: ErrorBody = serde_json::from_value(json!({
            "error": "Failed to analyze text",
            "details": "quota exceeded"
        }))
        .unwrap();
        assert_eq!(body.error.as_deref(), Some("Failed to analyze text"));
        assert_eq!(body.details.as_deref(), Some("quota exceeded"));

        let empty: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert!(empty.error.is_none());
    }

    #[test]
    fn test_error_body_requires_object() {
        let from_array = ErrorBody::from_value(json!(["boom", "x"]));
        assert!(from_array.error.is_none());
        assert!(from_array.details.is_none());

        assert!(ErrorBody::from_value(json!("boom")).error.is_none());
        assert!(ErrorBody::from_value(json!(null)).error.is_none());
        assert_eq!(
            ErrorBody::from_value(json!({"error": "Text is required"}))
                .error
                .as_deref(),
            Some("Text is required")
        );
    }
}
