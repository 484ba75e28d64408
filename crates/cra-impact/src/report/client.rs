use crate::config::ReportServiceConfig;
use crate::context::AnalysisContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

pub const EMPTY_REPORT_PLACEHOLDER: &str =
    "Report generated but no content was returned from the AI model.";

// Order in which HTML fragments are stitched into the display report.
const HTML_SECTIONS: [&str; 4] = [
    "executive_summary_html",
    "tables_html",
    "why_this_matters_html",
    "sources_html",
];

/// Narrative report returned by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_json: Option<Value>,
    /// Set when `report` is the joined HTML sections of the flow output.
    #[serde(default)]
    pub html_sections: bool,
    pub raw_response: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report generation is not configured")]
    NotConfigured,
    #[error("request timed out, please try again")]
    Timeout,
    #[error("report service request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("report service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unable to encode analysis context: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("report service returned malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl From<reqwest::Error> for ReportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(value)
        }
    }
}

/// Outbound hook to the narrative report service; implementations receive the
/// finished context and own all transport concerns.
#[async_trait::async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, context: &AnalysisContext) -> Result<GeneratedReport, ReportError>;
}

#[derive(Serialize)]
struct StackAiRequest {
    #[serde(rename = "in-0")]
    input: String,
    user_id: String,
}

/// Stack AI flow client. One POST per report, bounded by the configured
/// timeout, never retried.
#[derive(Debug, Clone)]
pub struct StackAiClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl StackAiClient {
    pub fn new(config: &ReportServiceConfig) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ReportError::Transport)?;

        Ok(Self {
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ReportGenerator for StackAiClient {
    async fn generate(&self, context: &AnalysisContext) -> Result<GeneratedReport, ReportError> {
        let project_name = match context.project_name().trim() {
            "" => "unknown",
            name => name,
        };
        let request = StackAiRequest {
            input: context.to_json_string().map_err(ReportError::Encode)?,
            user_id: format!("economic-impact-{project_name}"),
        };

        info!(
            project = project_name,
            geography = context.geography.slug(),
            "requesting narrative report"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "report service request failed");
                ReportError::from(err)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "report service rejected request");
            return Err(ReportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw_response: Value = serde_json::from_str(&body).map_err(ReportError::Malformed)?;
        let output_text = raw_response
            .get("outputs")
            .and_then(|outputs| outputs.get("out-0"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        let assembled = assemble_report(output_text);
        info!(
            project = project_name,
            structured = assembled.structured.is_some(),
            html_sections = assembled.html_sections,
            "narrative report received"
        );

        Ok(GeneratedReport {
            report: assembled.text,
            report_json: assembled.structured,
            html_sections: assembled.html_sections,
            raw_response,
        })
    }
}

/// Flow output split into display text and, when the output is JSON, the
/// structured payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledReport {
    pub text: String,
    pub structured: Option<Value>,
    /// `text` holds trusted HTML fragments rather than plain text.
    pub html_sections: bool,
}

impl AssembledReport {
    fn plain(text: String, structured: Option<Value>) -> Self {
        Self {
            text,
            structured,
            html_sections: false,
        }
    }
}

pub fn assemble_report(output_text: &str) -> AssembledReport {
    if output_text.is_empty() {
        return AssembledReport::plain(EMPTY_REPORT_PLACEHOLDER.to_string(), None);
    }

    let Ok(parsed) = serde_json::from_str::<Value>(output_text) else {
        return AssembledReport::plain(output_text.to_string(), None);
    };

    let Some(fields) = parsed.as_object() else {
        return AssembledReport::plain(output_text.to_string(), Some(parsed));
    };

    let sections: Vec<&str> = HTML_SECTIONS
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .filter(|section| !section.is_empty())
        .collect();

    if sections.is_empty() {
        let text =
            serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| output_text.to_string());
        return AssembledReport::plain(text, Some(parsed));
    }

    AssembledReport {
        text: sections.join("\n\n"),
        structured: Some(parsed),
        html_sections: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_html_sections_in_display_order() {
        let output = json!({
            "sources_html": "<p>Sources</p>",
            "executive_summary_html": "<p>Summary</p>",
            "tables_html": "",
            "executive_summary": "Summary"
        })
        .to_string();

        let assembled = assemble_report(&output);
        assert_eq!(assembled.text, "<p>Summary</p>\n\n<p>Sources</p>");
        assert!(assembled.html_sections);
        assert_eq!(
            assembled.structured.expect("structured payload kept")["executive_summary"],
            "Summary"
        );
    }

    #[test]
    fn json_without_html_sections_is_pretty_printed() {
        let assembled = assemble_report(r#"{"executive_summary":"Hi"}"#);
        assert!(assembled.text.contains("\n  \"executive_summary\": \"Hi\""));
        assert!(assembled.structured.is_some());
        assert!(!assembled.html_sections);
    }

    #[test]
    fn plain_text_passes_through() {
        let assembled = assemble_report("## Report\nAll good");
        assert_eq!(assembled.text, "## Report\nAll good");
        assert!(assembled.structured.is_none());
        assert!(!assembled.html_sections);
    }

    #[test]
    fn empty_output_uses_placeholder() {
        let assembled = assemble_report("");
        assert_eq!(assembled.text, EMPTY_REPORT_PLACEHOLDER);
        assert!(assembled.structured.is_none());
    }

    #[test]
    fn non_object_json_is_not_marked_as_html() {
        let assembled = assemble_report(r#""<script>alert(1)</script>""#);
        assert_eq!(assembled.text, r#""<script>alert(1)</script>""#);
        assert!(assembled.structured.is_some());
        assert!(!assembled.html_sections);
    }
}
