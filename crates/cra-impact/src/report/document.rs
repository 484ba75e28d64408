use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Top-level keys that mark a payload as a structured report.
const DOCUMENT_FIELDS: [&str; 7] = [
    "executive_summary",
    "fiscal_highlights",
    "cra_increment_projection",
    "construction_impact",
    "operations_impact",
    "ten_year_operations_projection",
    "community_impacts",
];

/// Typed view over the structured report returned by the generation service.
/// Every section is optional in the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDocument {
    pub executive_summary: String,
    pub fiscal_highlights: FiscalHighlights,
    pub cra_increment_projection: Vec<CraIncrementRow>,
    pub construction_impact: ImpactSection,
    pub operations_impact: ImpactSection,
    pub ten_year_operations_projection: OperationsProjection,
    pub community_impacts: Vec<CommunityImpact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscalHighlights {
    #[serde(deserialize_with = "lenient_number")]
    pub year_1_cra_revenue: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub ten_year_cumulative: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraIncrementRow {
    #[serde(deserialize_with = "lenient_label")]
    pub year: String,
    #[serde(deserialize_with = "lenient_number")]
    pub taxable_value: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub cra_increment: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub cumulative: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactSection {
    pub narrative: String,
    pub table: Vec<ImpactRow>,
}

impl ImpactSection {
    pub fn total_row(&self) -> Option<&ImpactRow> {
        self.table.iter().find(|row| row.impact_type == "Total")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactRow {
    pub impact_type: String,
    #[serde(alias = "economic_output", deserialize_with = "lenient_number")]
    pub output: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub jobs: f64,
    #[serde(alias = "earnings", deserialize_with = "lenient_number")]
    pub labor_income: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationsProjection {
    pub table: Vec<OperationsYearRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationsYearRow {
    #[serde(deserialize_with = "lenient_label")]
    pub year: String,
    #[serde(deserialize_with = "lenient_number")]
    pub annual_output: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub jobs: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub labor_income: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityImpact {
    pub category: String,
    pub description: String,
}

impl ReportDocument {
    /// True when `value` is an object carrying at least one report section.
    /// Anything else (HTML-only flow output, arrays, strings) is not a document.
    pub fn is_document(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|fields| DOCUMENT_FIELDS.iter().any(|key| fields.contains_key(*key)))
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Annual job count from the operations table's total row.
    pub fn annual_jobs(&self) -> f64 {
        self.operations_impact
            .total_row()
            .map(|row| row.jobs)
            .unwrap_or_default()
    }

    pub fn annual_output(&self) -> f64 {
        self.operations_impact
            .total_row()
            .map(|row| row.output)
            .unwrap_or_default()
    }
}

// Model output mixes numbers, numeric strings ("1,250,000") and nulls.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_f64().unwrap_or_default(),
        Value::String(raw) => raw
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .unwrap_or_default(),
        _ => 0.0,
    })
}

fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => raw,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
