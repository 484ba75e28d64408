use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ImpactAnalysis, ImpactService, ImpactServiceError};
use crate::context::{AnalysisContext, ProjectInput};
use crate::error::AppError;
use crate::impact::ImpactAssumptions;
use crate::regional::Geography;
use crate::report::{
    escape_html, render_html, wrap_report_html, RenderOptions, ReportGenerator, SourceNote,
};

#[derive(Debug, Deserialize)]
pub struct ContextRequest {
    #[serde(default)]
    pub geography: Option<String>,
    pub input: ProjectInput,
}

#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub geography: Option<String>,
    pub input: ProjectInput,
    #[serde(default)]
    pub assumptions: ImpactAssumptions,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub project_name: String,
    pub geography: Geography,
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_json: Option<Value>,
    pub html: String,
}

/// Router exposing context, projection and report endpoints.
pub fn engine_router<G>(service: Arc<ImpactService<G>>) -> Router
where
    G: ReportGenerator + 'static,
{
    Router::new()
        .route("/api/v1/context", post(context_handler::<G>))
        .route("/api/v1/impact", post(impact_handler::<G>))
        .route("/api/v1/report", post(report_handler::<G>))
        .with_state(service)
}

impl From<ImpactServiceError> for AppError {
    fn from(value: ImpactServiceError) -> Self {
        match value {
            ImpactServiceError::Input(err) => AppError::Input(err),
            ImpactServiceError::Report(err) => AppError::Report(err),
        }
    }
}

pub(crate) async fn context_handler<G>(
    State(service): State<Arc<ImpactService<G>>>,
    Json(request): Json<ContextRequest>,
) -> Result<Json<AnalysisContext>, AppError>
where
    G: ReportGenerator + 'static,
{
    let geography = resolve_geography(&service, request.geography.as_deref())?;
    Ok(Json(service.context(&request.input, geography)?))
}

pub(crate) async fn impact_handler<G>(
    State(service): State<Arc<ImpactService<G>>>,
    Json(request): Json<ProjectRequest>,
) -> Result<Json<ImpactAnalysis>, AppError>
where
    G: ReportGenerator + 'static,
{
    let geography = resolve_geography(&service, request.geography.as_deref())?;
    let analysis = service.project(&request.input, geography, &request.assumptions)?;
    Ok(Json(analysis))
}

pub(crate) async fn report_handler<G>(
    State(service): State<Arc<ImpactService<G>>>,
    Json(request): Json<ContextRequest>,
) -> Result<Json<ReportResponse>, AppError>
where
    G: ReportGenerator + 'static,
{
    let geography = resolve_geography(&service, request.geography.as_deref())?;
    let outcome = service.report(&request.input, geography).await?;

    let project_name = outcome.context.project_name().to_string();
    let generated_on = Local::now().date_naive();
    let html = match &outcome.document {
        Some(document) => render_html(
            document,
            &RenderOptions {
                project_name: project_name.clone(),
                generated_on,
                sources: SourceNote::from_context(&outcome.context),
            },
        ),
        None if outcome.generated.html_sections => {
            wrap_report_html(&outcome.generated.report, &project_name, generated_on)
        }
        None => wrap_report_html(
            &format!("<pre>{}</pre>\n", escape_html(&outcome.generated.report)),
            &project_name,
            generated_on,
        ),
    };

    Ok(Json(ReportResponse {
        project_name,
        geography,
        report: outcome.generated.report,
        report_json: outcome.generated.report_json,
        html,
    }))
}

fn resolve_geography<G>(
    service: &ImpactService<G>,
    requested: Option<&str>,
) -> Result<Geography, AppError>
where
    G: ReportGenerator + 'static,
{
    match requested.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Ok(raw.parse::<Geography>()?),
        None => Ok(service.default_geography()),
    }
}
