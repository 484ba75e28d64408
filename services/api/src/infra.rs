use cra_impact::config::AppConfig;
use cra_impact::error::AppError;
use cra_impact::regional::{Geography, RegionalTables};
use cra_impact::report::StackAiClient;
use cra_impact::service::ImpactService;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) type EngineService = ImpactService<StackAiClient>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine wired to the embedded tables and, when credentials exist, the
/// Stack AI report flow.
pub(crate) fn build_service(config: &AppConfig) -> Result<Arc<EngineService>, AppError> {
    let tables = Arc::new(RegionalTables::embedded()?);

    let generator = match &config.report {
        Some(report) => {
            let client = StackAiClient::new(report)?;
            info!(endpoint = client.endpoint(), "report generation enabled");
            Some(Arc::new(client))
        }
        None => {
            warn!("STACK_AI_API_KEY or STACK_AI_FLOW_ID not set; report generation disabled");
            None
        }
    };

    Ok(Arc::new(
        ImpactService::new(tables, generator).with_default_geography(config.default_geography),
    ))
}

/// Offline engine for CLI commands that never call the report flow.
pub(crate) fn offline_service(default_geography: Geography) -> Result<EngineService, AppError> {
    let tables = Arc::new(RegionalTables::embedded()?);
    Ok(ImpactService::new(tables, None).with_default_geography(default_geography))
}

pub(crate) fn parse_geography(raw: &str) -> Result<Geography, String> {
    raw.parse::<Geography>().map_err(|err| err.to_string())
}

pub(crate) fn read_json<T>(path: &Path) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
