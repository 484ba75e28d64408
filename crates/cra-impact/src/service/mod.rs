//! Engine facade composing the regional tables, the context builder, the
//! calculator and the optional narrative report generator.

pub mod router;

use crate::context::{AnalysisContext, ContextBuilder, InputError, ProjectInput};
use crate::impact::{calculate_economic_impact, ImpactAssumptions, ImpactInputs, ImpactProjection};
use crate::regional::{Geography, RegionalTables};
use crate::report::{GeneratedReport, ReportDocument, ReportError, ReportGenerator};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub use router::engine_router;

#[derive(Debug, thiserror::Error)]
pub enum ImpactServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Context, calculator inputs and projection for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactAnalysis {
    pub context: AnalysisContext,
    pub inputs: ImpactInputs,
    pub projection: ImpactProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutcome {
    pub context: AnalysisContext,
    pub generated: GeneratedReport,
    /// Typed view of the structured output, when the flow returned one that
    /// fits the document shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<ReportDocument>,
}

pub struct ImpactService<G> {
    builder: ContextBuilder,
    generator: Option<Arc<G>>,
    default_geography: Geography,
}

impl<G> ImpactService<G>
where
    G: ReportGenerator + 'static,
{
    pub fn new(tables: Arc<RegionalTables>, generator: Option<Arc<G>>) -> Self {
        Self {
            builder: ContextBuilder::new(tables),
            generator,
            default_geography: Geography::HomesteadCra,
        }
    }

    pub fn with_default_geography(mut self, geography: Geography) -> Self {
        self.default_geography = geography;
        self
    }

    pub fn default_geography(&self) -> Geography {
        self.default_geography
    }

    pub fn tables(&self) -> &RegionalTables {
        self.builder.tables()
    }

    pub fn context(
        &self,
        input: &ProjectInput,
        geography: Geography,
    ) -> Result<AnalysisContext, ImpactServiceError> {
        input.validate()?;
        Ok(self.builder.build(input, geography))
    }

    pub fn project(
        &self,
        input: &ProjectInput,
        geography: Geography,
        assumptions: &ImpactAssumptions,
    ) -> Result<ImpactAnalysis, ImpactServiceError> {
        let context = self.context(input, geography)?;
        let inputs = ImpactInputs::from_context(&context, assumptions);
        inputs.validate()?;
        let projection = calculate_economic_impact(&inputs);

        Ok(ImpactAnalysis {
            context,
            inputs,
            projection,
        })
    }

    pub async fn report(
        &self,
        input: &ProjectInput,
        geography: Geography,
    ) -> Result<ReportOutcome, ImpactServiceError> {
        let generator = self.generator.as_ref().ok_or(ReportError::NotConfigured)?;
        let context = self.context(input, geography)?;
        let generated = generator.generate(&context).await?;

        let structured = generated
            .report_json
            .as_ref()
            .filter(|value| ReportDocument::is_document(value))
            .cloned();
        let document = match structured.map(ReportDocument::from_value) {
            Some(Ok(document)) => Some(document),
            Some(Err(err)) => {
                warn!(error = %err, "structured report does not match the document layout");
                None
            }
            None => None,
        };

        Ok(ReportOutcome {
            context,
            generated,
            document,
        })
    }
}
