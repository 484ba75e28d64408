//! Report boundary: the outbound narrative generator and local renderers for
//! its structured output.

mod client;
mod document;
mod render;

pub use client::{
    assemble_report, AssembledReport, GeneratedReport, ReportError, ReportGenerator, StackAiClient,
    EMPTY_REPORT_PLACEHOLDER,
};
pub use document::{
    CommunityImpact, CraIncrementRow, FiscalHighlights, ImpactRow, ImpactSection,
    OperationsProjection, OperationsYearRow, ReportDocument,
};
pub(crate) use render::escape_html;
pub use render::{
    format_currency, render_html, render_markdown, render_projection_markdown, wrap_report_html,
    RenderOptions, SourceNote,
};
