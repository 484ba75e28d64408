use super::document::{ImpactSection, ReportDocument};
use crate::context::AnalysisContext;
use crate::impact::ImpactProjection;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

const METHODOLOGY: &str = "This analysis uses economic modeling based on the EMSI Type II methodology, capturing direct effects, indirect effects (supply chain), and induced effects (household spending).";

const STYLESHEET: &str = r#"@page { size: Letter; margin: 0.75in; @bottom-right { content: "Page " counter(page) " of " counter(pages); font-size: 9pt; color: #666; } }
body { font-family: -apple-system, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif; font-size: 10pt; line-height: 1.5; color: #333; }
h1 { color: #1f4788; font-size: 22pt; margin-top: 0; border-bottom: 3px solid #1f4788; padding-bottom: 10px; }
h2 { color: #1f4788; font-size: 14pt; margin-top: 25px; margin-bottom: 10px; border-bottom: 2px solid #ddd; padding-bottom: 5px; }
h3 { color: #2c5aa0; font-size: 11pt; margin-top: 15px; margin-bottom: 8px; }
table { width: 100%; border-collapse: collapse; margin: 15px 0; font-size: 9pt; }
th { background-color: #1f4788; color: white; padding: 8px; text-align: left; font-weight: 600; }
td { padding: 6px 8px; border-bottom: 1px solid #ddd; }
tr:nth-child(even) { background-color: #f9f9f9; }
p { margin: 8px 0; text-align: justify; }
.metrics-grid { display: flex; flex-wrap: wrap; gap: 15px; margin: 15px 0; }
.metric { background: #f5f7fa; border-left: 4px solid #1f4788; padding: 10px 15px; flex: 1; min-width: 150px; }
.metric-label { display: block; font-size: 9pt; color: #666; margin-bottom: 5px; }
.metric-value { display: block; font-size: 14pt; font-weight: bold; color: #1f4788; }
.footer { margin-top: 30px; padding-top: 15px; border-top: 2px solid #ddd; font-size: 8pt; color: #666; text-align: center; }"#;

/// Attribution line listed under "Sources & Methodology".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceNote {
    pub label: &'static str,
    pub note: String,
}

impl SourceNote {
    pub fn from_context(context: &AnalysisContext) -> Vec<Self> {
        vec![
            Self {
                label: "Economic Multipliers",
                note: context.economic_multipliers.source.clone(),
            },
            Self {
                label: "Demographics",
                note: context.demographics.source.clone(),
            },
            Self {
                label: "Real Estate Data",
                note: context.real_estate.source.clone(),
            },
            Self {
                label: "Fiscal Parameters",
                note: context.fiscal_parameters.source.clone(),
            },
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub project_name: String,
    pub generated_on: NaiveDate,
    pub sources: Vec<SourceNote>,
}

/// Complete, print-ready HTML document for a structured report.
pub fn render_html(document: &ReportDocument, options: &RenderOptions) -> String {
    let mut body = String::new();

    body.push_str("<h2>Executive Summary</h2>\n");
    writeln!(body, "<p>{}</p>", escape_html(&document.executive_summary)).expect("summary");

    let fiscal = &document.fiscal_highlights;
    body.push_str("<h2>Key Metrics at a Glance</h2>\n<div class='metrics-grid'>\n");
    push_metric(
        &mut body,
        "Year 1 CRA Revenue",
        &format_currency(fiscal.year_1_cra_revenue),
    );
    push_metric(
        &mut body,
        "10-Year Cumulative",
        &format_currency(fiscal.ten_year_cumulative),
    );
    push_metric(
        &mut body,
        "Jobs Created (Annual)",
        &format!("{:.1}", document.annual_jobs()),
    );
    push_metric(
        &mut body,
        "Annual Economic Output",
        &format_currency(document.annual_output()),
    );
    body.push_str("</div>\n");

    if !document.cra_increment_projection.is_empty() {
        body.push_str("<h2>Fiscal Impact: CRA Tax Increment</h2>\n<table>\n");
        body.push_str(
            "<tr><th>Year</th><th>Taxable Value</th><th>CRA Increment</th><th>Cumulative</th></tr>\n",
        );
        for row in &document.cra_increment_projection {
            writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&row.year),
                format_currency(row.taxable_value),
                format_currency(row.cra_increment),
                format_currency(row.cumulative)
            )
            .expect("increment row");
        }
        body.push_str("</table>\n");
    }

    push_impact_section(
        &mut body,
        "Construction Phase (One-Time)",
        &document.construction_impact,
    );
    push_impact_section(
        &mut body,
        "Operations Phase (Recurring Annual)",
        &document.operations_impact,
    );

    let ten_year = &document.ten_year_operations_projection.table;
    if !ten_year.is_empty() {
        body.push_str("<h2>Ten-Year Operations Projection</h2>\n<table>\n");
        body.push_str(
            "<tr><th>Year</th><th>Annual Output</th><th>Jobs</th><th>Labor Income</th></tr>\n",
        );
        for row in ten_year {
            writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td></tr>",
                escape_html(&row.year),
                format_currency(row.annual_output),
                row.jobs,
                format_currency(row.labor_income)
            )
            .expect("projection row");
        }
        body.push_str("</table>\n");
    }

    if !document.community_impacts.is_empty() {
        body.push_str("<h2>Community and Qualitative Impacts</h2>\n");
        for impact in &document.community_impacts {
            writeln!(
                body,
                "<h3>{}</h3>\n<p>{}</p>",
                escape_html(&impact.category),
                escape_html(&impact.description)
            )
            .expect("community impact");
        }
    }

    body.push_str("<h2>Sources &amp; Methodology</h2>\n");
    if !options.sources.is_empty() {
        body.push_str("<p><strong>Data Sources:</strong></p>\n<ul>\n");
        for source in &options.sources {
            writeln!(
                body,
                "<li><strong>{}:</strong> {}</li>",
                source.label,
                escape_html(&source.note)
            )
            .expect("source item");
        }
        body.push_str("</ul>\n");
    }
    writeln!(body, "<p><strong>Methodology:</strong> {METHODOLOGY}</p>").expect("methodology");

    wrap_document(&options.project_name, &body, options.generated_on)
}

/// Wraps already-rendered HTML fragments (the generation service's display
/// report) in the document template.
pub fn wrap_report_html(fragments: &str, project_name: &str, generated_on: NaiveDate) -> String {
    wrap_document(project_name, fragments, generated_on)
}

pub fn render_markdown(document: &ReportDocument, options: &RenderOptions) -> String {
    let mut md = String::new();
    writeln!(md, "# Economic Impact Report: {}\n", options.project_name).expect("title");

    md.push_str("## Executive Summary\n\n");
    writeln!(md, "{}\n", document.executive_summary).expect("summary");

    let fiscal = &document.fiscal_highlights;
    md.push_str("## Key Metrics at a Glance\n\n| Metric | Value |\n| --- | --- |\n");
    writeln!(
        md,
        "| Year 1 CRA Revenue | {} |",
        format_currency(fiscal.year_1_cra_revenue)
    )
    .expect("metric");
    writeln!(
        md,
        "| 10-Year Cumulative | {} |",
        format_currency(fiscal.ten_year_cumulative)
    )
    .expect("metric");
    writeln!(md, "| Jobs Created (Annual) | {:.1} |", document.annual_jobs()).expect("metric");
    writeln!(
        md,
        "| Annual Economic Output | {} |\n",
        format_currency(document.annual_output())
    )
    .expect("metric");

    if !document.cra_increment_projection.is_empty() {
        md.push_str("## Fiscal Impact: CRA Tax Increment\n\n");
        md.push_str("| Year | Taxable Value | CRA Increment | Cumulative |\n| --- | --- | --- | --- |\n");
        for row in &document.cra_increment_projection {
            writeln!(
                md,
                "| {} | {} | {} | {} |",
                row.year,
                format_currency(row.taxable_value),
                format_currency(row.cra_increment),
                format_currency(row.cumulative)
            )
            .expect("increment row");
        }
        md.push('\n');
    }

    for (heading, section) in [
        ("Construction Phase (One-Time)", &document.construction_impact),
        ("Operations Phase (Recurring Annual)", &document.operations_impact),
    ] {
        writeln!(md, "## {heading}\n").expect("heading");
        if !section.narrative.is_empty() {
            writeln!(md, "{}\n", section.narrative).expect("narrative");
        }
        if !section.table.is_empty() {
            md.push_str("| Impact Type | Output | Jobs | Labor Income |\n| --- | --- | --- | --- |\n");
            for row in &section.table {
                writeln!(
                    md,
                    "| {} | {} | {:.1} | {} |",
                    row.impact_type,
                    format_currency(row.output),
                    row.jobs,
                    format_currency(row.labor_income)
                )
                .expect("impact row");
            }
            md.push('\n');
        }
    }

    if !document.community_impacts.is_empty() {
        md.push_str("## Community and Qualitative Impacts\n\n");
        for impact in &document.community_impacts {
            writeln!(md, "### {}\n\n{}\n", impact.category, impact.description)
                .expect("community impact");
        }
    }

    md.push_str("## Sources & Methodology\n\n");
    for source in &options.sources {
        writeln!(md, "- **{}:** {}", source.label, source.note).expect("source");
    }
    writeln!(md, "\n{METHODOLOGY}\n\n_Generated {}_", options.generated_on).expect("footer");

    md
}

/// Local summary of calculator output, used when no narrative service is
/// configured.
pub fn render_projection_markdown(projection: &ImpactProjection, project_name: &str) -> String {
    let period = projection.analysis_period_years;
    let mut md = String::new();
    writeln!(md, "# Economic Impact Projection: {project_name}\n").expect("title");

    md.push_str("## Employment\n\n| Phase | Direct | Indirect & Induced | Total |\n| --- | --- | --- | --- |\n");
    writeln!(
        md,
        "| Construction | {:.1} | {:.1} | {:.1} |",
        projection.direct_jobs_construction,
        projection.indirect_jobs_construction,
        projection.total_jobs_construction
    )
    .expect("construction jobs");
    writeln!(
        md,
        "| Permanent | {:.1} | {:.1} | {:.1} |\n",
        projection.direct_jobs_permanent,
        projection.indirect_jobs_permanent,
        projection.total_jobs_permanent
    )
    .expect("permanent jobs");

    md.push_str("## Labor Income\n\n| Measure | Amount |\n| --- | --- |\n");
    for (label, value) in [
        ("Direct construction income", projection.direct_construction_income),
        ("Total construction income", projection.total_construction_income),
        (
            "Direct permanent income (annual)",
            projection.direct_permanent_income_annual,
        ),
        (
            "Total permanent income (annual)",
            projection.total_permanent_income_annual,
        ),
    ] {
        writeln!(md, "| {label} | {} |", format_currency(value)).expect("income row");
    }
    writeln!(
        md,
        "| Total permanent income ({period} years) | {} |",
        format_currency(projection.total_permanent_income_period)
    )
    .expect("income row");
    writeln!(
        md,
        "| Total income, all sources | {} |\n",
        format_currency(projection.total_income_all_sources)
    )
    .expect("income row");

    md.push_str("## Economic Output\n\n| Measure | Amount |\n| --- | --- |\n");
    writeln!(md, "| Direct output | {} |", format_currency(projection.direct_output))
        .expect("output row");
    writeln!(
        md,
        "| Indirect & induced output | {} |",
        format_currency(projection.indirect_induced_output)
    )
    .expect("output row");
    writeln!(md, "| Total output | {} |\n", format_currency(projection.total_output))
        .expect("output row");

    md.push_str("## Tax Revenue\n\n| Source | Annual | Period |\n| --- | --- | --- |\n");
    writeln!(
        md,
        "| Property tax | {} | {} |",
        format_currency(projection.annual_property_tax),
        format_currency(projection.total_property_tax_period)
    )
    .expect("tax row");
    writeln!(
        md,
        "| Sales tax | {} | {} |",
        format_currency(projection.annual_sales_tax),
        format_currency(projection.total_sales_tax_period)
    )
    .expect("tax row");
    writeln!(
        md,
        "| Combined | {} | {} |\n",
        format_currency(projection.annual_tax_revenue),
        format_currency(projection.total_tax_revenue_period)
    )
    .expect("tax row");

    md.push_str("## Return on Incentive\n\n");
    writeln!(md, "- ROI ratio: {:.2}", projection.roi_ratio).expect("roi");
    writeln!(md, "- Payback period: {:.1} years", projection.payback_years).expect("payback");
    writeln!(md, "- Leverage ratio: {:.2}", projection.leverage_ratio).expect("leverage");

    let benefits = &projection.community_benefits;
    md.push_str("\n## Community Benefits\n\n");
    writeln!(
        md,
        "- Affordable housing units: {}\n- Public space: {} sq ft\n- Parking spaces: {}\n- Retail units: {}",
        benefits.affordable_housing_units,
        benefits.public_space_sqft,
        benefits.parking_spaces,
        benefits.retail_units
    )
    .expect("benefits");

    md
}

/// Whole-dollar currency with thousands separators, e.g. `$1,234,568`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}")
}

fn push_metric(html: &mut String, label: &str, value: &str) {
    writeln!(
        html,
        "<div class='metric'><span class='metric-label'>{label}</span><span class='metric-value'>{value}</span></div>"
    )
    .expect("metric");
}

fn push_impact_section(html: &mut String, heading: &str, section: &ImpactSection) {
    writeln!(html, "<h2>{heading}</h2>").expect("section heading");
    if !section.narrative.is_empty() {
        writeln!(html, "<p>{}</p>", escape_html(&section.narrative)).expect("narrative");
    }
    if section.table.is_empty() {
        return;
    }

    html.push_str(
        "<table>\n<tr><th>Impact Type</th><th>Output</th><th>Jobs</th><th>Labor Income</th></tr>\n",
    );
    for row in &section.table {
        writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td></tr>",
            escape_html(&row.impact_type),
            format_currency(row.output),
            row.jobs,
            format_currency(row.labor_income)
        )
        .expect("impact row");
    }
    html.push_str("</table>\n");
}

fn wrap_document(project_name: &str, body: &str, generated_on: NaiveDate) -> String {
    let project_name = escape_html(project_name);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>Economic Impact Report - {project_name}</title>\n<style>\n{STYLESHEET}\n</style>\n</head>\n<body>\n<h1>Economic Impact Report</h1>\n<p style=\"font-size: 12pt; color: #1f4788; margin-bottom: 20px;\"><strong>{project_name}</strong></p>\n{body}<div class=\"footer\"><p>Generated {}</p></div>\n</body>\n</html>\n",
        generated_on.format("%B %d, %Y")
    )
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(790000.0), "$790,000");
        assert_eq!(format_currency(1234567.89), "$1,234,568");
        assert_eq!(format_currency(-45000.0), "-$45,000");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("Tom & Jerry's <Cafe>"),
            "Tom &amp; Jerry&#39;s &lt;Cafe&gt;"
        );
    }
}
