use chrono::NaiveDate;
use cra_impact::context::CommunityBenefits;
use cra_impact::impact::{calculate_economic_impact, ImpactInputs};
use cra_impact::report::{
    render_html, render_markdown, render_projection_markdown, wrap_report_html, RenderOptions,
    ReportDocument, SourceNote,
};
use serde_json::json;

fn options() -> RenderOptions {
    RenderOptions {
        project_name: "Tom & Jerry's Cafe".to_string(),
        generated_on: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        sources: vec![SourceNote {
            label: "Economic Multipliers",
            note: "Lightcast 2025 <regional>".to_string(),
        }],
    }
}

fn document() -> ReportDocument {
    ReportDocument::from_value(json!({
        "executive_summary": "A <small> cafe & bakery.",
        "fiscal_highlights": {"year_1_cra_revenue": 1914.43, "ten_year_cumulative": 21940},
        "cra_increment_projection": [
            {"year": "Year 1", "taxable_value": 192000, "cra_increment": 1914.43, "cumulative": 1914.43},
            {"year": "Year 2", "taxable_value": 197760, "cra_increment": 1971.86, "cumulative": 3886.29}
        ],
        "construction_impact": {
            "narrative": "Six month build-out.",
            "table": [{"impact_type": "Direct", "economic_output": 500000, "jobs": 5, "earnings": 130000}]
        },
        "operations_impact": {
            "table": [
                {"impact_type": "Direct", "output": 200000, "jobs": 10, "labor_income": 312000},
                {"impact_type": "Total", "output": 304000, "jobs": 13.4, "labor_income": 439920}
            ]
        },
        "ten_year_operations_projection": {"table": [{"year": 1, "annual_output": 304000, "jobs": 13.4, "labor_income": 439920}]},
        "community_impacts": [{"category": "Walkability", "description": "Adds evening foot traffic."}]
    }))
    .expect("document parses")
}

#[test]
fn html_document_escapes_and_formats() {
    let html = render_html(&document(), &options());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Economic Impact Report - Tom &amp; Jerry&#39;s Cafe</title>"));
    assert!(html.contains("A &lt;small&gt; cafe &amp; bakery."));
    assert!(html.contains("$1,914"));
    assert!(html.contains("$21,940"));
    assert!(html.contains("<td>Year 2</td><td>$197,760</td><td>$1,972</td><td>$3,886</td>"));
    assert!(html.contains("<span class='metric-value'>13.4</span>"));
    assert!(html.contains("<span class='metric-value'>$304,000</span>"));
    assert!(html.contains("<td>Direct</td><td>$500,000</td><td>5.0</td><td>$130,000</td>"));
    assert!(html.contains("Lightcast 2025 &lt;regional&gt;"));
    assert!(html.contains("Generated March 14, 2025"));
}

#[test]
fn empty_sections_are_omitted() {
    let html = render_html(&ReportDocument::default(), &options());

    assert!(!html.contains("CRA Tax Increment"));
    assert!(!html.contains("Ten-Year Operations Projection"));
    assert!(html.contains("Sources &amp; Methodology"));
    assert!(html.contains("<span class='metric-value'>$0</span>"));
}

#[test]
fn markdown_mirrors_document_sections() {
    let markdown = render_markdown(&document(), &options());

    assert!(markdown.starts_with("# Economic Impact Report: Tom & Jerry's Cafe"));
    assert!(markdown.contains("| 10-Year Cumulative | $21,940 |"));
    assert!(markdown.contains("| Year 1 | $192,000 | $1,914 | $1,914 |"));
    assert!(markdown.contains("### Walkability"));
    assert!(markdown.contains("- **Economic Multipliers:** Lightcast 2025 <regional>"));
    assert!(markdown.contains("_Generated 2025-03-14_"));
}

#[test]
fn wrapped_fragments_keep_markup() {
    let html = wrap_report_html(
        "<p>Summary</p>\n\n<table></table>",
        "Downtown Cafe",
        NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date"),
    );

    assert!(html.contains("<p>Summary</p>\n\n<table></table>"));
    assert!(html.contains("<strong>Downtown Cafe</strong>"));
    assert!(html.contains("Generated January 02, 2025"));
}

#[test]
fn projection_summary_lists_core_figures() {
    let projection = calculate_economic_impact(&ImpactInputs {
        total_investment: 500_000.0,
        cra_incentive: 100_000.0,
        private_funding: 400_000.0,
        construction_jobs: 5.0,
        construction_avg_wage: 25.0,
        permanent_jobs: 10.0,
        permanent_avg_wage: 30_000.0 / 2080.0,
        construction_duration_months: 6.0,
        analysis_period_years: 10,
        annual_operating_costs: 50_000.0,
        annual_revenue: 200_000.0,
        property_value_increase: 300_000.0,
        property_tax_rate: 1.5,
        local_procurement_pct: 60.0,
        employment_multiplier: 1.38,
        income_multiplier: 1.45,
        output_multiplier: 1.58,
        sales_tax_rate: 7.0,
        community_benefits: CommunityBenefits::default(),
    });

    let markdown = render_projection_markdown(&projection, "Downtown Cafe");

    assert!(markdown.starts_with("# Economic Impact Projection: Downtown Cafe"));
    assert!(markdown.contains("| Construction | 5.0 | 1.9 | 6.9 |"));
    assert!(markdown.contains("| Permanent | 10.0 | 3.8 | 13.8 |"));
    assert!(markdown.contains("| Total output | $790,000 |"));
    assert!(markdown.contains("| Property tax | $4,500 | $45,000 |"));
    assert!(markdown.contains("| Total permanent income (10 years) | $4,350,000 |"));
    assert!(markdown.contains("- ROI ratio: 1.50"));
    assert!(markdown.contains("- Leverage ratio: 4.00"));
}
