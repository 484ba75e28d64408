use crate::infra::{offline_service, parse_geography, read_json};
use chrono::Local;
use clap::{Args, ValueEnum};
use cra_impact::config::AppConfig;
use cra_impact::context::{AnalysisContext, CommunityBenefits, ProjectInput, Tenure};
use cra_impact::error::AppError;
use cra_impact::impact::ImpactAssumptions;
use cra_impact::regional::Geography;
use cra_impact::report::{
    format_currency, render_html, render_markdown, render_projection_markdown, RenderOptions,
    ReportDocument, SourceNote,
};
use cra_impact::service::ImpactAnalysis;
use serde_json::Value;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ContextArgs {
    /// Project input JSON file
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Geography slug (defaults to CRA_DEFAULT_GEOGRAPHY)
    #[arg(long, value_parser = parse_geography)]
    pub(crate) geography: Option<Geography>,
}

#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Project input JSON file
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Geography slug (defaults to CRA_DEFAULT_GEOGRAPHY)
    #[arg(long, value_parser = parse_geography)]
    pub(crate) geography: Option<Geography>,
    /// Construction job count for the build-out
    #[arg(long, default_value_t = 0.0)]
    pub(crate) construction_jobs: f64,
    /// Hourly construction wage
    #[arg(long, default_value_t = 0.0)]
    pub(crate) construction_wage: f64,
    /// Analysis period in years
    #[arg(long, default_value_t = 10)]
    pub(crate) analysis_period: u32,
    #[arg(long, value_enum, default_value_t = ProjectionFormat::Json)]
    pub(crate) format: ProjectionFormat,
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Structured report JSON (the flow output or a saved report response)
    #[arg(long)]
    pub(crate) report: PathBuf,
    #[arg(long)]
    pub(crate) project_name: String,
    /// Optional analysis context JSON used for source attribution
    #[arg(long)]
    pub(crate) context: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = DocumentFormat::Html)]
    pub(crate) format: DocumentFormat,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Geography slug for the sample project
    #[arg(long, value_parser = parse_geography)]
    pub(crate) geography: Option<Geography>,
    /// Construction job count assumed for the build-out
    #[arg(long, default_value_t = 5.0)]
    pub(crate) construction_jobs: f64,
    /// Hourly construction wage assumed for the build-out
    #[arg(long, default_value_t = 25.0)]
    pub(crate) construction_wage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProjectionFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DocumentFormat {
    Html,
    Markdown,
}

pub(crate) fn run_context(args: ContextArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = offline_service(config.default_geography)?;
    let input: ProjectInput = read_json(&args.input)?;
    let geography = args.geography.unwrap_or(config.default_geography);

    let context = service.context(&input, geography)?;
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}

pub(crate) fn run_project(args: ProjectArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = offline_service(config.default_geography)?;
    let input: ProjectInput = read_json(&args.input)?;
    let geography = args.geography.unwrap_or(config.default_geography);
    let assumptions = ImpactAssumptions {
        construction_jobs: args.construction_jobs,
        construction_avg_wage: args.construction_wage,
        analysis_period_years: args.analysis_period,
        ..ImpactAssumptions::default()
    };

    let analysis = service.project(&input, geography, &assumptions)?;
    match args.format {
        ProjectionFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        ProjectionFormat::Markdown => println!(
            "{}",
            render_projection_markdown(&analysis.projection, analysis.context.project_name())
        ),
    }
    Ok(())
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        report,
        project_name,
        context,
        format,
    } = args;

    let mut payload: Value = read_json(&report)?;
    // Saved /api/v1/report responses nest the structured output.
    if let Some(nested) = payload.get_mut("report_json").map(Value::take) {
        payload = nested;
    }
    if !ReportDocument::is_document(&payload) {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} carries no report sections", report.display()),
        )));
    }
    let document = ReportDocument::from_value(payload)?;

    let sources = match context {
        Some(path) => {
            let context: AnalysisContext = read_json(&path)?;
            SourceNote::from_context(&context)
        }
        None => Vec::new(),
    };
    let options = RenderOptions {
        project_name,
        generated_on: Local::now().date_naive(),
        sources,
    };

    match format {
        DocumentFormat::Html => println!("{}", render_html(&document, &options)),
        DocumentFormat::Markdown => println!("{}", render_markdown(&document, &options)),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let geography = args.geography.unwrap_or(Geography::HomesteadCra);
    let service = offline_service(geography)?;
    let assumptions = ImpactAssumptions {
        construction_jobs: args.construction_jobs,
        construction_avg_wage: args.construction_wage,
        ..ImpactAssumptions::default()
    };

    let input = sample_project();
    let analysis = service.project(&input, geography, &assumptions)?;

    println!("=== Economic Impact Demo ===");
    println!(
        "Regional tables {} | {}",
        service.tables().version(),
        geography.label()
    );
    println!();
    render_context_summary(&analysis);
    println!();
    println!(
        "{}",
        render_projection_markdown(&analysis.projection, analysis.context.project_name())
    );

    Ok(())
}

fn render_context_summary(analysis: &ImpactAnalysis) {
    let context = &analysis.context;
    let project = &context.project_inputs;
    let multipliers = &context.economic_multipliers;
    let real_estate = &context.real_estate;
    let fiscal = &context.fiscal_parameters;

    println!("Project: {} ({})", project.project_name, project.address);
    println!(
        "Proposed use: {} | Tenure: {}",
        project.proposed_use,
        project.tenure.label()
    );
    println!(
        "Investment: {} total, {} CRA request",
        format_currency(project.total_development_cost),
        format_currency(project.funding_request)
    );
    println!(
        "Industry: {} (NAICS {}){}",
        multipliers.industry_name,
        multipliers.naics_code,
        if multipliers.default_applied {
            " [default row]"
        } else {
            ""
        }
    );
    println!(
        "  Multipliers -> output {:.2}, employment {:.2}, earnings {:.2}",
        multipliers.output_multiplier,
        multipliers.employment_multiplier,
        multipliers.earnings_multiplier
    );
    println!(
        "Real estate: {} at ${:.2}/sf, {:.0}% occupied",
        real_estate.property_type,
        real_estate.avg_rent_psf,
        real_estate.occupancy_rate * 100.0
    );
    if fiscal.applicable {
        println!(
            "Fiscal: {:.4} combined millage, {:.0}% CRA capture",
            fiscal.combined_millage,
            fiscal.cra_capture_rate * 100.0
        );
    } else {
        println!("Fiscal: no local millage data for {}", context.geography_display);
    }
    println!(
        "Calculator inputs: {:.1} permanent FTE at ${:.2}/hr, {} property value increase",
        analysis.inputs.permanent_jobs,
        analysis.inputs.permanent_avg_wage,
        format_currency(analysis.inputs.property_value_increase)
    );
}

fn sample_project() -> ProjectInput {
    ProjectInput {
        project_name: "Downtown Cafe".to_string(),
        address: "41 N Krome Ave, Homestead, FL 33030".to_string(),
        building_size: 2400.0,
        parcel_size: 6000.0,
        proposed_use: "Downtown Cafe".to_string(),
        tenure: Tenure::Rent,
        total_development_cost: 500_000.0,
        hard_costs: 320_000.0,
        soft_costs: 60_000.0,
        financing_costs: 40_000.0,
        ffe_costs: 80_000.0,
        construction_duration_months: 6.0,
        full_time_jobs: 8,
        part_time_jobs: 4,
        average_wage: 30_000.0,
        occupancy_capacity: 60,
        table_count: 14,
        annual_revenue: 200_000.0,
        annual_expenses: 50_000.0,
        annual_rent: 54_000.0,
        rent_per_sf: 22.5,
        funding_request: 100_000.0,
        community_benefits: CommunityBenefits {
            public_space_sqft: 400,
            ..CommunityBenefits::default()
        },
        ..ProjectInput::default()
    }
}
