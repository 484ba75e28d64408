use crate::demo::{
    run_context, run_demo, run_project, run_render, ContextArgs, DemoArgs, ProjectArgs,
    RenderArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cra_impact::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CRA Economic Impact Engine",
    about = "Project the economic impact of community redevelopment incentives",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the analysis context assembled for a project input file
    Context(ContextArgs),
    /// Calculate the impact projection for a project input file
    Project(ProjectArgs),
    /// Render a structured report payload as HTML or Markdown
    Render(RenderArgs),
    /// Run the sample downtown cafe project end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Context(args) => run_context(args),
        Command::Project(args) => run_project(args),
        Command::Render(args) => run_render(args),
        Command::Demo(args) => run_demo(args),
    }
}
