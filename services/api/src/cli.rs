use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_funnel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruiting Funnel Dashboard",
    about = "Compute and serve recruiting-funnel reports from the command line",
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
    /// Compute a funnel report from a sheet export and print it
    Report(ReportArgs),
    /// Run the report pipeline over a bundled sample export
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
        // The report command may fetch over blocking HTTP, so it leaves the
        // async runtime's worker threads alone.
        Command::Report(args) => {
            tokio::task::spawn_blocking(move || run_report(args))
                .await
                .map_err(|err| AppError::Server(axum::Error::new(err)))?
        }
        Command::Demo(args) => run_demo(args),
    }
}
