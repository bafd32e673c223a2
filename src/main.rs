use cc_cli::{App, Config, DialoguerPrompt, HttpFetcher, Outcome, Reporter, WorkingDir};
use console::style;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(std::env::args_os());
    debug!(?config, "parsed arguments");

    // reqwest's blocking client must not run on an async worker.
    match tokio::task::spawn_blocking(move || run(config)).await {
        Ok(Ok(outcome)) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(Ok(_)) => ExitCode::FAILURE,
        Ok(Err(e)) => {
            eprintln!("{} {:#}", style("error:").red().bold().for_stderr(), e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "session task failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<Outcome> {
    let dir = WorkingDir::current()?;
    App::new(DialoguerPrompt::new(), HttpFetcher, dir, Reporter::stdio()).run(&config)
}
