use std::process;

use penpost::{
    application::error::AppError,
    cli::{self, Ctx},
    config,
    infra::telemetry,
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    // User-facing notices bypass the log filter.
    if let AppError::Rejected(message) = error {
        eprintln!("{message}");
        return;
    }

    if dispatcher::has_been_set() {
        error!(error = %error, "command failed");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "command failed");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let ctx = Ctx::from_settings(settings)?;
    let mut stdin = std::io::stdin().lock();
    cli::handle(&ctx, cli_args.command, &mut stdin).await
}
