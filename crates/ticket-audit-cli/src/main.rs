use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;
use ticket_audit_core::AuditError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A `.env` in the working directory fills gaps; real variables win.
    dotenvy::dotenv().ok();

    // stdout carries progress lines; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            println!("fatal: {e:#}");
            e.downcast_ref::<AuditError>()
                .map(AuditError::exit_code)
                .unwrap_or(exit_codes::INTERNAL_ERROR)
        }
    };
    std::process::exit(code);
}
