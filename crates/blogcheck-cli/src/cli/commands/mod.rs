use super::args::*;

pub mod posts;
pub mod run;
pub mod users;

use blogcheck_client::{ApiClient, ApiError};

use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let client = match ApiClient::new(cli.conn.to_config()) {
        Ok(client) => client,
        Err(e) => return Ok(report_error(&e)),
    };
    tracing::debug!(url = %client.base_url(), "client configured");

    match cli.cmd {
        Command::Run(args) => run::run(args, &client).await,
        Command::List => run::list(),
        Command::Users(args) => users::run(args, &client).await,
        Command::Posts(args) => posts::run(args, &client).await,
    }
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json(value: &serde_json::Value) -> anyhow::Result<i32> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(SUCCESS)
}

pub(crate) fn report_error(err: &ApiError) -> i32 {
    eprintln!("error: {err}");
    err.exit_code()
}
