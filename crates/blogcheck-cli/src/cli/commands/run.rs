use blogcheck_client::contract::ContractSuite;
use blogcheck_client::ApiClient;

use super::report_error;
use crate::cli::args::{OutputFormat, RunArgs};
use crate::exit_codes::{CHECK_FAILED, SUCCESS};

pub async fn run(args: RunArgs, client: &ApiClient) -> anyhow::Result<i32> {
    let suite = match ContractSuite::builtin().select(&args.checks) {
        Ok(suite) => suite,
        Err(e) => return Ok(report_error(&e)),
    };

    let report = suite.run(client).await;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", report.render_text()),
    }

    Ok(if report.is_success() {
        SUCCESS
    } else {
        CHECK_FAILED
    })
}

pub fn list() -> anyhow::Result<i32> {
    for check in ContractSuite::builtin().checks() {
        println!("{}\t{} {}", check.name, check.method, check.path);
    }
    Ok(SUCCESS)
}
