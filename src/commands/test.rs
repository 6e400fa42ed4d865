use clap::Args;
use serde::Serialize;

use roadie::config::BuildContext;
use roadie::runner::LaunchReport;

use super::CmdResult;

#[derive(Args)]
pub struct TestArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutput {
    pub browser: LaunchReport,
    pub unit: LaunchReport,
}

/// Launch both test suites. The browser manifest preflight runs first, so
/// a missing manifest aborts before anything is spawned.
pub fn run(_args: TestArgs, ctx: &BuildContext) -> CmdResult<TestOutput> {
    let browser = super::browsertest::exec(ctx)?;
    let unit = super::unittest::exec(ctx)?;
    Ok((TestOutput { browser, unit }, 0))
}
