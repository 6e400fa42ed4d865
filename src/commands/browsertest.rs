use clap::Args;

use roadie::config::BuildContext;
use roadie::runner::{self, LaunchReport};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct BrowsertestArgs {}

pub fn run(_args: BrowsertestArgs, ctx: &BuildContext) -> CmdResult<LaunchReport> {
    let report = exec(ctx)?;
    Ok((report, 0))
}

pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<LaunchReport> {
    log_status!("browsertest", "Running browser tests");
    runner::browser_tests(ctx)
}
