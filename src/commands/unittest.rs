use clap::Args;

use roadie::config::BuildContext;
use roadie::runner::{self, LaunchReport};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct UnittestArgs {}

pub fn run(_args: UnittestArgs, ctx: &BuildContext) -> CmdResult<LaunchReport> {
    let report = exec(ctx)?;
    Ok((report, 0))
}

pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<LaunchReport> {
    log_status!("unittest", "Running unit tests");
    runner::unit_tests(ctx)
}
