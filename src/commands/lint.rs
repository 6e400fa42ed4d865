use clap::Args;

use roadie::config::BuildContext;
use roadie::runner::{self, LintReport};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct LintArgs {}

/// Style-check all matched files. Exit code 1 when any file fails; passing
/// files produce no output.
pub fn run(_args: LintArgs, ctx: &BuildContext) -> CmdResult<LintReport> {
    log_status!("lint", "Linting JS files");
    let report = runner::lint(ctx)?;
    let exit_code = if report.failed > 0 { 1 } else { 0 };
    Ok((report, exit_code))
}
