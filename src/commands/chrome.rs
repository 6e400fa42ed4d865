use clap::Args;

use roadie::config::BuildContext;
use roadie::package::{self, ChromeArtifacts};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct ChromeArgs {}

pub fn run(_args: ChromeArgs, ctx: &BuildContext) -> CmdResult<ChromeArtifacts> {
    let artifacts = exec(ctx)?;
    Ok((artifacts, 0))
}

pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<ChromeArtifacts> {
    log_status!("chrome", "Building Chrome extension");
    super::production::exec(ctx)?;
    let build_number = super::buildnumber::exec(ctx)?;
    package::chrome(ctx, build_number)
}
