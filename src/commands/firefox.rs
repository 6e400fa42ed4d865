use clap::Args;

use roadie::config::BuildContext;
use roadie::package::{self, FirefoxArtifacts};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct FirefoxArgs {}

pub fn run(_args: FirefoxArgs, ctx: &BuildContext) -> CmdResult<FirefoxArtifacts> {
    let artifacts = exec(ctx)?;
    Ok((artifacts, 0))
}

pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<FirefoxArtifacts> {
    log_status!("firefox", "Building Firefox extension");
    super::production::exec(ctx)?;
    let build_number = super::buildnumber::exec(ctx)?;
    package::firefox(ctx, build_number)
}
