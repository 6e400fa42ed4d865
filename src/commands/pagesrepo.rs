use clap::Args;

use roadie::config::BuildContext;
use roadie::pages::{self, PagesReport};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct PagesrepoArgs {}

pub fn run(_args: PagesrepoArgs, ctx: &BuildContext) -> CmdResult<PagesReport> {
    let report = exec(ctx)?;
    Ok((report, 0))
}

pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<PagesReport> {
    log_status!("pages", "Preparing pages checkout");
    pages::ensure_pages_checkout(ctx)
}
