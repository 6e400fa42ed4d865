use clap::Args;

use roadie::config::BuildContext;
use roadie::runner::{self, LaunchReport};
use roadie::log_status;

use super::CmdResult;

#[derive(Args)]
pub struct ServerArgs {}

pub fn run(_args: ServerArgs, ctx: &BuildContext) -> CmdResult<LaunchReport> {
    log_status!("server", "Starting local server");
    let report = runner::dev_server(ctx)?;
    Ok((report, 0))
}
