use clap::Args;
use serde::Serialize;

use roadie::config::BuildContext;
use roadie::{bundle, log_status};

use super::CmdResult;

#[derive(Args)]
pub struct ViewerArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerOutput {
    pub viewer: String,
}

pub fn run(_args: ViewerArgs, ctx: &BuildContext) -> CmdResult<ViewerOutput> {
    let viewer = exec(ctx)?;
    Ok((ViewerOutput { viewer }, 0))
}

pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<String> {
    log_status!("viewer", "Generating production viewer markup");
    bundle::generate_production_viewer(ctx)
}
