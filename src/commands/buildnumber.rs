use clap::Args;
use serde::Serialize;

use roadie::config::{BuildContext, BASE_REVISION};
use roadie::log_status;
use roadie::utils::command;

use super::CmdResult;

#[derive(Args)]
pub struct BuildnumberArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildNumberOutput {
    pub build_number: u32,
    pub base_revision: &'static str,
}

pub fn run(_args: BuildnumberArgs, ctx: &BuildContext) -> CmdResult<BuildNumberOutput> {
    let build_number = exec(ctx)?;
    Ok((
        BuildNumberOutput {
            build_number,
            base_revision: BASE_REVISION,
        },
        0,
    ))
}

/// Commits since the base revision, cached on the context for the rest of
/// the run.
pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<u32> {
    command::require_tool("git")?;
    let build_number = ctx.build_number()?;
    log_status!("buildnumber", "Extension build number: {}", build_number);
    Ok(build_number)
}
