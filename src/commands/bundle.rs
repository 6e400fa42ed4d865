use clap::Args;

use roadie::bundle::{self, BundleReport};
use roadie::config::{BuildContext, SOURCE_FILES};
use roadie::utils::command;
use roadie::{git, log_status};

use super::CmdResult;

#[derive(Args)]
pub struct BundleArgs {}

pub fn run(_args: BundleArgs, ctx: &BuildContext) -> CmdResult<BundleReport> {
    let report = exec(ctx)?;
    Ok((report, 0))
}

/// Bundle all viewer sources into `build/reader.js`, stamped with the
/// short head revision. The git preflight runs before anything is written.
pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<BundleReport> {
    command::require_tool("git")?;
    let revision = git::short_head_revision(&ctx.root)?;

    log_status!(
        "bundle",
        "Bundling {} sources into {}",
        SOURCE_FILES.len(),
        ctx.bundle_target().display()
    );
    bundle::write_bundle(ctx, &revision)
}
