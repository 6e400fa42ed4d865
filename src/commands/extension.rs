use clap::Args;
use serde::Serialize;

use roadie::config::BuildContext;
use roadie::log_status;
use roadie::package::{ChromeArtifacts, FirefoxArtifacts};

use super::CmdResult;

#[derive(Args)]
pub struct ExtensionArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionOutput {
    pub firefox: FirefoxArtifacts,
    pub chrome: ChromeArtifacts,
}

pub fn run(_args: ExtensionArgs, ctx: &BuildContext) -> CmdResult<ExtensionOutput> {
    let output = exec(ctx)?;
    Ok((output, 0))
}

/// Build both extension targets. Each platform target runs production
/// itself as well; repeated runs overwrite the same output.
pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<ExtensionOutput> {
    log_status!("extension", "Building extensions");
    super::production::exec(ctx)?;
    let firefox = super::firefox::exec(ctx)?;
    let chrome = super::chrome::exec(ctx)?;
    Ok(ExtensionOutput { firefox, chrome })
}
