use clap::Args;
use serde::Serialize;

use roadie::bundle::BundleReport;
use roadie::config::BuildContext;

use super::CmdResult;

#[derive(Args)]
pub struct ProductionArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOutput {
    pub bundle: BundleReport,
    pub viewer: String,
}

pub fn run(_args: ProductionArgs, ctx: &BuildContext) -> CmdResult<ProductionOutput> {
    let output = exec(ctx)?;
    Ok((output, 0))
}

/// Production output is the bundle plus the production viewer markup.
pub(crate) fn exec(ctx: &BuildContext) -> roadie::Result<ProductionOutput> {
    let bundle = super::bundle::exec(ctx)?;
    let viewer = super::viewer::exec(ctx)?;
    Ok(ProductionOutput { bundle, viewer })
}
