use clap::Args;
use serde::Serialize;

use roadie::config::BuildContext;
use roadie::pages::PagesReport;

use super::extension::ExtensionOutput;
use super::production::ProductionOutput;
use super::CmdResult;

#[derive(Args)]
pub struct WebArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebOutput {
    pub production: ProductionOutput,
    pub extensions: ExtensionOutput,
    pub pages: PagesReport,
}

/// Generate everything the website publish needs: production output, both
/// extensions, and the emptied pages checkout skeleton.
pub fn run(_args: WebArgs, ctx: &BuildContext) -> CmdResult<WebOutput> {
    let production = super::production::exec(ctx)?;
    let extensions = super::extension::exec(ctx)?;
    let pages = super::pagesrepo::exec(ctx)?;

    Ok((
        WebOutput {
            production,
            extensions,
            pages,
        },
        0,
    ))
}
