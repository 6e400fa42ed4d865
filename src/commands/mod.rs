use roadie::config::BuildContext;

pub type CmdResult<T> = roadie::Result<(T, i32)>;

pub mod browsertest;
pub mod buildnumber;
pub mod bundle;
pub mod chrome;
pub mod extension;
pub mod firefox;
pub mod lint;
pub mod pagesrepo;
pub mod production;
pub mod server;
pub mod test;
pub mod unittest;
pub mod viewer;
pub mod web;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $ctx:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $ctx))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    ctx: &BuildContext,
) -> (roadie::Result<serde_json::Value>, i32) {
    crate::tty::status("roadie is working...");

    match command {
        crate::Commands::Bundle(args) => dispatch!(args, ctx, bundle),
        crate::Commands::Viewer(args) => dispatch!(args, ctx, viewer),
        crate::Commands::Production(args) => dispatch!(args, ctx, production),
        crate::Commands::Pagesrepo(args) => dispatch!(args, ctx, pagesrepo),
        crate::Commands::Web(args) => dispatch!(args, ctx, web),
        crate::Commands::Buildnumber(args) => dispatch!(args, ctx, buildnumber),
        crate::Commands::Firefox(args) => dispatch!(args, ctx, firefox),
        crate::Commands::Chrome(args) => dispatch!(args, ctx, chrome),
        crate::Commands::Extension(args) => dispatch!(args, ctx, extension),
        crate::Commands::Browsertest(args) => dispatch!(args, ctx, browsertest),
        crate::Commands::Unittest(args) => dispatch!(args, ctx, unittest),
        crate::Commands::Test(args) => dispatch!(args, ctx, test),
        crate::Commands::Server(args) => dispatch!(args, ctx, server),
        crate::Commands::Lint(args) => dispatch!(args, ctx, lint),

        // Special case: the listing uses raw output mode and is handled in main.
        crate::Commands::List => {
            let err = roadie::Error::validation_invalid_argument(
                "output_mode",
                "List command uses raw output mode",
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}
