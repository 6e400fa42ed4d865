use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{
    browsertest, buildnumber, bundle, chrome, extension, firefox, lint, pagesrepo, production,
    server, test, unittest, viewer, web,
};
use roadie::config::BuildContext;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "roadie")]
#[command(version = VERSION)]
#[command(about = "Build and packaging automation for the reader viewer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle all viewer sources into build/reader.js
    Bundle(bundle::BundleArgs),
    /// Generate the production viewer markup
    Viewer(viewer::ViewerArgs),
    /// Bundle plus production viewer
    Production(production::ProductionArgs),
    /// Prepare the pages-branch checkout used for publishing
    Pagesrepo(pagesrepo::PagesrepoArgs),
    /// Production output, both extensions, and the pages checkout
    Web(web::WebArgs),
    /// Print the extension build number
    Buildnumber(buildnumber::BuildnumberArgs),
    /// Build and archive the Firefox extension
    Firefox(firefox::FirefoxArgs),
    /// Build and archive the Chrome extension
    Chrome(chrome::ChromeArgs),
    /// Build both browser extensions
    Extension(extension::ExtensionArgs),
    /// Launch the browser test runner
    Browsertest(browsertest::BrowsertestArgs),
    /// Launch the unit test build
    Unittest(unittest::UnittestArgs),
    /// Launch browser and unit tests
    Test(test::TestArgs),
    /// Start the local development server
    Server(server::ServerArgs),
    /// Style-check JS files, reporting failures only
    Lint(lint::LintArgs),
    /// List available targets (default when no target is given)
    List,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => {
            print_target_list();
            return std::process::ExitCode::SUCCESS;
        }
    };

    if matches!(command, Commands::List) {
        print_target_list();
        return std::process::ExitCode::SUCCESS;
    }

    let ctx = match BuildContext::from_current_dir() {
        Ok(ctx) => ctx,
        Err(err) => {
            let _ = output::print_result::<serde_json::Value>(Err(err));
            return std::process::ExitCode::from(1);
        }
    };

    let (json_result, exit_code) = commands::run_json(command, &ctx);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

/// Enumerate every registered target except the listing itself.
fn print_target_list() {
    println!("Please specify a target. Available targets:");
    let cmd = Cli::command();
    for sub in cmd.get_subcommands() {
        if sub.get_name() != "list" {
            println!("  {}", sub.get_name());
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
