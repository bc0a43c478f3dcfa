//! ws-setup CLI: RoboMaker workshop environment setup.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ws-setup",
    version,
    about = "Resolve AWS settings, render roboMakerSettings.json, build and bundle the workshop workspaces"
)]
struct Cli {
    #[command(subcommand)]
    command: ws_setup::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = ws_setup::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
