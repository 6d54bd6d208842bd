// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! `pose-render` command-line entry point.

use clap::Parser;

mod cli;

use cli::args::{Cli, Commands};
use cli::logging::set_verbose;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Normalize(args) => {
            set_verbose(args.verbose);
            cli::normalize::run_normalize(args);
        }
        Commands::Scene(args) => {
            set_verbose(args.verbose);
            cli::scene::run_scene(args);
        }
    }
}
