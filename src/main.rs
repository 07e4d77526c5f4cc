use clap::Parser;

use revsynth::cmd::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Show(a) => a.run(),
        Commands::Pebble(a) => a.run(),
    }
}
