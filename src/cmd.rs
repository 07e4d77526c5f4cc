//! Command line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::io::read_network_file;
use crate::pebbling::{
    check_schedule, peak_pebbles, pebble_schedule, schedule_weight, ActionKind, PebbleView,
    PebblingParams,
};
use crate::Signal;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a logic network
    ///
    /// Will print statistics on the number of inputs, outputs and gates in the network.
    #[clap()]
    Show(ShowArgs),

    /// Compute a reversible schedule for a logic network
    ///
    /// The network is scheduled for reversible execution by solving the
    /// reversible pebbling game with a SAT solver: each pebble stands for an
    /// ancilla qubit, and the schedule computes every primary output while
    /// returning all other ancillae to their initial state.
    #[clap()]
    Pebble(PebbleArgs),
}

/// Command arguments for network informations
#[derive(Args)]
pub struct ShowArgs {
    /// Network to show
    file: PathBuf,
}

impl ShowArgs {
    /// Run the show command
    pub fn run(&self) {
        use crate::network::stats::stats;
        let net = read_network_file(&self.file);
        println!("Network stats:\n{}\n\n", stats(&net));
    }
}

/// Command arguments for reversible scheduling
#[derive(Args)]
pub struct PebbleArgs {
    /// Network to schedule
    file: PathBuf,

    /// Maximum number of pebbles to use (0 for no limit)
    #[arg(short = 'p', long, default_value_t = 0)]
    pebbles: usize,

    /// Maximum number of steps
    #[arg(long, default_value_t = 1000)]
    max_steps: usize,

    /// Conflict limit for each SAT call (0 for no limit)
    #[arg(long, default_value_t = 0)]
    conflict_limit: u32,

    /// Maximum total action weight (0 for no limit)
    #[arg(long, default_value_t = 0)]
    max_weight: usize,

    /// Raise the pebble limit and retry when the search fails
    #[arg(long)]
    increment_on_failure: bool,

    /// Lower the pebble limit and retry while the search succeeds
    #[arg(long)]
    decrement_on_success: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,
}

impl PebbleArgs {
    /// Run the pebble command
    pub fn run(&self) {
        let net = read_network_file(&self.file);
        let params = PebblingParams {
            progress: self.progress,
            pebble_limit: self.pebbles,
            conflict_limit: self.conflict_limit,
            increment_on_failure: self.increment_on_failure,
            decrement_on_success: self.decrement_on_success,
            max_steps: self.max_steps,
            max_weight: self.max_weight,
        };
        match pebble_schedule(&net, &params) {
            Some((schedule, limit)) => {
                check_schedule(&net, &schedule, limit);
                println!(
                    "Schedule with {} actions, using {} pebbles",
                    schedule.len(),
                    peak_pebbles(&net, &schedule)
                );
                if net.has_weights() {
                    println!("Total weight: {}", schedule_weight(&net, &schedule));
                }
                for (node, kind) in &schedule {
                    let name = Signal::from_var(node - net.gate_offset());
                    match kind {
                        ActionKind::Compute => println!("compute {name}"),
                        ActionKind::Uncompute => println!("uncompute {name}"),
                    }
                }
                std::process::exit(0);
            }
            None => {
                println!("No schedule found within the given limits");
                std::process::exit(1);
            }
        }
    }
}
