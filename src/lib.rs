//! Reversible logic synthesis tools
//!
//! This crate turns an irreversible combinational circuit into a reversible
//! computation schedule, the core step when compiling classical logic to a
//! quantum circuit. Every gate computed into an ancilla qubit must eventually
//! be uncomputed to free it, and the number of ancillae available bounds how
//! many gates may be live at once.
//!
//! # Usage and features
//!
//! Revsynth provides a command line tool, that can be installed using
//! [Cargo](https://doc.rust-lang.org/cargo/getting-started/installation.html):
//! `cargo install revsynth`.
//!
//! The `pebble` command computes a reversible schedule for a design with at
//! most 8 ancilla qubits:
//! ```bash
//! revsynth pebble mydesign.bench -p 8
//! ```
//!
//! The `show` command prints statistics about a design:
//! ```bash
//! revsynth show mydesign.bench
//! ```
//!
//! At the moment, the only supported input format is `.bench`.
//!
//! # Development
//!
//! ## Approach
//!
//! Scheduling is modelled as the reversible pebbling game on the network DAG:
//! a pebble on a gate stands for an allocated ancilla holding its value, and a
//! pebble may only be placed or removed while the gate's fan-ins are pebbled.
//! The game is solved with a SAT solver, one time step at a time: the horizon
//! grows until the formula becomes satisfiable, and an outer loop can raise
//! the pebble budget after a failure or lower it after a success. This finds
//! schedules that trade ancilla count against computation steps, including
//! the intermediate uncomputations that a simple topological strategy misses.
//!
//! ## Datastructures
//!
//! `Network` is a Xor-And graph (XAG), the representation commonly used for
//! reversible synthesis: 2-input And and Xor gates, with free complementation
//! occupying just one bit in `Signal`. The network is flat, combinational and
//! topologically sorted, and gates may carry weights expressing their cost in
//! the scheduled circuit.
//!
//! For example, here is a small circuit scheduled with two pebbles:
//! ```
//! use revsynth::{pebble_schedule, Network, PebblingParams};
//! let mut net = Network::new();
//! let i0 = net.add_input();
//! let i1 = net.add_input();
//! let i2 = net.add_input();
//! let and = net.and(i0, i1);
//! let xor = net.xor(and, i2);
//! net.add_output(xor);
//!
//! let params = PebblingParams {
//!     pebble_limit: 2,
//!     ..Default::default()
//! };
//! let (schedule, _) = pebble_schedule(&net, &params).unwrap();
//! assert_eq!(schedule.len(), 3);
//! ```

#![warn(missing_docs)]

pub mod cmd;
pub mod io;
pub mod network;
pub mod pebbling;
pub mod sat;

pub use network::{Gate, Network, Signal};
pub use pebbling::{pebble_schedule, PebblingParams, Schedule};
