//! Reversible pebbling of logic networks
//!
//! The reversible pebbling game models ancilla management in reversible
//! synthesis: computing a gate claims an ancilla qubit (a pebble), and a
//! pebble may only be placed or removed while the gate's fan-ins are pebbled.
//! Solving the game yields a schedule computing every primary output and
//! releasing every other ancilla, using at most a given number of pebbles.

mod encoder;
mod schedule;
mod strategy;
mod view;

pub use encoder::PebbleEncoder;
pub use schedule::{check_schedule, peak_pebbles, schedule_weight, ActionKind, Schedule};
pub use strategy::{pebble_schedule, PebblingParams};
pub use view::PebbleView;
