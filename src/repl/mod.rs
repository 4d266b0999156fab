pub mod command;
pub mod controller;
pub mod session;

#[cfg(test)]
mod test_support;

pub use command::Command;
pub use controller::{run, Exit};
pub use session::{Session, SwitchOutcome};
