//! sdb - a command shell for driving an emulated CPU.
//!
//! The shell reads one command per line, dispatches it through a fixed
//! registry and reports the result. Everything it does to the guest goes
//! through the [`target::Target`] trait.

#[macro_use]
extern crate log;

pub mod config;
pub mod console;
pub mod error;
pub mod monitor;
pub mod target;

pub use error::{CmdResult, CommandError, SdbResult};
