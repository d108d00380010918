//! Console module - logging facilities.
//!
//! Shell output goes to the writer the shell is given; everything under
//! `log` goes to stderr through this module's logger.

pub mod logger;

pub use logger::init as init_logger;
