//! Command implementations.
//!
//! Each command family is defined in its own module file. Every handler
//! validates its own arguments and touches the target only once they are
//! known to be good.

pub mod exec;
pub mod expr;
pub mod help;
pub mod info;
pub mod memory;

// Re-export command instances for registry
pub use exec::{CONTINUE, QUIT, STEP};
pub use expr::PRINT;
pub use help::HELP;
pub use info::INFO;
pub use memory::EXAMINE;
