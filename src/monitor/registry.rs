//! Command registry - static command registration and lookup.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::monitor::command::Command;
use crate::monitor::commands;

/// Static array of all registered commands, in help-listing order.
///
/// To add a new command:
/// 1. Create a new file in `commands/` directory
/// 2. Implement the `Command` trait
/// 3. Export a static instance
/// 4. Add it to this array
static COMMANDS: &[&dyn Command] = &[
    &commands::HELP,
    &commands::CONTINUE,
    &commands::QUIT,
    &commands::STEP,
    &commands::INFO,
    &commands::EXAMINE,
    &commands::PRINT,
];

lazy_static! {
    /// Name index over `COMMANDS`. The first registration of a name wins.
    static ref BY_NAME: HashMap<&'static str, &'static dyn Command> = {
        let mut map = HashMap::with_capacity(COMMANDS.len());
        for cmd in COMMANDS {
            map.entry(cmd.name()).or_insert(*cmd);
        }
        map
    };
}

/// Find a command by exact name.
pub fn find_command(name: &str) -> Option<&'static dyn Command> {
    BY_NAME.get(name).copied()
}

/// Get all registered commands.
pub fn all_commands() -> &'static [&'static dyn Command] {
    COMMANDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_distinct() {
        let names: HashSet<_> = all_commands().iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), all_commands().len());
    }

    #[test]
    fn every_registered_name_resolves_to_itself() {
        for cmd in all_commands() {
            let found = find_command(cmd.name()).unwrap();
            assert_eq!(found.name(), cmd.name());
        }
    }

    #[test]
    fn unregistered_names_are_absent() {
        for name in ["", "C", "quit", "si ", "help2", "x1", "info r"] {
            assert!(find_command(name).is_none(), "{name:?}");
        }
    }

    #[test]
    fn listing_order_is_fixed() {
        let names: Vec<_> = all_commands().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["help", "c", "q", "si", "info", "x", "p"]);
    }
}
