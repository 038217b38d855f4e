//! Help command handler.
//!
//! Stateless command that always returns the same help message. Unknown
//! commands get a short pointer to it.

use log::debug;

use crate::commands::{
    CommandResult, Reply,
    responses::{format_help, format_unknown_command},
};

/// Returns help information about available commands.
pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult::reply(Reply::Text(format_help()))
}

/// Points the user to the help command.
pub fn handle_unknown() -> CommandResult {
    debug!("handling unknown command");

    CommandResult::reply(Reply::Text(format_unknown_command()))
}
