//! Remove command handler.
//!
//! Removing members is not supported: the league keeps everyone who ever
//! joined. The handler only answers with a refusal.

use log::debug;

use crate::commands::{CommandResult, Reply, responses::format_remove_unsupported};

pub fn handle_remove() -> CommandResult {
    debug!("handling remove command");

    CommandResult::reply(Reply::Text(format_remove_unsupported()))
}
