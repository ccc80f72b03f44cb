//! Dispatch parsed arguments to a command handler.
//!
//! Returns `Err` only for fatal failures (unreadable config, a store that
//! cannot be read or written); everything else is carried by the
//! [`CommandResult`].

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, extract::extract, init::init, prune::prune, translate::translate,
    },
};

pub fn run(Arguments { command, extract: extract_args }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::PrunePlaceholders(cmd)) => prune(cmd),
        Some(Command::Init) => init(),
        None => extract(extract_args),
    }
}
