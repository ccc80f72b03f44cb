use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, rejected},
};
use crate::{cli::args::PruneCommand, core::prune::prune_placeholders};

pub fn prune(cmd: PruneCommand) -> Result<CommandResult> {
    if !cmd.main_file.is_file() {
        return Ok(rejected(format!(
            "main file {} does not exist",
            cmd.main_file.display()
        )));
    }

    let report = prune_placeholders(&cmd.main_file, cmd.apply)?;
    Ok(finish(CommandSummary::Prune(report), Vec::new()))
}
